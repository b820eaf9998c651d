//! ECS Messages for gesture input and results.

use bevy::prelude::*;

/// Phase of a continuous drag gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragPhase {
    /// The touch point moved. `touch` is in the entity's parent space
    /// (world space for root entities).
    Changed { touch: Vec3 },
    /// The gesture finished.
    Ended,
}

/// Message carrying one drag gesture sample for an entity.
#[derive(Message, Debug, Clone, Copy)]
pub struct DragGesture {
    pub entity: Entity,
    pub phase: DragPhase,
}

/// Message carrying an incremental rotation for an entity.
#[derive(Message, Debug, Clone, Copy)]
pub struct RotateGesture {
    pub entity: Entity,
    /// Raw rotation reported by the input source, before sensitivity scaling.
    pub delta: Quat,
}

/// Message fired when a dropped entity was snapped onto a plane.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct EntitySnapped {
    pub entity: Entity,
    /// Snapped position in world space.
    pub world_position: Vec3,
}
