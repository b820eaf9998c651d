//! ECS components for gesture targets.

use bevy::prelude::*;

/// Marker for entities that respond to drag and rotate gestures.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Draggable;

/// A detected horizontal surface that dropped entities can land on.
///
/// The surface height and center come from the entity's `GlobalTransform`;
/// its rotation is ignored, the footprint is axis-aligned.
#[derive(Component, Debug, Clone)]
pub struct PlaneSurface {
    /// Half size along world X (`x`) and world Z (`y`).
    pub half_extents: Vec2,
    pub label: String,
}

impl PlaneSurface {
    pub fn new(half_extents: Vec2, label: impl Into<String>) -> Self {
        Self {
            half_extents,
            label: label.into(),
        }
    }
}
