//! Ray-plane intersection records.

use bevy::math::Vec3;

/// Result of a downward ray test against a plane surface.
///
/// Produced by a [`crate::SceneRaycaster`]; read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneHitResult {
    position: Vec3,
    distance: f32,
    surface_label: String,
}

impl PlaneHitResult {
    pub fn new(position: Vec3, distance: f32, surface_label: impl Into<String>) -> Self {
        Self {
            position,
            distance,
            surface_label: surface_label.into(),
        }
    }

    /// World-space point where the ray met the surface.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Distance travelled along the ray.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Human-readable name of the surface that was hit.
    pub fn surface_label(&self) -> &str {
        &self.surface_label
    }
}
