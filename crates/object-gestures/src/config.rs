//! Gesture configuration.

use serde::{Deserialize, Serialize};

use crate::error::{GestureError, GestureResult};

/// Default multiplier applied to incoming rotation angles.
pub const DEFAULT_ROTATION_SENSITIVITY: f32 = 0.05;

/// Default length of the downward ray used when dropping onto a plane.
pub const DEFAULT_MAX_RAYCAST_DISTANCE: f32 = 10.0;

/// Tuning values for a [`crate::GestureManager`].
///
/// Deserializes with defaults for missing fields, so it can be embedded in a
/// host application's own settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Multiplier for the angle of each rotation delta.
    ///
    /// Values above 1 amplify, negative values invert.
    pub rotation_sensitivity: f32,
    /// Snap the object onto the plane beneath it when a drag ends.
    pub snap_to_plane_on_drag_end: bool,
    /// Maximum distance of the downward ray test.
    pub max_raycast_distance: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            rotation_sensitivity: DEFAULT_ROTATION_SENSITIVITY,
            snap_to_plane_on_drag_end: true,
            max_raycast_distance: DEFAULT_MAX_RAYCAST_DISTANCE,
        }
    }
}

impl GestureConfig {
    pub fn new(
        rotation_sensitivity: f32,
        snap_to_plane_on_drag_end: bool,
        max_raycast_distance: f32,
    ) -> Self {
        Self {
            rotation_sensitivity,
            snap_to_plane_on_drag_end,
            max_raycast_distance,
        }
    }

    pub fn with_rotation_sensitivity(mut self, sensitivity: f32) -> Self {
        self.rotation_sensitivity = sensitivity;
        self
    }

    pub fn with_snap_to_plane_on_drag_end(mut self, snap: bool) -> Self {
        self.snap_to_plane_on_drag_end = snap;
        self
    }

    pub fn with_max_raycast_distance(mut self, distance: f32) -> Self {
        self.max_raycast_distance = distance;
        self
    }

    /// Checks that the values can produce finite motion.
    ///
    /// Sensitivity may be any finite value; the ray-cast distance must be
    /// finite and strictly positive.
    pub fn validate(&self) -> GestureResult<()> {
        if !self.rotation_sensitivity.is_finite() {
            return Err(GestureError::NonFiniteSensitivity(self.rotation_sensitivity));
        }
        if !self.max_raycast_distance.is_finite() || self.max_raycast_distance <= 0.0 {
            return Err(GestureError::InvalidRaycastDistance(self.max_raycast_distance));
        }
        Ok(())
    }
}
