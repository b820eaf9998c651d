//! Sensitivity-scaled incremental rotation.

use bevy::math::{Quat, Vec3};

/// Scales the angle of `delta` by `sensitivity` and pre-multiplies the
/// result onto `current`.
///
/// The axis of `delta` is kept. An identity or degenerate delta has angle 0
/// and leaves `current` untouched for every sensitivity.
pub fn scale_rotation(current: Quat, delta: Quat, sensitivity: f32) -> Quat {
    let (axis, angle) = delta.to_axis_angle();
    let scaled = Quat::from_axis_angle(axis.normalize_or(Vec3::X), angle * sensitivity);
    scaled * current
}
