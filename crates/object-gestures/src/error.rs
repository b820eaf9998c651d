//! Error types for gesture configuration.
//!
//! Gesture operations themselves never fail: a missing drag session, a
//! missing capability or a ray that hits nothing all surface as `None`.
//! Errors only exist for configuration that cannot produce sensible motion.

use thiserror::Error;

/// Result alias for fallible gesture APIs.
pub type GestureResult<T> = Result<T, GestureError>;

/// Errors raised while validating a [`crate::GestureConfig`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GestureError {
    /// Rotation sensitivity is NaN or infinite.
    #[error("rotation sensitivity must be finite, got {0}")]
    NonFiniteSensitivity(f32),

    /// Maximum ray-cast distance is NaN, infinite, zero or negative.
    #[error("max raycast distance must be finite and positive, got {0}")]
    InvalidRaycastDistance(f32),
}
