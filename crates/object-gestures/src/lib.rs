//! Object Gestures Core Library
//!
//! Drag, rotate and drop-onto-plane handling for 3D objects in an AR scene.
//!
//! This library provides two layers:
//! - Core: `GestureManager`, a plain state machine fed with positions and
//!   rotations, plus the `PlaneProvider` / `SceneRaycaster` capabilities it
//!   consumes for plane snapping.
//! - Bevy integration: resources, messages and systems that drive
//!   `Transform`s of `Draggable` entities from host gesture input.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod capability;
pub mod config;
pub mod error;
pub mod hit;
pub mod manager;
pub mod planes;
pub mod rotation;

// Bevy integration
pub mod bevy;

pub use capability::{FallibleRaycaster, PlaneProvider, SceneRaycaster, TryRaycast};
pub use config::{DEFAULT_MAX_RAYCAST_DISTANCE, DEFAULT_ROTATION_SENSITIVITY, GestureConfig};
pub use error::{GestureError, GestureResult};
pub use hit::PlaneHitResult;
pub use manager::GestureManager;
pub use planes::{HorizontalPlane, HorizontalPlaneSet};
pub use rotation::scale_rotation;
