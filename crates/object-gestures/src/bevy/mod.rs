//! Bevy integration for the gesture core.
//!
//! Translates drag and rotate gestures reported by the host (platform input
//! glue, UI callbacks, scripted tests) into `Transform` updates for
//! [`Draggable`] entities, and snaps dropped entities onto [`PlaneSurface`]s.

pub mod components;
pub mod events;
pub mod plugin;
pub mod resources;
pub mod systems;

#[cfg(test)]
mod test_utils;

pub use components::*;
pub use events::*;
pub use plugin::{GestureSet, ObjectGesturesPlugin};
pub use resources::*;
pub use systems::{apply_drag_gestures, apply_rotate_gestures, process_gesture_commands};
