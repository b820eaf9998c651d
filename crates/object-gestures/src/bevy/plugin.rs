//! Bevy plugin for object gestures.

use bevy::prelude::*;

use super::events::{DragGesture, EntitySnapped, RotateGesture};
use super::resources::{EntityGestures, GestureQueue};
use super::systems;
use crate::config::GestureConfig;

/// System set containing all gesture systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GestureSet;

/// Registers the gesture resources, messages and systems.
///
/// An invalid `config` is replaced by the defaults with a warning.
#[derive(Default)]
pub struct ObjectGesturesPlugin {
    pub config: GestureConfig,
    /// Queue shared with the host; a fresh one is created when `None`.
    pub queue: Option<GestureQueue>,
}

impl ObjectGesturesPlugin {
    pub fn new(config: GestureConfig) -> Self {
        Self { config, queue: None }
    }

    pub fn with_queue(mut self, queue: GestureQueue) -> Self {
        self.queue = Some(queue);
        self
    }
}

impl Plugin for ObjectGesturesPlugin {
    fn build(&self, app: &mut App) {
        let config = match self.config.validate() {
            Ok(()) => self.config,
            Err(e) => {
                tracing::warn!(%e, "[gesture] invalid configuration, using defaults");
                GestureConfig::default()
            }
        };

        app.insert_resource(EntityGestures::new(config))
            .insert_resource(self.queue.clone().unwrap_or_default());

        app.add_message::<DragGesture>()
            .add_message::<RotateGesture>()
            .add_message::<EntitySnapped>();

        app.add_systems(
            Update,
            (
                systems::process_gesture_commands,
                systems::apply_drag_gestures,
                systems::apply_rotate_gestures,
            )
                .chain()
                .in_set(GestureSet),
        );
    }
}
