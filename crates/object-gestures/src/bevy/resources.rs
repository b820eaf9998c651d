//! ECS Resources for the gesture integration.

use std::collections::VecDeque;
use std::sync::Arc;

use bevy::prelude::*;
use parking_lot::Mutex;

use crate::config::GestureConfig;
use crate::manager::GestureManager;

/// The gesture manager for bevy entities.
///
/// Host backends (e.g. an AR session raycaster) can be installed on the
/// inner manager. They are only used when both the raycaster and the plane
/// provider are present; otherwise drops resolve against
/// [`crate::bevy::PlaneSurface`] entities.
#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub struct EntityGestures(pub GestureManager<Entity>);

impl EntityGestures {
    pub fn new(config: GestureConfig) -> Self {
        Self(GestureManager::new(config))
    }
}

/// Commands pushed by code outside the ECS schedule.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureCommand {
    /// Drag moved to `touch` (parent space).
    DragChanged { entity: Entity, touch: Vec3 },
    /// Drag finished.
    DragEnded { entity: Entity },
    /// Rotate by `delta` before sensitivity scaling.
    Rotate { entity: Entity, delta: Quat },
    /// Replace the gesture configuration.
    SetConfig(GestureConfig),
    /// Frame boundary marker - commands after this are processed next frame.
    Yield,
}

/// Thread-safe command queue for platform gesture callbacks.
///
/// Clones share the same queue, so the host keeps one handle and the plugin
/// drains the other every frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct GestureQueue {
    inner: Arc<Mutex<VecDeque<GestureCommand>>>,
}

impl GestureQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a command to be processed.
    pub fn push(&self, command: GestureCommand) {
        self.inner.lock().push_back(command);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Drain commands until `Yield` or empty.
    ///
    /// `Yield` itself is consumed but not returned. A `SetConfig` behind other
    /// commands is left at the front of the queue, so it opens the next frame.
    pub fn drain_until_yield(&self) -> Vec<GestureCommand> {
        let mut guard = self.inner.lock();
        let mut commands = Vec::new();

        while let Some(cmd) = guard.pop_front() {
            match cmd {
                GestureCommand::Yield => break,
                GestureCommand::SetConfig(_) if !commands.is_empty() => {
                    guard.push_front(cmd);
                    break;
                }
                _ => commands.push(cmd),
            }
        }

        commands
    }
}
