//! Test utilities for headless Bevy integration tests.
//!
//! Provides `TestApp`, a wrapper around `bevy::app::App` that uses
//! `MinimalPlugins` + `TransformPlugin` + `ObjectGesturesPlugin`.

use bevy::prelude::*;

use super::components::{Draggable, PlaneSurface};
use super::events::EntitySnapped;
use super::plugin::{GestureSet, ObjectGesturesPlugin};
use super::resources::{EntityGestures, GestureCommand, GestureQueue};
use crate::config::GestureConfig;

/// Every `EntitySnapped` message seen so far.
#[derive(Resource, Default)]
struct SnapLog(Vec<EntitySnapped>);

fn record_snaps(mut snaps: MessageReader<EntitySnapped>, mut log: ResMut<SnapLog>) {
    log.0.extend(snaps.read().copied());
}

/// A headless Bevy app wrapper for testing.
pub(crate) struct TestApp {
    pub app: App,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(GestureConfig::default())
    }

    pub fn with_config(config: GestureConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(bevy::transform::TransformPlugin);
        app.add_plugins(ObjectGesturesPlugin::new(config));
        app.init_resource::<SnapLog>();
        app.add_systems(Update, record_snaps.after(GestureSet));
        app.update();
        Self { app }
    }

    /// Run a single frame update.
    pub fn update(&mut self) {
        self.app.update();
    }

    /// Push a command without running a frame.
    pub fn push(&mut self, command: GestureCommand) {
        self.app.world().resource::<GestureQueue>().push(command);
    }

    /// Push a command and run one frame.
    pub fn send(&mut self, command: GestureCommand) {
        self.push(command);
        self.update();
    }

    /// Move a drag on `entity` to `touch` and run one frame.
    pub fn drag_to(&mut self, entity: Entity, touch: Vec3) {
        self.send(GestureCommand::DragChanged { entity, touch });
    }

    /// End the drag on `entity` and run one frame.
    pub fn release(&mut self, entity: Entity) {
        self.send(GestureCommand::DragEnded { entity });
    }

    pub fn rotate(&mut self, entity: Entity, delta: Quat) {
        self.send(GestureCommand::Rotate { entity, delta });
    }

    pub fn spawn_draggable(&mut self, translation: Vec3) -> Entity {
        let entity = self
            .world_mut()
            .spawn((Transform::from_translation(translation), Draggable))
            .id();
        // Propagate GlobalTransform
        self.update();
        entity
    }

    pub fn spawn_child_draggable(&mut self, parent: Entity, translation: Vec3) -> Entity {
        let entity = self
            .world_mut()
            .spawn((Transform::from_translation(translation), Draggable, ChildOf(parent)))
            .id();
        self.update();
        entity
    }

    /// Spawn a plain transform entity (not draggable).
    pub fn spawn_anchor(&mut self, translation: Vec3) -> Entity {
        let entity = self.world_mut().spawn(Transform::from_translation(translation)).id();
        self.update();
        entity
    }

    pub fn spawn_plane(&mut self, center: Vec3, half_extents: Vec2, label: &str) -> Entity {
        let entity = self
            .world_mut()
            .spawn((
                Transform::from_translation(center),
                PlaneSurface::new(half_extents, label),
            ))
            .id();
        self.update();
        entity
    }

    pub fn translation(&self, entity: Entity) -> Vec3 {
        self.world().get::<Transform>(entity).map(|t| t.translation).unwrap_or(Vec3::NAN)
    }

    pub fn rotation(&self, entity: Entity) -> Quat {
        self.world().get::<Transform>(entity).map(|t| t.rotation).unwrap_or(Quat::NAN)
    }

    pub fn gestures(&self) -> &EntityGestures {
        self.world().resource::<EntityGestures>()
    }

    pub fn snaps(&self) -> Vec<EntitySnapped> {
        self.world().resource::<SnapLog>().0.clone()
    }

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}
