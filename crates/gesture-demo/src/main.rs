//! Object Gestures Demo
//!
//! Runs a headless Bevy app with a floor, a table and a cube, then replays a
//! scripted gesture session through the shared `GestureQueue`: the cube is
//! lifted over the table, turned, released and snapped onto the tabletop.
//!
//! Set `RUST_LOG=object_gestures=trace` to see every gesture step.

use bevy::prelude::*;
use object_gestures::GestureConfig;
use object_gestures::bevy::{
    Draggable, GestureCommand, GestureQueue, ObjectGesturesPlugin, PlaneSurface,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let queue = GestureQueue::new();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(bevy::transform::TransformPlugin)
        .add_plugins(
            ObjectGesturesPlugin::new(GestureConfig::default().with_rotation_sensitivity(0.5))
                .with_queue(queue.clone()),
        );

    let world = app.world_mut();
    world.spawn((
        Transform::from_xyz(0.0, 0.0, 0.0),
        PlaneSurface::new(Vec2::splat(5.0), "floor"),
    ));
    world.spawn((
        Transform::from_xyz(2.0, 0.75, 0.0),
        PlaneSurface::new(Vec2::new(0.6, 0.4), "table"),
    ));
    let cube = world
        .spawn((Transform::from_xyz(0.0, 0.0, 0.0), Draggable))
        .id();

    // Settle transforms before the first gesture
    app.update();

    // Grab the cube slightly off-center and carry it over the table
    let grab = Vec3::new(0.1, 0.2, 0.0);
    let path = [
        grab,
        Vec3::new(0.8, 1.0, 0.0),
        Vec3::new(1.6, 1.4, 0.1),
        Vec3::new(2.1, 1.5, 0.1),
    ];
    for touch in path {
        queue.push(GestureCommand::DragChanged {
            entity: cube,
            touch,
        });
        queue.push(GestureCommand::Yield);
    }
    queue.push(GestureCommand::Rotate {
        entity: cube,
        delta: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
    });
    queue.push(GestureCommand::Yield);
    queue.push(GestureCommand::DragEnded { entity: cube });

    while !queue.is_empty() {
        app.update();
        if let Some(transform) = app.world().get::<Transform>(cube) {
            tracing::info!(
                position = ?transform.translation,
                yaw_degrees = transform.rotation.to_euler(EulerRot::YXZ).0.to_degrees(),
                "cube"
            );
        }
    }
}
