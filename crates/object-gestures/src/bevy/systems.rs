//! Gesture systems.
//!
//! Run in `Update`, chained in this order:
//! 1. `process_gesture_commands` turns queued host commands into messages.
//! 2. `apply_drag_gestures` moves and drops entities.
//! 3. `apply_rotate_gestures` rotates entities.

use bevy::prelude::*;

use super::components::{Draggable, PlaneSurface};
use super::events::{DragGesture, DragPhase, EntitySnapped, RotateGesture};
use super::resources::{EntityGestures, GestureCommand, GestureQueue};
use crate::planes::{HorizontalPlane, HorizontalPlaneSet};

/// System to process commands from the external gesture queue.
///
/// Handles commands until a `Yield` is encountered; the rest wait for the
/// next frame. A `SetConfig` always starts a new frame, so gestures queued
/// before it are applied with the previous configuration.
pub fn process_gesture_commands(
    queue: Res<GestureQueue>,
    mut gestures: ResMut<EntityGestures>,
    mut drags: MessageWriter<DragGesture>,
    mut rotations: MessageWriter<RotateGesture>,
) {
    for command in queue.drain_until_yield() {
        match command {
            GestureCommand::DragChanged { entity, touch } => {
                drags.write(DragGesture {
                    entity,
                    phase: DragPhase::Changed { touch },
                });
            }
            GestureCommand::DragEnded { entity } => {
                drags.write(DragGesture {
                    entity,
                    phase: DragPhase::Ended,
                });
            }
            GestureCommand::Rotate { entity, delta } => {
                rotations.write(RotateGesture { entity, delta });
            }
            GestureCommand::SetConfig(config) => match config.validate() {
                Ok(()) => {
                    tracing::info!(?config, "[gesture] configuration replaced");
                    gestures.set_config(config);
                }
                Err(e) => tracing::warn!(%e, "[gesture] rejected configuration"),
            },
            // Consumed by drain_until_yield
            GestureCommand::Yield => {}
        }
    }
}

/// System to move dragged entities and snap them onto planes on release.
///
/// Touch points are in the entity's parent space, so the drag offset is too.
/// On release the position is lifted to world space for the ray test and
/// the snapped result is brought back into parent space.
pub fn apply_drag_gestures(
    mut gestures: ResMut<EntityGestures>,
    mut drags: MessageReader<DragGesture>,
    mut draggables: Query<(&mut Transform, Option<&ChildOf>), With<Draggable>>,
    globals: Query<&GlobalTransform>,
    surfaces: Query<(Entity, &PlaneSurface, &GlobalTransform)>,
    mut snapped_events: MessageWriter<EntitySnapped>,
) {
    for drag in drags.read() {
        let entity = drag.entity;

        match drag.phase {
            DragPhase::Changed { touch } => {
                let Ok((mut transform, _)) = draggables.get_mut(entity) else {
                    tracing::warn!(?entity, "[gesture] drag target is not a Draggable entity");
                    continue;
                };
                if !gestures.is_dragging(&entity) {
                    gestures.begin_drag(entity, transform.translation, touch);
                }
                if let Some(position) = gestures.update_drag(&entity, touch) {
                    transform.translation = position;
                }
            }
            DragPhase::Ended => {
                let Ok((mut transform, child_of)) = draggables.get_mut(entity) else {
                    // Despawned or no longer Draggable: close the session, skip the snap
                    gestures.end_drag(&entity);
                    tracing::debug!(?entity, "[gesture] drag ended on a missing target");
                    continue;
                };

                let parent_global = child_of
                    .and_then(|c| globals.get(c.parent()).ok())
                    .copied()
                    .unwrap_or(GlobalTransform::IDENTITY);
                let world_position = parent_global.transform_point(transform.translation);

                let use_installed = gestures.has_drop_capabilities();
                if !use_installed && (gestures.has_raycaster() || gestures.has_plane_provider()) {
                    tracing::debug!(
                        ?entity,
                        "[gesture] incomplete drop capabilities, using PlaneSurface entities"
                    );
                }

                let snapped = if use_installed {
                    gestures.end_drag_and_snap(&entity, world_position)
                } else {
                    let planes = plane_snapshot(&surfaces);
                    gestures.end_drag_and_snap_with(&entity, world_position, &planes, &planes)
                };

                let Some(world_position) = snapped else {
                    continue;
                };

                transform.translation = parent_global
                    .affine()
                    .inverse()
                    .transform_point3(world_position);
                snapped_events.write(EntitySnapped {
                    entity,
                    world_position,
                });
            }
        }
    }
}

/// System to apply sensitivity-scaled rotation to entities.
pub fn apply_rotate_gestures(
    gestures: Res<EntityGestures>,
    mut rotations: MessageReader<RotateGesture>,
    mut transforms: Query<&mut Transform, With<Draggable>>,
) {
    for rotation in rotations.read() {
        let Ok(mut transform) = transforms.get_mut(rotation.entity) else {
            tracing::warn!(
                entity = ?rotation.entity,
                "[gesture] rotate target is not a Draggable entity"
            );
            continue;
        };
        transform.rotation = gestures.apply_rotation(transform.rotation, rotation.delta);
    }
}

/// Collects the current plane surfaces. Rebuilt on every drop so that
/// surfaces added or removed since the last drop are seen.
fn plane_snapshot(
    surfaces: &Query<(Entity, &PlaneSurface, &GlobalTransform)>,
) -> HorizontalPlaneSet<Entity> {
    surfaces
        .iter()
        .map(|(entity, surface, global)| {
            HorizontalPlane::new(
                entity,
                global.translation(),
                surface.half_extents,
                surface.label.clone(),
            )
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::bevy::test_utils::TestApp;
    use crate::capability::SceneRaycaster;
    use crate::config::GestureConfig;
    use crate::hit::PlaneHitResult;

    const EPS: f32 = 1e-5;

    struct FixedFloor(f32);

    impl SceneRaycaster<Entity> for FixedFloor {
        fn raycast_down(
            &self,
            origin: Vec3,
            _max_distance: f32,
            _plane_ids: &HashSet<Entity>,
        ) -> Option<PlaneHitResult> {
            Some(PlaneHitResult::new(
                origin.with_y(self.0),
                origin.y - self.0,
                "fixed",
            ))
        }
    }

    #[test]
    fn test_drag_moves_entity_by_offset() {
        let mut app = TestApp::new();
        let cube = app.spawn_draggable(Vec3::new(1.0, 0.0, 0.0));

        app.drag_to(cube, Vec3::ZERO);
        assert_eq!(app.translation(cube), Vec3::new(1.0, 0.0, 0.0));
        assert!(app.gestures().is_dragging(&cube));

        app.drag_to(cube, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(app.translation(cube), Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_drag_end_snaps_onto_plane_below() {
        let mut app = TestApp::new();
        app.spawn_plane(Vec3::new(0.0, 0.5, 0.0), Vec2::splat(5.0), "floor");
        let cube = app.spawn_draggable(Vec3::new(1.0, 2.0, 3.0));

        app.drag_to(cube, Vec3::new(1.0, 2.0, 3.0));
        app.drag_to(cube, Vec3::new(2.0, 2.0, 3.0));
        app.release(cube);

        assert_eq!(app.translation(cube), Vec3::new(2.0, 0.5, 3.0));
        assert!(!app.gestures().is_dragging(&cube));
        assert_eq!(
            app.snaps(),
            vec![EntitySnapped {
                entity: cube,
                world_position: Vec3::new(2.0, 0.5, 3.0)
            }]
        );
    }

    #[test]
    fn test_drag_end_without_plane_keeps_position() {
        let mut app = TestApp::new();
        let cube = app.spawn_draggable(Vec3::new(1.0, 2.0, 3.0));

        app.drag_to(cube, Vec3::ZERO);
        app.drag_to(cube, Vec3::ONE);
        app.release(cube);

        assert_eq!(app.translation(cube), Vec3::new(2.0, 3.0, 4.0));
        assert!(!app.gestures().is_dragging(&cube));
        assert!(app.snaps().is_empty());
    }

    #[test]
    fn test_drag_end_with_snap_disabled() {
        let config = GestureConfig::default().with_snap_to_plane_on_drag_end(false);
        let mut app = TestApp::with_config(config);
        app.spawn_plane(Vec3::ZERO, Vec2::splat(5.0), "floor");
        let cube = app.spawn_draggable(Vec3::new(1.0, 2.0, 3.0));

        app.drag_to(cube, Vec3::ZERO);
        app.release(cube);

        assert_eq!(app.translation(cube), Vec3::new(1.0, 2.0, 3.0));
        assert!(app.snaps().is_empty());
    }

    #[test]
    fn test_drag_end_after_draggable_removed_clears_session() {
        let mut app = TestApp::new();
        let cube = app.spawn_draggable(Vec3::new(1.0, 0.0, 0.0));
        app.drag_to(cube, Vec3::ZERO);
        assert!(app.gestures().is_dragging(&cube));

        app.world_mut().entity_mut(cube).remove::<Draggable>();
        app.release(cube);

        assert!(!app.gestures().is_dragging(&cube));
        assert_eq!(app.gestures().active_drag_count(), 0);

        // Re-enabled entity starts a fresh drag instead of reusing the old offset
        app.world_mut()
            .entity_mut(cube)
            .insert((Draggable, Transform::from_xyz(5.0, 0.0, 0.0)));
        app.drag_to(cube, Vec3::ZERO);
        assert_eq!(app.translation(cube), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_drag_end_after_despawn_clears_session() {
        let mut app = TestApp::new();
        let cube = app.spawn_draggable(Vec3::new(1.0, 0.0, 0.0));
        app.drag_to(cube, Vec3::ZERO);

        app.world_mut().entity_mut(cube).despawn();
        app.release(cube);

        assert!(!app.gestures().is_dragging(&cube));
        assert_eq!(app.gestures().active_drag_count(), 0);
        assert!(app.snaps().is_empty());
    }

    #[test]
    fn test_snap_converts_back_into_parent_space() {
        let mut app = TestApp::new();
        app.spawn_plane(Vec3::ZERO, Vec2::splat(5.0), "floor");
        let anchor = app.spawn_anchor(Vec3::new(0.0, 1.0, 0.0));
        let cube = app.spawn_child_draggable(anchor, Vec3::new(1.0, 1.0, 0.0));

        app.drag_to(cube, Vec3::new(1.0, 1.0, 0.0));
        app.release(cube);

        // World (1, 2, 0) lands on the floor at world y = 0, which is y = -1 locally
        let local = app.translation(cube);
        assert!(local.abs_diff_eq(Vec3::new(1.0, -1.0, 0.0), EPS));
        let snaps = app.snaps();
        assert_eq!(snaps.len(), 1);
        assert!(snaps[0].world_position.abs_diff_eq(Vec3::X, EPS));
    }

    #[test]
    fn test_installed_capabilities_take_precedence() {
        let mut app = TestApp::new();
        app.spawn_plane(Vec3::ZERO, Vec2::splat(5.0), "floor");
        {
            let mut gestures = app.world_mut().resource_mut::<EntityGestures>();
            gestures.set_raycaster(FixedFloor(-1.0));
            gestures.set_plane_provider(HashSet::<Entity>::new());
        }
        let cube = app.spawn_draggable(Vec3::new(1.0, 2.0, 3.0));

        app.drag_to(cube, Vec3::ZERO);
        app.release(cube);

        assert_eq!(app.translation(cube), Vec3::new(1.0, -1.0, 3.0));
    }

    #[test]
    fn test_single_installed_capability_falls_back_to_surfaces() {
        let mut app = TestApp::new();
        app.spawn_plane(Vec3::ZERO, Vec2::splat(5.0), "floor");
        app.world_mut()
            .resource_mut::<EntityGestures>()
            .set_raycaster(FixedFloor(-1.0));
        let cube = app.spawn_draggable(Vec3::new(1.0, 2.0, 3.0));

        app.drag_to(cube, Vec3::ZERO);
        app.release(cube);

        // Raycaster alone is not enough; the floor entity decides
        assert_eq!(app.translation(cube), Vec3::new(1.0, 0.0, 3.0));

        {
            let mut gestures = app.world_mut().resource_mut::<EntityGestures>();
            gestures.clear_raycaster();
            gestures.set_plane_provider(HashSet::<Entity>::new());
        }
        app.world_mut()
            .entity_mut(cube)
            .insert(Transform::from_xyz(1.0, 2.0, 3.0));
        app.drag_to(cube, Vec3::ZERO);
        app.release(cube);

        assert_eq!(app.translation(cube), Vec3::new(1.0, 0.0, 3.0));
    }

    #[test]
    fn test_rotate_applies_scaled_delta() {
        let config = GestureConfig::default().with_rotation_sensitivity(0.5);
        let mut app = TestApp::with_config(config);
        let cube = app.spawn_draggable(Vec3::ZERO);

        app.rotate(cube, Quat::from_rotation_y(FRAC_PI_2));

        let expected = Quat::from_rotation_y(FRAC_PI_2 * 0.5);
        assert!(app.rotation(cube).abs_diff_eq(expected, EPS));
    }

    #[test]
    fn test_non_draggable_entities_are_ignored() {
        let mut app = TestApp::new();
        let anchor = app.spawn_anchor(Vec3::new(1.0, 0.0, 0.0));

        app.drag_to(anchor, Vec3::ONE);
        app.rotate(anchor, Quat::from_rotation_y(FRAC_PI_2));

        assert_eq!(app.translation(anchor), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(app.rotation(anchor), Quat::IDENTITY);
        assert!(!app.gestures().is_dragging(&anchor));
    }

    #[test]
    fn test_set_config_command() {
        let mut app = TestApp::new();

        let invalid = GestureConfig::default().with_max_raycast_distance(-1.0);
        app.send(GestureCommand::SetConfig(invalid));
        assert_eq!(*app.gestures().config(), GestureConfig::default());

        let config = GestureConfig::new(1.0, false, 3.0);
        app.send(GestureCommand::SetConfig(config));
        assert_eq!(*app.gestures().config(), config);
    }

    #[test]
    fn test_set_config_waits_for_earlier_gestures() {
        let config = GestureConfig::default().with_rotation_sensitivity(1.0);
        let mut app = TestApp::with_config(config);
        let cube = app.spawn_draggable(Vec3::ZERO);

        app.push(GestureCommand::Rotate {
            entity: cube,
            delta: Quat::from_rotation_y(FRAC_PI_2),
        });
        app.push(GestureCommand::SetConfig(config.with_rotation_sensitivity(0.0)));
        app.update();

        // Rotation queued first still uses sensitivity 1
        let expected = Quat::from_rotation_y(FRAC_PI_2);
        assert!(app.rotation(cube).abs_diff_eq(expected, EPS));
        assert_eq!(app.gestures().config().rotation_sensitivity, 1.0);

        app.update();
        assert_eq!(app.gestures().config().rotation_sensitivity, 0.0);
    }

    #[test]
    fn test_yield_splits_frames() {
        let mut app = TestApp::new();
        let cube = app.spawn_draggable(Vec3::ZERO);

        app.push(GestureCommand::DragChanged {
            entity: cube,
            touch: Vec3::ZERO,
        });
        app.push(GestureCommand::Yield);
        app.push(GestureCommand::DragChanged {
            entity: cube,
            touch: Vec3::X,
        });

        app.update();
        assert_eq!(app.translation(cube), Vec3::ZERO);

        app.update();
        assert_eq!(app.translation(cube), Vec3::X);
    }
}
