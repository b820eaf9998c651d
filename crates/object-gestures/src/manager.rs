//! Drag, rotate and drop-onto-plane state for draggable objects.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use bevy::math::{Quat, Vec3};

use crate::capability::{PlaneProvider, SceneRaycaster};
use crate::config::GestureConfig;
use crate::rotation::scale_rotation;

type BoxedPlaneProvider<Id> = Box<dyn PlaneProvider<Id> + Send + Sync>;
type BoxedRaycaster<Id> = Box<dyn SceneRaycaster<Id> + Send + Sync>;

/// Tracks per-object drag offsets and resolves rotation and plane snapping.
///
/// `Id` is an opaque handle for a draggable object (and for plane surfaces).
/// The manager never owns the objects; callers feed it positions and apply
/// the positions and rotations it returns.
pub struct GestureManager<Id> {
    config: GestureConfig,
    plane_provider: Option<BoxedPlaneProvider<Id>>,
    raycaster: Option<BoxedRaycaster<Id>>,
    /// Anchor-to-origin offset captured at drag start.
    drag_offsets: HashMap<Id, Vec3>,
    /// Same keys as `drag_offsets`.
    active_drags: HashSet<Id>,
}

impl<Id> fmt::Debug for GestureManager<Id>
where
    Id: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureManager")
            .field("config", &self.config)
            .field("has_plane_provider", &self.plane_provider.is_some())
            .field("has_raycaster", &self.raycaster.is_some())
            .field("active_drags", &self.active_drags)
            .finish_non_exhaustive()
    }
}

impl<Id> Default for GestureManager<Id>
where
    Id: Eq + Hash + Clone + fmt::Debug,
{
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl<Id> GestureManager<Id>
where
    Id: Eq + Hash + Clone + fmt::Debug,
{
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            plane_provider: None,
            raycaster: None,
            drag_offsets: HashMap::new(),
            active_drags: HashSet::new(),
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replaces the whole configuration. Active drags keep their offsets.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    pub fn set_plane_provider<P>(&mut self, provider: P)
    where
        P: PlaneProvider<Id> + Send + Sync + 'static,
    {
        self.plane_provider = Some(Box::new(provider));
    }

    pub fn clear_plane_provider(&mut self) {
        self.plane_provider = None;
    }

    pub fn set_raycaster<R>(&mut self, raycaster: R)
    where
        R: SceneRaycaster<Id> + Send + Sync + 'static,
    {
        self.raycaster = Some(Box::new(raycaster));
    }

    pub fn clear_raycaster(&mut self) {
        self.raycaster = None;
    }

    pub fn has_raycaster(&self) -> bool {
        self.raycaster.is_some()
    }

    pub fn has_plane_provider(&self) -> bool {
        self.plane_provider.is_some()
    }

    /// Whether both a raycaster and a plane provider are installed.
    pub fn has_drop_capabilities(&self) -> bool {
        self.has_raycaster() && self.has_plane_provider()
    }

    pub fn with_plane_provider<P>(mut self, provider: P) -> Self
    where
        P: PlaneProvider<Id> + Send + Sync + 'static,
    {
        self.set_plane_provider(provider);
        self
    }

    pub fn with_raycaster<R>(mut self, raycaster: R) -> Self
    where
        R: SceneRaycaster<Id> + Send + Sync + 'static,
    {
        self.set_raycaster(raycaster);
        self
    }

    // ========================================================================
    // Drag
    // ========================================================================

    /// Starts a drag by recording `entity_position - touch_position`.
    ///
    /// Ignored while `id` is already being dragged, so duplicate begin events
    /// cannot reset the anchor.
    pub fn begin_drag(&mut self, id: Id, entity_position: Vec3, touch_position: Vec3) {
        if self.active_drags.contains(&id) {
            tracing::trace!(?id, "[gesture] begin ignored, drag already active");
            return;
        }

        let offset = entity_position - touch_position;
        tracing::debug!(?id, ?offset, "[gesture] drag started");
        self.drag_offsets.insert(id.clone(), offset);
        self.active_drags.insert(id);
    }

    /// Position for the object given the live touch point, or `None` when
    /// `id` has no drag in progress.
    pub fn update_drag(&self, id: &Id, touch_position: Vec3) -> Option<Vec3> {
        let offset = self.drag_offsets.get(id)?;
        let position = touch_position + *offset;
        tracing::trace!(?id, ?position, "[gesture] drag updated");
        Some(position)
    }

    /// Drops any drag state for `id`.
    pub fn end_drag(&mut self, id: &Id) {
        let had_offset = self.drag_offsets.remove(id).is_some();
        self.active_drags.remove(id);
        if had_offset {
            tracing::debug!(?id, "[gesture] drag ended");
        }
    }

    pub fn is_dragging(&self, id: &Id) -> bool {
        self.active_drags.contains(id)
    }

    pub fn active_drag_count(&self) -> usize {
        self.active_drags.len()
    }

    /// Ends the drag, then snaps `world_position` onto the plane below it
    /// if the configuration asks for it.
    ///
    /// Returns the snapped world position, or `None` when snapping is off or
    /// nothing was hit. Drag state is cleared in every case.
    pub fn end_drag_and_snap(&mut self, id: &Id, world_position: Vec3) -> Option<Vec3> {
        self.end_drag(id);

        if !self.config.snap_to_plane_on_drag_end {
            return None;
        }

        let snapped = self.drop_entity_onto_plane(world_position);
        tracing::debug!(?id, ?snapped, "[gesture] snap on drag end");
        snapped
    }

    /// Same as [`Self::end_drag_and_snap`] with capabilities supplied per
    /// call.
    pub fn end_drag_and_snap_with(
        &mut self,
        id: &Id,
        world_position: Vec3,
        raycaster: &(impl SceneRaycaster<Id> + ?Sized),
        planes: &(impl PlaneProvider<Id> + ?Sized),
    ) -> Option<Vec3> {
        self.end_drag(id);

        if !self.config.snap_to_plane_on_drag_end {
            return None;
        }

        let snapped = self.drop_onto_plane_with(world_position, raycaster, planes);
        tracing::debug!(?id, ?snapped, "[gesture] snap on drag end");
        snapped
    }

    // ========================================================================
    // Rotation
    // ========================================================================

    /// Applies `delta` to `current` with its angle scaled by the configured
    /// sensitivity.
    pub fn apply_rotation(&self, current: Quat, delta: Quat) -> Quat {
        let rotation = scale_rotation(current, delta, self.config.rotation_sensitivity);
        tracing::trace!(?rotation, "[gesture] rotation applied");
        rotation
    }

    // ========================================================================
    // Drop onto plane
    // ========================================================================

    /// Moves `entity_world_position` vertically onto the nearest plane below.
    ///
    /// `None` if either capability is unset or the ray hits nothing.
    pub fn drop_entity_onto_plane(&self, entity_world_position: Vec3) -> Option<Vec3> {
        let (Some(raycaster), Some(planes)) = (&self.raycaster, &self.plane_provider) else {
            return None;
        };
        self.drop_onto_plane_with(entity_world_position, &**raycaster, &**planes)
    }

    /// Same as [`Self::drop_entity_onto_plane`] with capabilities supplied
    /// per call.
    pub fn drop_onto_plane_with(
        &self,
        entity_world_position: Vec3,
        raycaster: &(impl SceneRaycaster<Id> + ?Sized),
        planes: &(impl PlaneProvider<Id> + ?Sized),
    ) -> Option<Vec3> {
        let plane_ids = planes.plane_ids();
        let hit = raycaster.raycast_down(
            entity_world_position,
            self.config.max_raycast_distance,
            &plane_ids,
        )?;

        tracing::debug!(
            surface = hit.surface_label(),
            distance = hit.distance(),
            "[gesture] dropped onto plane"
        );
        Some(entity_world_position.with_y(hit.position().y))
    }
}
