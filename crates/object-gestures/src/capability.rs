//! Capabilities the gesture core consumes from the host scene.
//!
//! Both traits have exactly one method so that tests and hosts can swap in
//! fixed implementations without an AR backend.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use bevy::math::Vec3;

use crate::hit::PlaneHitResult;

/// Source of the currently detected plane identifiers.
///
/// Read on every drop; planes may appear or vanish between calls.
pub trait PlaneProvider<Id> {
    fn plane_ids(&self) -> HashSet<Id>;
}

/// Synchronous downward ray test against a restricted set of planes.
pub trait SceneRaycaster<Id> {
    /// Casts a ray straight down from `origin` and returns the nearest hit on
    /// one of `plane_ids` within `max_distance`.
    fn raycast_down(
        &self,
        origin: Vec3,
        max_distance: f32,
        plane_ids: &HashSet<Id>,
    ) -> Option<PlaneHitResult>;
}

/// A fixed identifier set is a valid provider.
impl<Id: Eq + Hash + Clone> PlaneProvider<Id> for HashSet<Id> {
    fn plane_ids(&self) -> HashSet<Id> {
        self.clone()
    }
}

/// Ray test backend that can fail, e.g. one that wraps an asynchronous query.
pub trait TryRaycast<Id> {
    type Error: fmt::Display;

    fn try_raycast_down(
        &self,
        origin: Vec3,
        max_distance: f32,
        plane_ids: &HashSet<Id>,
    ) -> Result<Option<PlaneHitResult>, Self::Error>;
}

/// Adapts a [`TryRaycast`] backend into a [`SceneRaycaster`].
///
/// Backend errors are logged and reported as "no hit".
#[derive(Debug, Clone, Default)]
pub struct FallibleRaycaster<R>(pub R);

impl<R> FallibleRaycaster<R> {
    pub fn new(inner: R) -> Self {
        Self(inner)
    }

    pub fn into_inner(self) -> R {
        self.0
    }
}

impl<Id, R> SceneRaycaster<Id> for FallibleRaycaster<R>
where
    R: TryRaycast<Id>,
{
    fn raycast_down(
        &self,
        origin: Vec3,
        max_distance: f32,
        plane_ids: &HashSet<Id>,
    ) -> Option<PlaneHitResult> {
        match self.0.try_raycast_down(origin, max_distance, plane_ids) {
            Ok(hit) => hit,
            Err(e) => {
                tracing::warn!(%e, ?origin, "[raycast] backend failed, treating as no hit");
                None
            }
        }
    }
}
