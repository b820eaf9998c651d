//! In-memory set of horizontal plane surfaces.
//!
//! Implements both [`PlaneProvider`] and [`SceneRaycaster`] analytically, so
//! it serves as a lightweight backend for hosts that already know their
//! surfaces (and for the bevy integration, which rebuilds one per frame from
//! `PlaneSurface` components).

use std::collections::HashSet;
use std::hash::Hash;

use bevy::math::{Vec2, Vec3};

use crate::capability::{PlaneProvider, SceneRaycaster};
use crate::hit::PlaneHitResult;

/// An axis-aligned horizontal rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalPlane<Id> {
    pub id: Id,
    /// World-space center; `center.y` is the surface height.
    pub center: Vec3,
    /// Half size along world X (`x`) and world Z (`y`).
    pub half_extents: Vec2,
    pub label: String,
}

impl<Id> HorizontalPlane<Id> {
    pub fn new(id: Id, center: Vec3, half_extents: Vec2, label: impl Into<String>) -> Self {
        Self {
            id,
            center,
            half_extents,
            label: label.into(),
        }
    }

    /// Whether the vertical line through `point` crosses this rectangle.
    fn covers(&self, point: Vec3) -> bool {
        (point.x - self.center.x).abs() <= self.half_extents.x
            && (point.z - self.center.z).abs() <= self.half_extents.y
    }
}

/// A collection of [`HorizontalPlane`]s.
#[derive(Debug, Clone)]
pub struct HorizontalPlaneSet<Id> {
    planes: Vec<HorizontalPlane<Id>>,
}

impl<Id> Default for HorizontalPlaneSet<Id> {
    fn default() -> Self {
        Self { planes: Vec::new() }
    }
}

impl<Id: Eq + Hash + Clone> HorizontalPlaneSet<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a plane, replacing any plane with the same id.
    pub fn insert(&mut self, plane: HorizontalPlane<Id>) {
        self.remove(&plane.id);
        self.planes.push(plane);
    }

    /// Removes a plane. Returns true if it existed.
    pub fn remove(&mut self, id: &Id) -> bool {
        let before = self.planes.len();
        self.planes.retain(|p| &p.id != id);
        self.planes.len() != before
    }

    pub fn get(&self, id: &Id) -> Option<&HorizontalPlane<Id>> {
        self.planes.iter().find(|p| &p.id == id)
    }

    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HorizontalPlane<Id>> {
        self.planes.iter()
    }
}

impl<Id: Eq + Hash + Clone> FromIterator<HorizontalPlane<Id>> for HorizontalPlaneSet<Id> {
    fn from_iter<T: IntoIterator<Item = HorizontalPlane<Id>>>(iter: T) -> Self {
        let mut set = Self::new();
        for plane in iter {
            set.insert(plane);
        }
        set
    }
}

impl<Id: Eq + Hash + Clone> PlaneProvider<Id> for HorizontalPlaneSet<Id> {
    fn plane_ids(&self) -> HashSet<Id> {
        self.planes.iter().map(|p| p.id.clone()).collect()
    }
}

impl<Id: Eq + Hash + Clone> SceneRaycaster<Id> for HorizontalPlaneSet<Id> {
    fn raycast_down(
        &self,
        origin: Vec3,
        max_distance: f32,
        plane_ids: &HashSet<Id>,
    ) -> Option<PlaneHitResult> {
        let mut best: Option<(f32, &HorizontalPlane<Id>)> = None;

        for plane in &self.planes {
            if !plane_ids.contains(&plane.id) {
                continue;
            }

            // Planes above the origin are behind a downward ray
            let distance = origin.y - plane.center.y;
            if distance < 0.0 || distance > max_distance {
                continue;
            }

            if !plane.covers(origin) {
                continue;
            }

            if best.is_none_or(|(best_dist, _)| distance < best_dist) {
                best = Some((distance, plane));
            }
        }

        best.map(|(distance, plane)| {
            PlaneHitResult::new(origin.with_y(plane.center.y), distance, plane.label.clone())
        })
    }
}
