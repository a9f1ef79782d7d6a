//! Collision shape registry
//!
//! Shapes are registered once and shared by every body that uses them. The
//! registry keeps them alive until teardown, after all bodies are gone.

use std::sync::Arc;

use rapier3d::prelude::SharedShape;
use slotmap::{new_key_type, SlotMap};
use tumblebox_math::Vec3;

new_key_type! {
    /// Key to a registered collision shape
    pub struct ShapeKey;
}

/// Local inertia of a solid box
///
/// `m/12 * (ly² + lz², lx² + lz², lx² + ly²)` with `l = 2 * half_extent`.
/// Zero mass gives zero inertia.
pub fn box_inertia(half_extents: Vec3, mass: f32) -> Vec3 {
    if mass == 0.0 {
        return Vec3::ZERO;
    }
    let l = half_extents * 2.0;
    let (lx2, ly2, lz2) = (l.x * l.x, l.y * l.y, l.z * l.z);
    Vec3::new(ly2 + lz2, lx2 + lz2, lx2 + ly2) * (mass / 12.0)
}

/// A registered box shape
#[derive(Clone)]
pub struct BoxShape {
    half_extents: Vec3,
    pub(crate) shape: SharedShape,
}

impl BoxShape {
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Local inertia for a body of this shape with the given mass
    pub fn calculate_local_inertia(&self, mass: f32) -> Vec3 {
        box_inertia(self.half_extents, mass)
    }
}

impl std::fmt::Debug for BoxShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxShape")
            .field("half_extents", &self.half_extents)
            .finish()
    }
}

/// Shared collision shape storage
#[derive(Default)]
pub struct CollisionShapes {
    shapes: SlotMap<ShapeKey, BoxShape>,
    /// Insertion order, so shapes are released in reverse
    order: Vec<ShapeKey>,
}

impl CollisionShapes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a box with the given half extents
    ///
    /// Degenerate boxes are accepted and logged.
    pub fn add_box(&mut self, half_extents: Vec3) -> ShapeKey {
        if !(half_extents.x > 0.0 && half_extents.y > 0.0 && half_extents.z > 0.0) {
            log::warn!(
                "Degenerate box shape with half extents {:?}, using it anyway",
                half_extents
            );
        }
        let he = half_extents.abs();
        let key = self.shapes.insert(BoxShape {
            half_extents,
            shape: SharedShape::cuboid(he.x, he.y, he.z),
        });
        self.order.push(key);
        key
    }

    pub fn get(&self, key: ShapeKey) -> Option<&BoxShape> {
        self.shapes.get(key)
    }

    pub fn contains(&self, key: ShapeKey) -> bool {
        self.shapes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Drop every shape, newest first
    ///
    /// Returns how many shapes were released and how many of those were
    /// still referenced by something else (a live collider) at release.
    pub(crate) fn release_all(&mut self) -> (usize, usize) {
        let mut released = 0;
        let mut still_referenced = 0;
        while let Some(key) = self.order.pop() {
            if let Some(shape) = self.shapes.remove(key) {
                if Arc::strong_count(&shape.shape.0) > 1 {
                    log::warn!("Collision shape {:?} still referenced at release", key);
                    still_referenced += 1;
                }
                released += 1;
            }
        }
        (released, still_referenced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_inertia_cube() {
        // Unit-mass cube with side 2: m/12 * (4 + 4)
        let i = box_inertia(Vec3::ONE, 1.0);
        let expected = 8.0 / 12.0;
        assert!((i.x - expected).abs() < 1e-6);
        assert!((i.y - expected).abs() < 1e-6);
        assert!((i.z - expected).abs() < 1e-6);
    }

    #[test]
    fn test_box_inertia_non_uniform() {
        let i = box_inertia(Vec3::new(1.0, 2.0, 3.0), 12.0);
        // l = (2, 4, 6)
        assert_eq!(i, Vec3::new(16.0 + 36.0, 4.0 + 36.0, 4.0 + 16.0));
    }

    #[test]
    fn test_zero_mass_zero_inertia() {
        assert_eq!(box_inertia(Vec3::splat(50.0), 0.0), Vec3::ZERO);
    }

    #[test]
    fn test_release_all_once() {
        let mut shapes = CollisionShapes::new();
        shapes.add_box(Vec3::ONE);
        shapes.add_box(Vec3::new(750.0, 50.0, 750.0));
        assert_eq!(shapes.len(), 2);

        assert_eq!(shapes.release_all(), (2, 0));
        assert!(shapes.is_empty());
        assert_eq!(shapes.release_all(), (0, 0));
    }

    #[test]
    fn test_release_reports_live_references() {
        let mut shapes = CollisionShapes::new();
        let key = shapes.add_box(Vec3::ONE);
        let held = shapes.get(key).map(|s| s.shape.clone());

        assert_eq!(shapes.release_all(), (1, 1));
        drop(held);
    }

    #[test]
    fn test_degenerate_box_is_kept() {
        let mut shapes = CollisionShapes::new();
        let key = shapes.add_box(Vec3::ZERO);
        assert_eq!(shapes.get(key).map(|s| s.half_extents()), Some(Vec3::ZERO));
    }
}
