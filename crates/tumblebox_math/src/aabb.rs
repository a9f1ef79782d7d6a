//! Axis-aligned bounding box

use crate::{Quat, Vec3};
use serde::{Serialize, Deserialize};

/// A 3D axis-aligned bounding box
///
/// A box with `min > max` on any axis is "null" (contains nothing); merging
/// into a null box yields the other box unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::NULL
    }
}

impl Aabb {
    /// The empty box
    pub const NULL: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Create a new AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a position with given half-extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// True if this box contains nothing
    pub fn is_null(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Center of the box (zero for a null box)
    pub fn center(&self) -> Vec3 {
        if self.is_null() {
            return Vec3::ZERO;
        }
        (self.min + self.max) * 0.5
    }

    /// Full size in each dimension (zero for a null box)
    pub fn size(&self) -> Vec3 {
        if self.is_null() {
            return Vec3::ZERO;
        }
        self.max - self.min
    }

    /// Half the size in each dimension
    pub fn half_extents(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// The eight corners
    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// Grow to include a point
    pub fn merge_point(&mut self, p: Vec3) {
        self.min = self.min.min_components(p);
        self.max = self.max.max_components(p);
    }

    /// Grow to include another box
    pub fn merge(&mut self, other: &Aabb) {
        if other.is_null() {
            return;
        }
        self.merge_point(other.min);
        self.merge_point(other.max);
    }

    /// Check if a point is inside or on the box
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Axis-aligned box enclosing this box after scale, rotation and translation
    pub fn transformed(&self, scale: Vec3, orientation: Quat, position: Vec3) -> Self {
        if self.is_null() {
            return *self;
        }
        let mut out = Self::NULL;
        for corner in self.corners() {
            out.merge_point(orientation.rotate(corner.component_mul(scale)) + position);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn test_from_center_half_extents() {
        let b = Aabb::from_center_half_extents(Vec3::new(1.0, 2.0, 3.0), Vec3::splat(0.5));
        assert_eq!(b.min, Vec3::new(0.5, 1.5, 2.5));
        assert_eq!(b.max, Vec3::new(1.5, 2.5, 3.5));
        assert_eq!(b.center(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(b.size(), Vec3::ONE);
    }

    #[test]
    fn test_null_box() {
        let b = Aabb::NULL;
        assert!(b.is_null());
        assert_eq!(b.size(), Vec3::ZERO);
        assert!(!b.contains(Vec3::ZERO));
    }

    #[test]
    fn test_merge_into_null() {
        let mut b = Aabb::NULL;
        let other = Aabb::new(Vec3::ZERO, Vec3::ONE);
        b.merge(&other);
        assert_eq!(b, other);
    }

    #[test]
    fn test_transformed_translation_and_scale() {
        let b = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(50.0));
        let t = b.transformed(Vec3::splat(2.0), Quat::IDENTITY, Vec3::new(0.0, 200.0, 0.0));
        assert_eq!(t.size(), Vec3::splat(200.0));
        assert_eq!(t.center(), Vec3::new(0.0, 200.0, 0.0));
    }

    #[test]
    fn test_transformed_rotation_grows_box() {
        let b = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(1.0));
        let t = b.transformed(Vec3::ONE, Quat::from_axis_angle(Vec3::Y, FRAC_PI_4), Vec3::ZERO);
        let expected = 2.0 * std::f32::consts::SQRT_2;
        assert!((t.size().x - expected).abs() < 0.0001);
        assert!((t.size().y - 2.0).abs() < 0.0001);
    }

    #[test]
    fn test_zero_size_box() {
        let b = Aabb::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(!b.is_null());
        assert!(b.size().is_zero());
    }
}
