//! Rigid transform (position + orientation)
//!
//! The pose a physics body reports and a scene node receives. Scale is not
//! part of it; scene nodes carry scale separately.

use crate::{Quat, Vec3};
use serde::{Serialize, Deserialize};

/// A rigid transform: rotate, then translate
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,
    /// Orientation as a unit quaternion
    pub orientation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Identity transform (no translation, no rotation)
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
        }
    }

    /// Create a transform with position and orientation
    pub fn from_position_orientation(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Transform a point from local space to world space
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.orientation.rotate(p) + self.position
    }

    /// Transform a direction (no translation)
    pub fn transform_direction(&self, d: Vec3) -> Vec3 {
        self.orientation.rotate(d)
    }

    /// Inverse transform
    pub fn inverse(&self) -> Self {
        let inv_orientation = self.orientation.conjugate();
        Self {
            position: inv_orientation.rotate(-self.position),
            orientation: inv_orientation,
        }
    }

    /// Compose two transforms: the result applies `other` first, then `self`
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            position: self.transform_point(other.position),
            orientation: self.orientation.mul(&other.orientation).normalize(),
        }
    }

    /// Advance this pose by constant linear and angular velocity over `dt`
    ///
    /// Angular velocity is in world space, so the delta rotation is applied
    /// on the left.
    pub fn integrate(&self, linear_velocity: Vec3, angular_velocity: Vec3, dt: f32) -> Self {
        let delta = Quat::from_scaled_axis(angular_velocity * dt);
        Self {
            position: self.position + linear_velocity * dt,
            orientation: delta.mul(&self.orientation).normalize(),
        }
    }
}
