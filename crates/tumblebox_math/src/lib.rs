//! 3D Mathematics Library
//!
//! Small value types shared by the scene graph, the physics bridge, and the
//! renderer.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Quat`] - Unit quaternion for orientations
//! - [`Transform`] - Position plus orientation (a rigid pose)
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`Mat4`] - 4x4 column-major matrix helpers for rendering

mod vec3;
mod quat;
mod transform;
mod aabb;
pub mod mat4;

pub use vec3::Vec3;
pub use quat::Quat;
pub use transform::Transform;
pub use aabb::Aabb;
pub use mat4::Mat4;
