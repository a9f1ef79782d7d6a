//! 4x4 matrix helpers for rendering
//!
//! Matrices are column-major (`m[column][row]`), matching WGSL `mat4x4<f32>`.

use crate::{Quat, Vec3};

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Model matrix from translation, rotation and non-uniform scale
///
/// Applies scale, then rotation, then translation.
pub fn from_trs(position: Vec3, orientation: Quat, scale: Vec3) -> Mat4 {
    let [x, y, z] = orientation.to_axes();
    let x = x * scale.x;
    let y = y * scale.y;
    let z = z * scale.z;
    [
        [x.x, x.y, x.z, 0.0],
        [y.x, y.y, y.z, 0.0],
        [z.x, z.y, z.z, 0.0],
        [position.x, position.y, position.z, 1.0],
    ]
}

/// Right-handed perspective projection with a 0..1 depth range
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let range = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, far * range, -1.0],
        [0.0, 0.0, near * far * range, 0.0],
    ]
}

/// View matrix for a camera at `position` with the given orientation
///
/// The camera looks down its local -Z axis with +Y up.
pub fn view_from_pose(position: Vec3, orientation: Quat) -> Mat4 {
    let inv = orientation.conjugate();
    let [x, y, z] = inv.to_axes();
    let t = inv.rotate(-position);
    [
        [x.x, x.y, x.z, 0.0],
        [y.x, y.y, y.z, 0.0],
        [z.x, z.y, z.z, 0.0],
        [t.x, t.y, t.z, 1.0],
    ]
}

/// Multiply two 4x4 matrices (`a * b`, so `b` is applied first)
pub fn mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];
    for (col, out) in result.iter_mut().enumerate() {
        for (row, value) in out.iter_mut().enumerate() {
            *value = (0..4).map(|k| a[k][row] * b[col][k]).sum();
        }
    }
    result
}

/// Transform a point (w = 1) and return the homogeneous result
pub fn transform_point4(m: &Mat4, p: Vec3) -> [f32; 4] {
    let v = [p.x, p.y, p.z, 1.0];
    let mut out = [0.0f32; 4];
    for (row, value) in out.iter_mut().enumerate() {
        *value = (0..4).map(|k| m[k][row] * v[k]).sum();
    }
    out
}
