//! Named mesh descriptions
//!
//! Meshes are described, not tessellated: the renderer builds vertex data
//! from a [`MeshShape`] and the scene graph only needs its bounds.

use std::collections::HashMap;

use tumblebox_math::{Aabb, Vec3};

use crate::SceneError;

/// Name of the built-in cube mesh
pub const CUBE_MESH: &str = "cube.mesh";

/// Parameters for a subdivided plane mesh
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneSpec {
    /// Plane normal
    pub normal: Vec3,
    /// Offset of the plane along the normal
    pub distance: f32,
    pub width: f32,
    pub height: f32,
    pub x_segments: u32,
    pub y_segments: u32,
    /// Texture repeats across the width
    pub u_tile: f32,
    /// Texture repeats across the height
    pub v_tile: f32,
    /// Direction the plane's height runs along
    pub up: Vec3,
}

impl PlaneSpec {
    /// Plane through the origin with the given normal and size
    pub fn new(normal: Vec3, width: f32, height: f32) -> Self {
        Self {
            normal,
            distance: 0.0,
            width,
            height,
            x_segments: 1,
            y_segments: 1,
            u_tile: 1.0,
            v_tile: 1.0,
            up: Vec3::Y,
        }
    }

    pub fn with_segments(mut self, x: u32, y: u32) -> Self {
        self.x_segments = x.max(1);
        self.y_segments = y.max(1);
        self
    }

    pub fn with_tiling(mut self, u: f32, v: f32) -> Self {
        self.u_tile = u;
        self.v_tile = v;
        self
    }

    pub fn with_up(mut self, up: Vec3) -> Self {
        self.up = up;
        self
    }

    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    /// In-plane axes (x along the width, y along the height) and the normal
    pub fn basis(&self) -> [Vec3; 3] {
        let z_axis = self.normal.normalized();
        let y_axis = self.up.normalized();
        let x_axis = y_axis.cross(z_axis).normalized();
        [x_axis, y_axis, z_axis]
    }

    /// Point on the plane at normalized coordinates `u`, `v` in 0..1
    pub fn point_at(&self, u: f32, v: f32) -> Vec3 {
        let [x_axis, y_axis, z_axis] = self.basis();
        x_axis * ((u - 0.5) * self.width)
            + y_axis * ((v - 0.5) * self.height)
            + z_axis * self.distance
    }
}

/// Shape a named mesh is built from
#[derive(Clone, Debug, PartialEq)]
pub enum MeshShape {
    /// Axis-aligned cube centered on the origin
    Cube { size: f32 },
    Plane(PlaneSpec),
}

impl MeshShape {
    /// Local-space bounds of the mesh
    pub fn bounds(&self) -> Aabb {
        match self {
            MeshShape::Cube { size } => {
                Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(size * 0.5))
            }
            MeshShape::Plane(spec) => {
                let mut aabb = Aabb::NULL;
                for (u, v) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
                    aabb.merge_point(spec.point_at(u, v));
                }
                aabb
            }
        }
    }
}

/// Registry of meshes by name
#[derive(Clone, Debug)]
pub struct MeshRegistry {
    meshes: HashMap<String, MeshShape>,
}

impl MeshRegistry {
    /// Registry holding the built-in 100-unit cube
    pub fn new() -> Self {
        let mut meshes = HashMap::new();
        meshes.insert(CUBE_MESH.to_string(), MeshShape::Cube { size: 100.0 });
        Self { meshes }
    }

    /// Register a plane mesh under `name`
    pub fn create_plane(&mut self, name: &str, spec: PlaneSpec) -> Result<(), SceneError> {
        if self.meshes.contains_key(name) {
            return Err(SceneError::DuplicateMesh(name.to_string()));
        }
        log::debug!(
            "Created plane mesh '{}' ({}x{}, {}x{} segments)",
            name,
            spec.width,
            spec.height,
            spec.x_segments,
            spec.y_segments
        );
        self.meshes.insert(name.to_string(), MeshShape::Plane(spec));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&MeshShape> {
        self.meshes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.meshes.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MeshShape)> {
        self.meshes.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Default for MeshRegistry {
    fn default() -> Self {
        Self::new()
    }
}
