//! CPU-side mesh data built from scene mesh shapes

use tumblebox_math::{Aabb, Vec3};
use tumblebox_scene::{MeshShape, PlaneSpec};

use crate::pipeline::{LineVertex, Vertex};

/// Indexed triangle list ready for upload
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Tessellate a mesh shape
    pub fn from_shape(shape: &MeshShape) -> Self {
        match shape {
            MeshShape::Cube { size } => Self::cube(*size),
            MeshShape::Plane(spec) => Self::plane(spec),
        }
    }

    /// Cube centered on the origin with 24 vertices (4 per face, flat normals)
    pub fn cube(size: f32) -> Self {
        let h = size * 0.5;
        // (normal, a, b) with a x b = normal, so corners wind counter-clockwise
        let faces = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (-Vec3::X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (-Vec3::Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (-Vec3::Z, Vec3::Y, Vec3::X),
        ];
        let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

        let mut mesh = Self::default();
        for (normal, a, b) in faces {
            let base = mesh.vertices.len() as u32;
            for (s, t) in corners {
                let p = (normal + a * s + b * t) * h;
                mesh.vertices.push(Vertex {
                    position: p.to_array(),
                    normal: normal.to_array(),
                    uv: [(s + 1.0) * 0.5, (t + 1.0) * 0.5],
                });
            }
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        mesh
    }

    /// Subdivided plane; UVs repeat `u_tile` x `v_tile` times
    pub fn plane(spec: &PlaneSpec) -> Self {
        let [_, _, normal] = spec.basis();
        let xs = spec.x_segments.max(1);
        let ys = spec.y_segments.max(1);

        let mut mesh = Self::default();
        for j in 0..=ys {
            for i in 0..=xs {
                let u = i as f32 / xs as f32;
                let v = j as f32 / ys as f32;
                mesh.vertices.push(Vertex {
                    position: spec.point_at(u, v).to_array(),
                    normal: normal.to_array(),
                    uv: [u * spec.u_tile, v * spec.v_tile],
                });
            }
        }

        let row = xs + 1;
        for j in 0..ys {
            for i in 0..xs {
                let a = j * row + i;
                let b = a + 1;
                let c = a + row + 1;
                let d = a + row;
                mesh.indices.extend_from_slice(&[a, b, c, a, c, d]);
            }
        }
        mesh
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}

/// The 12 edges of a box as a line list
pub fn aabb_lines(aabb: &Aabb, color: [f32; 3]) -> Vec<LineVertex> {
    if aabb.is_null() {
        return Vec::new();
    }
    let c = aabb.corners();
    // Corner index bits: x = 1, y = 2, z = 4
    const EDGES: [(usize, usize); 12] = [
        (0, 1), (2, 3), (4, 5), (6, 7),
        (0, 2), (1, 3), (4, 6), (5, 7),
        (0, 4), (1, 5), (2, 6), (3, 7),
    ];
    EDGES
        .iter()
        .flat_map(|&(a, b)| {
            [
                LineVertex { position: c[a].to_array(), color },
                LineVertex { position: c[b].to_array(), color },
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_normal(mesh: &MeshData, tri: usize) -> Vec3 {
        let p = |i: usize| Vec3::from_array(mesh.vertices[mesh.indices[tri * 3 + i] as usize].position);
        (p(1) - p(0)).cross(p(2) - p(0)).normalized()
    }

    #[test]
    fn test_cube_counts() {
        let mesh = MeshData::cube(100.0);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.index_count(), 36);
    }

    #[test]
    fn test_cube_bounds() {
        let mesh = MeshData::cube(100.0);
        let mut bounds = Aabb::NULL;
        for v in &mesh.vertices {
            bounds.merge_point(Vec3::from_array(v.position));
        }
        assert_eq!(bounds.size(), Vec3::splat(100.0));
    }

    #[test]
    fn test_cube_winds_outward() {
        let mesh = MeshData::cube(2.0);
        for tri in 0..12 {
            let geometric = triangle_normal(&mesh, tri);
            let stored = Vec3::from_array(mesh.vertices[mesh.indices[tri * 3] as usize].normal);
            assert!(geometric.dot(stored) > 0.99, "triangle {} winds inward", tri);
        }
    }

    #[test]
    fn test_ground_plane() {
        let spec = PlaneSpec::new(Vec3::Y, 1500.0, 1500.0)
            .with_segments(20, 20)
            .with_tiling(5.0, 5.0)
            .with_up(Vec3::Z);
        let mesh = MeshData::plane(&spec);

        assert_eq!(mesh.vertex_count(), 21 * 21);
        assert_eq!(mesh.index_count(), 20 * 20 * 6);
        assert_eq!(mesh.vertices.last().map(|v| v.uv), Some([5.0, 5.0]));
        // Faces up
        assert!(triangle_normal(&mesh, 0).dot(Vec3::Y) > 0.99);
        for v in &mesh.vertices {
            assert!(v.position[1].abs() < 1e-4);
        }
    }

    #[test]
    fn test_aabb_lines() {
        let aabb = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
        let lines = aabb_lines(&aabb, [1.0, 1.0, 1.0]);
        assert_eq!(lines.len(), 24);
        for pair in lines.chunks(2) {
            let a = Vec3::from_array(pair[0].position);
            let b = Vec3::from_array(pair[1].position);
            assert!(((a - b).length() - 2.0).abs() < 1e-5);
        }
        assert!(aabb_lines(&Aabb::NULL, [1.0; 3]).is_empty());
    }
}
