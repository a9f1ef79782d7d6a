//! GPU-compatible data types for the scene pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use tumblebox_math::mat4;

/// Most lights the shader evaluates per fragment
pub const MAX_LIGHTS: usize = 8;

/// Light kinds as the shader reads them from `GpuLight::spot[2]`
pub const LIGHT_POINT: f32 = 0.0;
pub const LIGHT_DIRECTIONAL: f32 = 1.0;
pub const LIGHT_SPOT: f32 = 2.0;

/// A mesh vertex
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in mesh space
    pub position: [f32; 3],
    /// Surface normal for lighting
    pub normal: [f32; 3],
    /// Texture coordinates, already tiled
    pub uv: [f32; 2],
}

/// A vertex of a debug line
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// One light, 80 bytes (must match scene.wgsl Light)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub struct GpuLight {
    /// World position; w = 0 for directional lights
    pub position: [f32; 4],
    /// Direction the light shines (normalized)
    pub direction: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    /// cos(inner / 2), cos(outer / 2), kind, unused
    pub spot: [f32; 4],
}

/// Per-frame uniforms, 752 bytes (must match scene.wgsl SceneUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SceneUniforms {
    /// Projection * view (64 bytes)
    pub view_proj: [[f32; 4]; 4],
    /// Camera position in world space (16 bytes)
    pub camera_position: [f32; 4],
    /// Ambient light colour (16 bytes)
    pub ambient: [f32; 4],
    /// Number of lights in use in `x` (16 bytes)
    pub light_count: [u32; 4],
    pub lights: [GpuLight; MAX_LIGHTS],
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            view_proj: mat4::IDENTITY,
            camera_position: [0.0, 0.0, 0.0, 1.0],
            ambient: [0.0, 0.0, 0.0, 1.0],
            light_count: [0; 4],
            lights: [GpuLight::default(); MAX_LIGHTS],
        }
    }
}

/// Per-object uniforms, 112 bytes (must match scene.wgsl ObjectUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ObjectUniforms {
    /// Model matrix (64 bytes)
    pub model: [[f32; 4]; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    /// Checker colour; w = 1 enables the pattern
    pub checker: [f32; 4],
}

impl Default for ObjectUniforms {
    fn default() -> Self {
        Self {
            model: mat4::IDENTITY,
            diffuse: [1.0; 4],
            specular: [0.0, 0.0, 0.0, 1.0],
            checker: [0.0; 4],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_vertex_size() {
        // 3 floats position + 3 floats normal + 2 floats uv = 32 bytes
        assert_eq!(size_of::<Vertex>(), 32);
        assert_eq!(size_of::<LineVertex>(), 24);
    }

    #[test]
    fn test_light_size() {
        // 5 vec4s
        assert_eq!(size_of::<GpuLight>(), 80);
    }

    #[test]
    fn test_scene_uniforms_size() {
        // 64 + 16 + 16 + 16 + 8 * 80
        assert_eq!(size_of::<SceneUniforms>(), 752);
    }

    #[test]
    fn test_object_uniforms_size() {
        assert_eq!(size_of::<ObjectUniforms>(), 112);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(std::mem::align_of::<Vertex>(), 4);
        assert_eq!(std::mem::align_of::<SceneUniforms>(), 4);
        assert_eq!(std::mem::align_of::<ObjectUniforms>(), 4);
    }
}
