//! Rendering pipeline components

pub mod scene_pipeline;
pub mod types;

pub use scene_pipeline::{ScenePipeline, DEPTH_FORMAT};
pub use types::{GpuLight, LineVertex, ObjectUniforms, SceneUniforms, Vertex, MAX_LIGHTS};
