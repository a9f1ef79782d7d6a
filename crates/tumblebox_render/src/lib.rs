//! Scene graph renderer
//!
//! This crate draws a [`tumblebox_scene::SceneGraph`] with wgpu.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`pipeline::ScenePipeline`] - Lit triangle pipeline plus a line pipeline
//!   for bounding boxes
//! - [`mesh::MeshData`] - CPU-side vertex data built from scene mesh shapes
//! - [`renderable::SceneRenderer`] - Uploads meshes and per-node uniforms and
//!   records the frame

pub mod context;
pub mod mesh;
pub mod pipeline;
pub mod renderable;

pub use context::{ContextError, RenderContext};
pub use mesh::MeshData;
pub use renderable::SceneRenderer;
