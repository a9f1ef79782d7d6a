//! GPU rendering system
//!
//! Owns the render context and the scene renderer, and keeps the camera's
//! aspect ratio in step with the surface.

use std::sync::Arc;
use winit::window::Window;
use tumblebox_render::{ContextError, RenderContext, SceneRenderer};
use tumblebox_scene::{NodeKey, SceneGraph};

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// GPU setup failed
    Context(ContextError),
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Context(e) => write!(f, "Render setup failed: {}", e),
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Context(e)
    }
}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(e: wgpu::SurfaceError) -> Self {
        match e {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            other => RenderError::Other(format!("{:?}", other)),
        }
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    renderer: SceneRenderer,
}

impl RenderSystem {
    /// Create render system for a window
    pub fn new(window: Arc<Window>, vsync: bool) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;
        let renderer = SceneRenderer::new(&context);
        log::info!(
            "Render system ready: {}x{} {:?}",
            context.size.width,
            context.size.height,
            context.config.format
        );
        Ok(Self { context, renderer })
    }

    /// Handle window resize and update the camera's aspect ratio
    pub fn resize(&mut self, width: u32, height: u32, graph: &mut SceneGraph, camera_node: NodeKey) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.renderer.resize(&self.context);
        self.sync_camera(graph, camera_node);
    }

    /// Give the camera the surface's current aspect ratio
    pub fn sync_camera(&self, graph: &mut SceneGraph, camera_node: NodeKey) {
        let (width, height) = self.size();
        if let Some(camera) = graph.node_mut(camera_node).and_then(|n| n.camera_mut()) {
            camera.viewport_resized(width, height);
        }
    }

    /// Render a single frame
    pub fn render_frame(&mut self, graph: &SceneGraph, camera_node: NodeKey) -> Result<(), RenderError> {
        self.renderer
            .render(&self.context, graph, camera_node)
            .map_err(RenderError::from)
    }

    /// Reconfigure the surface at its current size (after a lost surface)
    pub fn reconfigure(&mut self) {
        let size = self.context.size;
        self.context.resize(size);
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}
