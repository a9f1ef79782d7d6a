//! Tumblebox - a box dropped onto a floor
//!
//! Opens a window, builds the demo scene and runs the frame loop until
//! Escape is pressed or the window is closed.

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use tumblebox::config::AppConfig;
use tumblebox::input::{InputAction, InputMapper};
use tumblebox::scene::DemoScene;
use tumblebox::systems::{RenderError, RenderSystem, SimulationSystem, WindowSystem};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    /// Scene graph plus the physics bridge driving it
    scene: DemoScene,
    simulation: SimulationSystem,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
}

impl App {
    fn new(config: AppConfig) -> Result<Self, tumblebox::scene::SetupError> {
        let scene = DemoScene::from_config(&config)?;
        let simulation = SimulationSystem::new(config.physics.max_frame_time);
        Ok(Self {
            config,
            scene,
            simulation,
            window: None,
            render: None,
        })
    }

    /// Release the physics world, then the GPU state, then the window
    fn shutdown(&mut self) {
        let report = self.scene.bridge.teardown();
        if report.shapes_still_referenced > 0 {
            log::warn!(
                "{} collision shapes were still referenced at teardown",
                report.shapes_still_referenced
            );
        }
        self.render = None;
        self.window = None;
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.simulation.update(&mut self.scene);

        if let Some(window) = &self.window {
            window.update_title(self.scene.box_height());
        }

        if let Some(render) = &mut self.render {
            match render.render_frame(&self.scene.graph, self.scene.camera_node) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => render.reconfigure(),
                Err(RenderError::OutOfMemory) => {
                    log::error!("GPU out of memory");
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        match RenderSystem::new(window.window().clone(), self.config.window.vsync) {
            Ok(render) => {
                render.sync_camera(&mut self.scene.graph, self.scene.camera_node);
                self.render = Some(render);
            }
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render {
                    render.resize(
                        physical_size.width,
                        physical_size.height,
                        &mut self.scene.graph,
                        self.scene.camera_node,
                    );
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(InputAction::Exit) = InputMapper::map_keyboard(key, event.state) {
                        log::info!("Escape pressed, exiting");
                        event_loop.exit();
                    }
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            InputMapper::map_mouse_motion(delta);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG wins over the configured level
    let loaded = AppConfig::load();
    let level = loaded
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });
    log::info!("Starting Tumblebox");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
