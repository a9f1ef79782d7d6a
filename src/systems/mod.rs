//! Application systems
//!
//! The frame loop split into its parts: simulation, window and rendering.

mod render;
mod simulation;
mod window;

pub use render::{RenderError, RenderSystem};
pub use simulation::{FrameEvent, SimulationSystem};
pub use window::{WindowError, WindowSystem};
