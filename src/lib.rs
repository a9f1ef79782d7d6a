//! Tumblebox - a box dropped onto a floor
//!
//! A rapier3d simulation drives a small scene graph drawn with wgpu. The
//! library half holds everything except the event loop so it can be tested
//! without a window.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
