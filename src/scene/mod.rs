//! Scene construction
//!
//! Builds the demo scene graph together with the physics bodies that move it.

mod scene_builder;

pub use scene_builder::{DemoScene, SceneBuilder, SetupError, GROUND_MESH};
