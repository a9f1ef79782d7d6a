//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`TB_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;
use tumblebox_math::Vec3;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Physics configuration
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Falling box and ground
    #[serde(default)]
    pub scene: SceneConfig,
    /// Lights and shadows
    #[serde(default)]
    pub lighting: LightingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`TB_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Optional
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // TB_PHYSICS__MAX_SUB_STEPS=4 -> physics.max_sub_steps = 4
        figment = figment.merge(Env::prefixed("TB_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title; the box height is appended while running
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Tumblebox".to_string(),
            width: 1024,
            height: 768,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera node position [x, y, z]
    pub position: [f32; 3],
    /// World-space point the camera looks at
    pub look_at: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [200.0, 300.0, 400.0],
            look_at: [0.0, 0.0, 0.0],
            fov: 45.0,
            near: 5.0,
            far: 100_000.0,
        }
    }
}

/// Physics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity acceleration [x, y, z]
    pub gravity: [f32; 3],
    /// Most fixed sub-steps per frame (0 = one variable step)
    pub max_sub_steps: usize,
    /// Fixed sub-step length in seconds
    pub fixed_time_step: f32,
    /// Longest frame time handed to the simulation, in seconds
    pub max_frame_time: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -10.0, 0.0],
            max_sub_steps: 10,
            fixed_time_step: 1.0 / 60.0,
            max_frame_time: 0.25,
        }
    }
}

impl PhysicsConfig {
    /// Convert to the simulation bridge's configuration
    pub fn to_physics_config(&self) -> tumblebox_physics::PhysicsConfig {
        tumblebox_physics::PhysicsConfig::new(Vec3::from_array(self.gravity))
            .with_max_sub_steps(self.max_sub_steps)
            .with_fixed_time_step(self.fixed_time_step)
    }
}

/// The falling box and the ground it lands on
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Box starting position
    pub box_position: [f32; 3],
    /// Axis of the box's starting rotation (normalized on use)
    pub box_rotation_axis: [f32; 3],
    /// Starting rotation angle in degrees
    pub box_rotation_degrees: f32,
    /// Box mass; 0 would make it static
    pub box_mass: f32,
    /// Show the box's bounding box
    pub show_bounding_box: bool,
    /// Width and depth of the ground plane
    pub ground_size: f32,
    /// Thickness of the ground collision box
    pub ground_thickness: f32,
    /// Plane subdivisions along each side
    pub ground_segments: u32,
    /// Texture repeats along each side
    pub ground_tiling: f32,
    /// Ground material name
    pub ground_material: String,
    /// Surface friction for both bodies
    pub friction: f32,
    /// Bounciness for both bodies
    pub restitution: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            box_position: [0.0, 200.0, 0.0],
            box_rotation_axis: [1.0, 1.0, 0.0],
            box_rotation_degrees: 60.0,
            box_mass: 1.0,
            show_bounding_box: true,
            ground_size: 1500.0,
            ground_thickness: 100.0,
            ground_segments: 20,
            ground_tiling: 5.0,
            ground_material: "Examples/Rockwall".to_string(),
            friction: 0.5,
            restitution: 0.0,
        }
    }
}

/// Lights and shadows
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Ambient light colour [r, g, b]
    pub ambient: [f32; 3],
    /// Use stencil-modulative shadows (recorded, not drawn)
    pub stencil_shadows: bool,
    pub spotlight_colour: [f32; 3],
    pub spotlight_position: [f32; 3],
    pub spotlight_direction: [f32; 3],
    /// Inner cone angle in degrees
    pub spotlight_inner: f32,
    /// Outer cone angle in degrees
    pub spotlight_outer: f32,
    pub directional_colour: [f32; 3],
    pub directional_direction: [f32; 3],
    pub point_colour: [f32; 3],
    pub point_position: [f32; 3],
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient: [0.0, 0.0, 0.0],
            stencil_shadows: true,
            spotlight_colour: [0.0, 0.0, 1.0],
            spotlight_position: [200.0, 200.0, 0.0],
            spotlight_direction: [-1.0, -1.0, 0.0],
            spotlight_inner: 35.0,
            spotlight_outer: 50.0,
            directional_colour: [0.4, 0.0, 0.0],
            directional_direction: [0.0, -1.0, 1.0],
            point_colour: [0.3, 0.3, 0.3],
            point_position: [0.0, 150.0, 250.0],
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level used when RUST_LOG is unset (error, warn, info, debug, trace)
    pub log_level: String,
    /// Draw the bounding box of every entity, not just the box
    pub show_all_bounds: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_all_bounds: false,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.camera.position, [200.0, 300.0, 400.0]);
        assert_eq!(config.camera.near, 5.0);
        assert_eq!(config.physics.gravity, [0.0, -10.0, 0.0]);
        assert_eq!(config.physics.max_sub_steps, 10);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("max_sub_steps"));
        assert!(toml.contains("ground_material"));
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config: AppConfig = toml::from_str("[window]\ntitle = \"t\"\nwidth = 1\nheight = 2\nfullscreen = false\nvsync = false\n").unwrap();
        assert_eq!(config.window.width, 1);
        assert_eq!(config.scene.box_mass, 1.0);
    }

    #[test]
    fn test_to_physics_config() {
        let physics = PhysicsConfig {
            gravity: [0.0, -9.8, 0.0],
            max_sub_steps: 4,
            fixed_time_step: 0.01,
            max_frame_time: 0.1,
        };
        let bridge = physics.to_physics_config();
        assert_eq!(bridge.gravity, Vec3::new(0.0, -9.8, 0.0));
        assert_eq!(bridge.max_sub_steps, 4);
        assert_eq!(bridge.fixed_time_step, 0.01);
    }

    #[test]
    fn test_missing_directory_gives_defaults() {
        let config = AppConfig::load_from("does/not/exist").unwrap();
        assert_eq!(config.scene.ground_size, 1500.0);
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError { message: "bad".to_string() };
        assert_eq!(err.to_string(), "Configuration error: bad");
    }
}
