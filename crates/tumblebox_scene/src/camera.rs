//! Camera attached to a scene node

use std::f32::consts::FRAC_PI_4;

use tumblebox_math::{mat4, Mat4};

/// Perspective camera
///
/// The camera views along the local -Z axis of the node it is attached to.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub name: String,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near_clip: f32,
    pub far_clip: f32,
    /// Width / height of the viewport
    pub aspect_ratio: f32,
    /// Follow the viewport aspect ratio on resize
    pub auto_aspect_ratio: bool,
}

impl Camera {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fov_y: FRAC_PI_4,
            near_clip: 100.0,
            far_clip: 100_000.0,
            aspect_ratio: 4.0 / 3.0,
            auto_aspect_ratio: false,
        }
    }

    pub fn with_near_clip(mut self, near: f32) -> Self {
        self.near_clip = near;
        self
    }

    pub fn with_far_clip(mut self, far: f32) -> Self {
        self.far_clip = far;
        self
    }

    pub fn with_fov_y(mut self, fov_y: f32) -> Self {
        self.fov_y = fov_y;
        self
    }

    pub fn with_auto_aspect_ratio(mut self, auto: bool) -> Self {
        self.auto_aspect_ratio = auto;
        self
    }

    /// Adopt the aspect ratio of a viewport if auto aspect is on
    pub fn viewport_resized(&mut self, width: u32, height: u32) {
        if self.auto_aspect_ratio && width > 0 && height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }

    /// Projection matrix for this camera
    pub fn projection_matrix(&self) -> Mat4 {
        mat4::perspective(self.fov_y, self.aspect_ratio, self.near_clip, self.far_clip)
    }
}
