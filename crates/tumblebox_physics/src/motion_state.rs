//! Motion states: the pose a body shows between fixed sub-steps

use tumblebox_math::Transform;

/// Interpolated world transform of a rigid body
///
/// The bridge rewrites `graphics_world_transform` after every step; readers
/// should prefer it over the raw simulated pose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionState {
    /// Pose the body was created with
    pub start_world_transform: Transform,
    /// Pose to display
    pub graphics_world_transform: Transform,
}

impl MotionState {
    pub fn new(start: Transform) -> Self {
        Self {
            start_world_transform: start,
            graphics_world_transform: start,
        }
    }

    #[inline]
    pub fn world_transform(&self) -> Transform {
        self.graphics_world_transform
    }

    #[inline]
    pub fn set_world_transform(&mut self, transform: Transform) {
        self.graphics_world_transform = transform;
    }
}
