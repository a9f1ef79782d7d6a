//! Physical material properties for contact response

use rapier3d::prelude::ColliderBuilder;
use serde::{Deserialize, Serialize};

/// Surface properties applied to a body's collider
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicsMaterial {
    /// Friction coefficient (0.0 = ice, 1.0 = rubber)
    pub friction: f32,
    /// Restitution/bounciness (0.0 = no bounce, 1.0 = perfect bounce)
    pub restitution: f32,
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        Self {
            friction: 0.5,
            restitution: 0.0,
        }
    }
}

impl PhysicsMaterial {
    /// Create a new physics material with custom friction and restitution
    ///
    /// Values are clamped to the range [0.0, 1.0].
    pub fn new(friction: f32, restitution: f32) -> Self {
        Self {
            friction: friction.clamp(0.0, 1.0),
            restitution: restitution.clamp(0.0, 1.0),
        }
    }

    pub(crate) fn apply(&self, builder: ColliderBuilder) -> ColliderBuilder {
        builder.friction(self.friction).restitution(self.restitution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_material() {
        let mat = PhysicsMaterial::default();
        assert_eq!(mat.friction, 0.5);
        assert_eq!(mat.restitution, 0.0);
    }

    #[test]
    fn test_new_clamps_values() {
        let mat = PhysicsMaterial::new(1.5, -0.5);
        assert_eq!(mat.friction, 1.0);
        assert_eq!(mat.restitution, 0.0);
    }
}
