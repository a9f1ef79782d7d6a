//! Rigid body descriptions and registered entries

use rapier3d::prelude::RigidBodyHandle;
use slotmap::new_key_type;
use tumblebox_math::{Transform, Vec3};
use tumblebox_scene::NodeKey;

use crate::{MotionState, PhysicsMaterial, ShapeKey};

new_key_type! {
    /// Key to a rigid body registered with the bridge
    pub struct BodyKey;
}

/// How a body takes part in the simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyType {
    /// Moved by gravity and contacts
    Dynamic,
    /// Never moves; other bodies collide with it
    Static,
}

impl BodyType {
    /// Zero mass is static, anything else dynamic
    pub fn from_mass(mass: f32) -> Self {
        if mass == 0.0 {
            BodyType::Static
        } else {
            BodyType::Dynamic
        }
    }
}

/// Everything needed to register a rigid body
#[derive(Clone, Debug)]
pub struct RigidBodyDesc {
    pub shape: ShapeKey,
    /// 0 for a static body
    pub mass: f32,
    pub start_transform: Transform,
    pub material: PhysicsMaterial,
    /// Track an interpolated pose for display
    pub motion_state: bool,
    /// Scene node this body drives
    pub visual_node: Option<NodeKey>,
}

impl RigidBodyDesc {
    /// Static body at the origin with a motion state and no visual node
    pub fn new(shape: ShapeKey) -> Self {
        Self {
            shape,
            mass: 0.0,
            start_transform: Transform::identity(),
            material: PhysicsMaterial::default(),
            motion_state: true,
            visual_node: None,
        }
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.start_transform = transform;
        self
    }

    pub fn with_material(mut self, material: PhysicsMaterial) -> Self {
        self.material = material;
        self
    }

    pub fn with_motion_state(mut self, enabled: bool) -> Self {
        self.motion_state = enabled;
        self
    }

    pub fn with_visual_node(mut self, node: NodeKey) -> Self {
        self.visual_node = Some(node);
        self
    }
}

/// A body registered with the bridge
#[derive(Clone, Debug)]
pub struct RigidBodyEntry {
    pub(crate) handle: RigidBodyHandle,
    pub(crate) shape: ShapeKey,
    pub(crate) mass: f32,
    pub(crate) local_inertia: Vec3,
    pub(crate) motion_state: Option<MotionState>,
    pub(crate) visual_node: Option<NodeKey>,
    pub(crate) material: PhysicsMaterial,
}

impl RigidBodyEntry {
    pub fn shape(&self) -> ShapeKey {
        self.shape
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn body_type(&self) -> BodyType {
        BodyType::from_mass(self.mass)
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.body_type() == BodyType::Dynamic
    }

    pub fn local_inertia(&self) -> Vec3 {
        self.local_inertia
    }

    pub fn motion_state(&self) -> Option<&MotionState> {
        self.motion_state.as_ref()
    }

    pub fn visual_node(&self) -> Option<NodeKey> {
        self.visual_node
    }

    pub fn material(&self) -> PhysicsMaterial {
        self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_type_from_mass() {
        assert_eq!(BodyType::from_mass(0.0), BodyType::Static);
        assert_eq!(BodyType::from_mass(1.0), BodyType::Dynamic);
    }

    #[test]
    fn test_desc_builder() {
        let desc = RigidBodyDesc::new(ShapeKey::default())
            .with_mass(1.0)
            .with_motion_state(false)
            .with_transform(Transform::from_position(Vec3::new(0.0, 200.0, 0.0)));
        assert_eq!(desc.mass, 1.0);
        assert!(!desc.motion_state);
        assert!(desc.visual_node.is_none());
        assert_eq!(desc.start_transform.position.y, 200.0);
    }
}
