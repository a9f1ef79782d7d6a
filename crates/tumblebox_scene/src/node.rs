//! Scene nodes and the objects attached to them

use bitflags::bitflags;
use slotmap::new_key_type;
use tumblebox_math::{Aabb, Quat, Vec3};

use crate::{Camera, Entity, Light};

new_key_type! {
    /// Key to a node in the scene graph
    ///
    /// Generational: once a node is removed, old keys resolve to `None`
    /// instead of aliasing whatever reuses the slot. The physics bridge
    /// stores these as its link from a rigid body to the node it drives.
    pub struct NodeKey;
}

bitflags! {
    /// Flags indicating which parts of a node have changed
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Position, orientation or scale changed
        const TRANSFORM = 1 << 0;
        /// Cached world bounds are stale
        const BOUNDS = 1 << 1;
        /// Attached objects changed
        const ATTACHMENTS = 1 << 2;
        /// Everything
        const ALL = Self::TRANSFORM.bits() | Self::BOUNDS.bits() | Self::ATTACHMENTS.bits();
    }
}

/// Something that can hang off a scene node
#[derive(Clone, Debug)]
pub enum MovableObject {
    Camera(Camera),
    Light(Light),
    Entity(Entity),
}

impl MovableObject {
    /// Name of the attached object
    pub fn name(&self) -> &str {
        match self {
            MovableObject::Camera(c) => &c.name,
            MovableObject::Light(l) => &l.name,
            MovableObject::Entity(e) => &e.name,
        }
    }
}

impl From<Camera> for MovableObject {
    fn from(c: Camera) -> Self {
        MovableObject::Camera(c)
    }
}

impl From<Light> for MovableObject {
    fn from(l: Light) -> Self {
        MovableObject::Light(l)
    }
}

impl From<Entity> for MovableObject {
    fn from(e: Entity) -> Self {
        MovableObject::Entity(e)
    }
}

/// A node in the scene graph
///
/// Position, orientation and scale are relative to the parent node.
#[derive(Clone, Debug)]
pub struct SceneNode {
    /// Optional name for lookup
    pub name: Option<String>,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
    position: Vec3,
    orientation: Quat,
    scale: Vec3,
    /// Axis to keep yaw around when re-aiming (cameras keep +Y up)
    fixed_yaw_axis: Option<Vec3>,
    pub(crate) attached: Vec<MovableObject>,
    /// Draw the world bounding box as a wireframe
    pub show_bounding_box: bool,
    pub(crate) world_aabb: Aabb,
    dirty: DirtyFlags,
}

impl SceneNode {
    pub(crate) fn new(parent: Option<NodeKey>) -> Self {
        Self {
            name: None,
            parent,
            children: Vec::new(),
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            scale: Vec3::ONE,
            fixed_yaw_axis: None,
            attached: Vec::new(),
            show_bounding_box: false,
            world_aabb: Aabb::NULL,
            dirty: DirtyFlags::ALL,
        }
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Set position relative to the parent
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty |= DirtyFlags::TRANSFORM | DirtyFlags::BOUNDS;
    }

    /// Set orientation relative to the parent (normalized on the way in)
    pub fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation.normalize();
        self.dirty |= DirtyFlags::TRANSFORM | DirtyFlags::BOUNDS;
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty |= DirtyFlags::TRANSFORM | DirtyFlags::BOUNDS;
    }

    /// Move by an offset in parent space
    pub fn translate(&mut self, offset: Vec3) {
        self.set_position(self.position + offset);
    }

    /// Keep yaw about `axis` when re-aiming with [`set_direction`](Self::set_direction)
    pub fn set_fixed_yaw_axis(&mut self, axis: Option<Vec3>) {
        self.fixed_yaw_axis = axis.map(|a| a.normalized());
    }

    /// Point the node's local -Z axis along `direction` (parent space)
    ///
    /// A zero direction is ignored.
    pub fn set_direction(&mut self, direction: Vec3) {
        let dir = direction.normalized();
        if dir.is_zero() {
            return;
        }

        let orientation = match self.fixed_yaw_axis {
            Some(up) if up.cross(dir).length_squared() > 1e-8 => {
                let z_axis = -dir;
                let x_axis = up.cross(z_axis).normalized();
                let y_axis = z_axis.cross(x_axis);
                Quat::from_axes(x_axis, y_axis, z_axis)
            }
            _ => {
                let current = self.orientation.rotate(Vec3::NEG_Z);
                Quat::from_rotation_arc(current, dir).mul(&self.orientation)
            }
        };
        self.set_orientation(orientation);
    }

    /// Direction the node's local -Z axis points in parent space
    pub fn direction(&self) -> Vec3 {
        self.orientation.rotate(Vec3::NEG_Z)
    }

    /// Objects attached to this node
    pub fn attached_objects(&self) -> &[MovableObject] {
        &self.attached
    }

    /// Mutable access to the attached objects
    pub fn attached_objects_mut(&mut self) -> &mut [MovableObject] {
        self.dirty |= DirtyFlags::ATTACHMENTS;
        &mut self.attached
    }

    /// Attached entities only
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.attached.iter().filter_map(|o| match o {
            MovableObject::Entity(e) => Some(e),
            _ => None,
        })
    }

    /// First attached camera, if any
    pub fn camera(&self) -> Option<&Camera> {
        self.attached.iter().find_map(|o| match o {
            MovableObject::Camera(c) => Some(c),
            _ => None,
        })
    }

    /// Mutable access to the first attached camera
    pub fn camera_mut(&mut self) -> Option<&mut Camera> {
        self.attached.iter_mut().find_map(|o| match o {
            MovableObject::Camera(c) => Some(c),
            _ => None,
        })
    }

    /// Attached lights only
    pub fn lights(&self) -> impl Iterator<Item = &Light> {
        self.attached.iter().filter_map(|o| match o {
            MovableObject::Light(l) => Some(l),
            _ => None,
        })
    }

    /// Cached world bounds from the last [`SceneGraph::update_bounds`](crate::SceneGraph::update_bounds)
    pub fn world_aabb(&self) -> Aabb {
        self.world_aabb
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    #[inline]
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    #[inline]
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    #[inline]
    pub fn clear_dirty(&mut self, flags: DirtyFlags) {
        self.dirty.remove(flags);
    }
}
