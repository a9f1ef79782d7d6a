//! Scene graph arena
//!
//! Nodes live in a [`SlotMap`] and refer to each other by [`NodeKey`]. The
//! graph also owns the mesh and material registries and the scene-wide
//! settings (ambient light, shadow technique).

use slotmap::SlotMap;
use tumblebox_math::{Aabb, Quat, Transform, Vec3};

use crate::{
    Camera, Colour, DirtyFlags, Entity, Light, MaterialLibrary, MeshRegistry, MovableObject,
    NodeKey, SceneError, SceneNode,
};

/// How shadows are rendered
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShadowTechnique {
    #[default]
    None,
    StencilModulative,
    StencilAdditive,
    TextureModulative,
}

/// World-space transform of a node, including scale
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedTransform {
    pub position: Vec3,
    pub orientation: Quat,
    pub scale: Vec3,
}

impl DerivedTransform {
    const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Rigid part of the transform (scale dropped)
    pub fn rigid(&self) -> Transform {
        Transform::from_position_orientation(self.position, self.orientation)
    }

    /// Combine with a child's local transform
    fn child(&self, node: &SceneNode) -> Self {
        Self {
            position: self.position
                + self.orientation.rotate(node.position().component_mul(self.scale)),
            orientation: self.orientation.mul(&node.orientation()).normalize(),
            scale: self.scale.component_mul(node.scale()),
        }
    }
}

/// The scene graph
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, SceneNode>,
    root: NodeKey,
    meshes: MeshRegistry,
    materials: MaterialLibrary,
    /// Ambient light applied to every surface
    pub ambient_light: Colour,
    pub shadow_technique: ShadowTechnique,
    /// Colour the viewport is cleared to
    pub background: Colour,
    entity_counter: usize,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Empty graph with just a root node
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let mut root_node = SceneNode::new(None);
        root_node.name = Some("Root".to_string());
        let root = nodes.insert(root_node);
        Self {
            nodes,
            root,
            meshes: MeshRegistry::new(),
            materials: MaterialLibrary::new(),
            ambient_light: Colour::rgb(0.5, 0.5, 0.5),
            shadow_technique: ShadowTechnique::None,
            background: Colour::BLACK,
            entity_counter: 0,
        }
    }

    /// Key of the root node
    #[inline]
    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Number of live nodes, root included
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Create a node under `parent`
    pub fn create_child_node(&mut self, parent: NodeKey) -> Result<NodeKey, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        let key = self.nodes.insert(SceneNode::new(Some(parent)));
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(key);
        }
        Ok(key)
    }

    /// Create a node directly under the root
    pub fn create_root_child(&mut self) -> NodeKey {
        let root = self.root;
        let key = self.nodes.insert(SceneNode::new(Some(root)));
        if let Some(r) = self.nodes.get_mut(root) {
            r.children.push(key);
        }
        key
    }

    /// Remove a node and its whole subtree
    ///
    /// Keys to removed nodes become stale and resolve to `None`. Returns the
    /// number of nodes removed.
    pub fn remove_node(&mut self, key: NodeKey) -> Result<usize, SceneError> {
        if key == self.root {
            return Err(SceneError::CannotRemoveRoot);
        }
        let parent = match self.nodes.get(key) {
            Some(node) => node.parent,
            None => return Err(SceneError::UnknownNode(key)),
        };
        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(p)) {
            p.children.retain(|c| *c != key);
        }

        let mut removed = 0;
        let mut stack = vec![key];
        while let Some(k) = stack.pop() {
            if let Some(node) = self.nodes.remove(k) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        Ok(removed)
    }

    pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut SceneNode> {
        self.nodes.get_mut(key)
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Iterate over all live nodes
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &SceneNode)> {
        self.nodes.iter()
    }

    /// Find the first node with the given name
    pub fn find_by_name(&self, name: &str) -> Option<NodeKey> {
        self.nodes
            .iter()
            .find(|(_, n)| n.name.as_deref() == Some(name))
            .map(|(k, _)| k)
    }

    /// Attach a camera, light or entity to a node
    pub fn attach_object(
        &mut self,
        key: NodeKey,
        object: impl Into<MovableObject>,
    ) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(key).ok_or(SceneError::UnknownNode(key))?;
        node.attached.push(object.into());
        node.mark_dirty(DirtyFlags::ATTACHMENTS | DirtyFlags::BOUNDS);
        Ok(())
    }

    pub fn meshes(&self) -> &MeshRegistry {
        &self.meshes
    }

    pub fn meshes_mut(&mut self) -> &mut MeshRegistry {
        &mut self.meshes
    }

    pub fn materials(&self) -> &MaterialLibrary {
        &self.materials
    }

    pub fn materials_mut(&mut self) -> &mut MaterialLibrary {
        &mut self.materials
    }

    /// Create an entity instancing a registered mesh
    ///
    /// The entity is not attached to anything yet.
    pub fn create_entity(&mut self, mesh: &str) -> Result<Entity, SceneError> {
        let shape = self
            .meshes
            .get(mesh)
            .ok_or_else(|| SceneError::UnknownMesh(mesh.to_string()))?;
        let bounds = shape.bounds();
        self.entity_counter += 1;
        let name = format!("Entity{}", self.entity_counter);
        Ok(Entity::new(name, mesh.to_string(), bounds))
    }

    pub fn create_camera(&self, name: &str) -> Camera {
        Camera::new(name)
    }

    pub fn create_light(&self, name: &str) -> Light {
        Light::new(name)
    }

    /// World-space transform of a node, resolved through its parents
    pub fn world_transform(&self, key: NodeKey) -> Option<DerivedTransform> {
        let mut chain = Vec::new();
        let mut current = Some(key);
        while let Some(k) = current {
            let node = self.nodes.get(k)?;
            chain.push(node);
            current = node.parent;
        }

        let mut derived = DerivedTransform::IDENTITY;
        for node in chain.iter().rev() {
            derived = derived.child(node);
        }
        Some(derived)
    }

    /// Aim a node's -Z axis at a world-space point
    pub fn look_at(&mut self, key: NodeKey, target: Vec3) -> Result<(), SceneError> {
        let world = self
            .world_transform(key)
            .ok_or(SceneError::UnknownNode(key))?;
        let parent_orientation = self
            .nodes
            .get(key)
            .and_then(|n| n.parent)
            .and_then(|p| self.world_transform(p))
            .map(|t| t.orientation)
            .unwrap_or(Quat::IDENTITY);

        // Direction is given to the node in its parent's space
        let direction = parent_orientation.conjugate().rotate(target - world.position);
        if let Some(node) = self.nodes.get_mut(key) {
            node.set_direction(direction);
        }
        Ok(())
    }

    /// Recompute and cache the world bounds of a node's attached entities
    ///
    /// Nodes without entities get a null box.
    pub fn update_bounds(&mut self, key: NodeKey) -> Result<Aabb, SceneError> {
        let world = self
            .world_transform(key)
            .ok_or(SceneError::UnknownNode(key))?;
        let node = self.nodes.get_mut(key).ok_or(SceneError::UnknownNode(key))?;

        let mut bounds = Aabb::NULL;
        for entity in node.entities() {
            bounds.merge(&entity.local_aabb().transformed(
                world.scale,
                world.orientation,
                world.position,
            ));
        }
        node.world_aabb = bounds;
        node.clear_dirty(DirtyFlags::BOUNDS);
        Ok(bounds)
    }

    /// Refresh the bounds of every node whose bounds are stale
    pub fn update_all_bounds(&mut self) {
        let stale: Vec<NodeKey> = self
            .nodes
            .iter()
            .filter(|(_, n)| n.dirty_flags().contains(DirtyFlags::BOUNDS))
            .map(|(k, _)| k)
            .collect();
        for key in stale {
            if let Err(e) = self.update_bounds(key) {
                log::trace!("Skipping bounds of {:?}: {}", key, e);
            }
        }
    }

    /// Cached world bounds of a node
    pub fn world_aabb(&self, key: NodeKey) -> Option<Aabb> {
        self.nodes.get(key).map(|n| n.world_aabb())
    }

    /// Iterate over nodes carrying at least one entity
    pub fn renderables(&self) -> impl Iterator<Item = (NodeKey, &SceneNode)> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.entities().next().is_some())
    }

    /// Iterate over every light with its owning node
    pub fn lights(&self) -> impl Iterator<Item = (NodeKey, &Light)> {
        self.nodes
            .iter()
            .flat_map(|(k, n)| n.lights().map(move |l| (k, l)))
    }

    /// First node carrying a camera
    pub fn camera_node(&self) -> Option<NodeKey> {
        self.nodes
            .iter()
            .find(|(_, n)| n.camera().is_some())
            .map(|(k, _)| k)
    }
}
