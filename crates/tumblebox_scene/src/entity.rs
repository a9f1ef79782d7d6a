//! Renderable mesh instance

use tumblebox_math::Aabb;

use crate::MaterialLibrary;

/// A mesh attached to a scene node
///
/// Created through [`SceneGraph::create_entity`](crate::SceneGraph::create_entity)
/// so the mesh name is known to exist.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub name: String,
    mesh: String,
    material: String,
    pub cast_shadows: bool,
    /// Bounds of the mesh in local space
    local_aabb: Aabb,
}

impl Entity {
    pub(crate) fn new(name: String, mesh: String, local_aabb: Aabb) -> Self {
        Self {
            name,
            mesh,
            material: MaterialLibrary::DEFAULT.to_string(),
            cast_shadows: true,
            local_aabb,
        }
    }

    pub fn mesh_name(&self) -> &str {
        &self.mesh
    }

    pub fn material_name(&self) -> &str {
        &self.material
    }

    /// Assign a material; unknown names fall back to the default material
    pub fn set_material_name(&mut self, name: &str, materials: &MaterialLibrary) {
        self.material = materials.resolve_name(name).to_string();
    }

    pub fn local_aabb(&self) -> Aabb {
        self.local_aabb
    }
}
