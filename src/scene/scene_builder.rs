//! SceneBuilder - Demo scene construction
//!
//! Builds the scene graph and the physics bodies that drive it, in the order
//! the demo needs: physics, camera, floor, lights, then the falling box.

use log::{info, warn};
use tumblebox_math::{Quat, Transform, Vec3};
use tumblebox_physics::{
    BodyKey, BridgeError, PhysicsConfig, PhysicsMaterial, RigidBodyDesc, SimulationBridge,
};
use tumblebox_scene::{
    Colour, Light, LightKind, NodeKey, PlaneSpec, SceneError, SceneGraph, ShadowTechnique,
    CUBE_MESH,
};

use crate::config::{AppConfig, CameraConfig, LightingConfig, SceneConfig};

/// Name of the generated ground mesh
pub const GROUND_MESH: &str = "ground";

/// Errors raised while building the scene
#[derive(Debug)]
pub enum SetupError {
    /// The physics bridge rejected a body
    Bridge(BridgeError),
    /// The scene graph rejected a node, mesh or attachment
    Scene(SceneError),
    /// `build` was called before a required part was added
    Incomplete(&'static str),
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::Bridge(e) => write!(f, "Physics setup failed: {}", e),
            SetupError::Scene(e) => write!(f, "Scene setup failed: {}", e),
            SetupError::Incomplete(part) => write!(f, "Scene is missing its {}", part),
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetupError::Bridge(e) => Some(e),
            SetupError::Scene(e) => Some(e),
            SetupError::Incomplete(_) => None,
        }
    }
}

impl From<BridgeError> for SetupError {
    fn from(e: BridgeError) -> Self {
        SetupError::Bridge(e)
    }
}

impl From<SceneError> for SetupError {
    fn from(e: SceneError) -> Self {
        SetupError::Scene(e)
    }
}

/// A built scene: the graph, the bridge driving it, and the keys that matter
pub struct DemoScene {
    pub graph: SceneGraph,
    pub bridge: SimulationBridge,
    pub camera_node: NodeKey,
    pub box_node: NodeKey,
    pub box_body: BodyKey,
    pub ground_node: NodeKey,
    pub ground_body: BodyKey,
}

impl DemoScene {
    /// Build the demo scene described by `config`
    pub fn from_config(config: &AppConfig) -> Result<Self, SetupError> {
        let mut scene = SceneBuilder::new(config.physics.to_physics_config())
            .with_physics()
            .add_camera(&config.camera)?
            .add_floor(&config.scene)?
            .add_lights(&config.lighting)?
            .add_box(&config.scene)?
            .build()?;

        if config.debug.show_all_bounds {
            let renderables: Vec<NodeKey> = scene.graph.renderables().map(|(k, _)| k).collect();
            for key in renderables {
                if let Some(node) = scene.graph.node_mut(key) {
                    node.show_bounding_box = true;
                }
            }
        }
        Ok(scene)
    }

    /// Current height of the box node
    pub fn box_height(&self) -> Option<f32> {
        self.graph.node(self.box_node).map(|n| n.position().y)
    }
}

/// Builder for the demo scene
///
/// # Example
/// ```ignore
/// let scene = SceneBuilder::new(PhysicsConfig::default())
///     .with_physics()
///     .add_camera(&config.camera)?
///     .add_floor(&config.scene)?
///     .add_lights(&config.lighting)?
///     .add_box(&config.scene)?
///     .build()?;
/// ```
pub struct SceneBuilder {
    graph: SceneGraph,
    bridge: SimulationBridge,
    camera_node: Option<NodeKey>,
    falling_box: Option<(NodeKey, BodyKey)>,
    ground: Option<(NodeKey, BodyKey)>,
}

impl SceneBuilder {
    /// Create a builder with an empty graph and a bridge that has no world yet
    pub fn new(physics: PhysicsConfig) -> Self {
        Self {
            graph: SceneGraph::new(),
            bridge: SimulationBridge::new(physics),
            camera_node: None,
            falling_box: None,
            ground: None,
        }
    }

    /// Create the dynamics world
    pub fn with_physics(mut self) -> Self {
        self.bridge.initialize();
        self
    }

    /// Add the camera node, aimed at the configured target
    pub fn add_camera(mut self, config: &CameraConfig) -> Result<Self, SetupError> {
        let camera = self
            .graph
            .create_camera("MainCamera")
            .with_fov_y(config.fov.to_radians())
            .with_near_clip(config.near)
            .with_far_clip(config.far)
            .with_auto_aspect_ratio(true);

        let node = self.graph.create_root_child();
        if let Some(n) = self.graph.node_mut(node) {
            n.name = Some("CameraNode".to_string());
            n.set_fixed_yaw_axis(Some(Vec3::Y));
            n.set_position(Vec3::from_array(config.position));
        }
        self.graph.look_at(node, Vec3::from_array(config.look_at))?;
        self.graph.attach_object(node, camera)?;
        self.graph.background = Colour::BLACK;

        self.camera_node = Some(node);
        Ok(self)
    }

    /// Add the ground plane and the static box under it
    ///
    /// The collision box's top face sits flush with the plane at y = 0.
    pub fn add_floor(mut self, config: &SceneConfig) -> Result<Self, SetupError> {
        let spec = PlaneSpec::new(Vec3::Y, config.ground_size, config.ground_size)
            .with_segments(config.ground_segments, config.ground_segments)
            .with_tiling(config.ground_tiling, config.ground_tiling)
            .with_up(Vec3::Z);
        self.graph.meshes_mut().create_plane(GROUND_MESH, spec)?;

        let mut entity = self.graph.create_entity(GROUND_MESH)?;
        entity.cast_shadows = false;
        entity.set_material_name(&config.ground_material, self.graph.materials());

        let node = self.graph.create_root_child();
        if let Some(n) = self.graph.node_mut(node) {
            n.name = Some("GroundNode".to_string());
        }
        self.graph.attach_object(node, entity)?;
        self.graph.update_bounds(node)?;

        let half_size = config.ground_size * 0.5;
        let half_thickness = config.ground_thickness * 0.5;
        let shape = self
            .bridge
            .add_box_shape(Vec3::new(half_size, half_thickness, half_size));
        let body = self.bridge.add_rigid_body(
            RigidBodyDesc::new(shape)
                .with_material(PhysicsMaterial::new(config.friction, config.restitution))
                .with_transform(Transform::from_position(Vec3::new(0.0, -half_thickness, 0.0))),
        )?;

        self.ground = Some((node, body));
        Ok(self)
    }

    /// Add the ambient light, shadow mode and the three scene lights
    pub fn add_lights(mut self, config: &LightingConfig) -> Result<Self, SetupError> {
        self.graph.ambient_light = Colour::from(config.ambient);
        self.graph.shadow_technique = if config.stencil_shadows {
            ShadowTechnique::StencilModulative
        } else {
            ShadowTechnique::None
        };
        info!("Shadow technique: {:?}", self.graph.shadow_technique);

        let spotlight = self
            .graph
            .create_light("SpotLight")
            .with_kind(LightKind::Spotlight {
                inner: config.spotlight_inner.to_radians(),
                outer: config.spotlight_outer.to_radians(),
            })
            .with_diffuse(Colour::from(config.spotlight_colour))
            .with_specular(Colour::from(config.spotlight_colour));
        self.add_light_node(
            spotlight,
            Some(Vec3::from_array(config.spotlight_position)),
            Some(Vec3::from_array(config.spotlight_direction)),
        )?;

        let directional = self
            .graph
            .create_light("DirectionalLight")
            .with_kind(LightKind::Directional)
            .with_diffuse(Colour::from(config.directional_colour))
            .with_specular(Colour::from(config.directional_colour));
        self.add_light_node(
            directional,
            None,
            Some(Vec3::from_array(config.directional_direction)),
        )?;

        let point = self
            .graph
            .create_light("PointLight")
            .with_kind(LightKind::Point)
            .with_diffuse(Colour::from(config.point_colour))
            .with_specular(Colour::from(config.point_colour));
        self.add_light_node(point, Some(Vec3::from_array(config.point_position)), None)?;

        Ok(self)
    }

    fn add_light_node(
        &mut self,
        light: Light,
        position: Option<Vec3>,
        direction: Option<Vec3>,
    ) -> Result<NodeKey, SetupError> {
        let node = self.graph.create_root_child();
        if let Some(n) = self.graph.node_mut(node) {
            n.name = Some(format!("{}Node", light.name));
            if let Some(direction) = direction {
                n.set_direction(direction);
            }
            if let Some(position) = position {
                n.set_position(position);
            }
        }
        self.graph.attach_object(node, light)?;
        Ok(node)
    }

    /// Add the falling box and its dynamic body
    ///
    /// The collision box is sized from the mesh bounds measured before the
    /// node is rotated, so it matches the unrotated mesh.
    pub fn add_box(mut self, config: &SceneConfig) -> Result<Self, SetupError> {
        let entity = self.graph.create_entity(CUBE_MESH)?;

        let node = self.graph.create_root_child();
        if let Some(n) = self.graph.node_mut(node) {
            n.name = Some("BoxNode".to_string());
            n.set_position(Vec3::from_array(config.box_position));
            n.set_scale(Vec3::ONE);
            n.show_bounding_box = config.show_bounding_box;
        }
        self.graph.attach_object(node, entity)?;

        let bounds = self.graph.update_bounds(node)?;

        let orientation = Quat::from_axis_angle(
            Vec3::from_array(config.box_rotation_axis).normalized(),
            config.box_rotation_degrees.to_radians(),
        );
        if let Some(n) = self.graph.node_mut(node) {
            n.set_orientation(orientation);
        }

        let size = bounds.size();
        if bounds.is_null() || size.is_zero() {
            warn!("Bounding volume of the box mesh is empty");
        }
        let half_extents = if bounds.is_null() { Vec3::ZERO } else { size * 0.5 };

        let shape = self.bridge.add_box_shape(half_extents);
        let inertia = self
            .bridge
            .shapes()
            .get(shape)
            .map(|s| s.calculate_local_inertia(config.box_mass))
            .unwrap_or(Vec3::ZERO);
        info!(
            "Box collision shape [{} {} {}]",
            half_extents.x, half_extents.y, half_extents.z
        );
        info!("Local inertia [{} {} {}]", inertia.x, inertia.y, inertia.z);

        let start = Transform::from_position_orientation(
            Vec3::from_array(config.box_position),
            orientation,
        );
        let body = self.bridge.add_rigid_body(
            RigidBodyDesc::new(shape)
                .with_mass(config.box_mass)
                .with_material(PhysicsMaterial::new(config.friction, config.restitution))
                .with_transform(start)
                .with_visual_node(node),
        )?;

        self.graph.update_bounds(node)?;
        self.falling_box = Some((node, body));
        Ok(self)
    }

    /// Finish building
    pub fn build(self) -> Result<DemoScene, SetupError> {
        let camera_node = self.camera_node.ok_or(SetupError::Incomplete("camera"))?;
        let (box_node, box_body) = self.falling_box.ok_or(SetupError::Incomplete("box"))?;
        let (ground_node, ground_body) = self.ground.ok_or(SetupError::Incomplete("floor"))?;

        info!(
            "Scene ready: {} nodes, {} bodies",
            self.graph.node_count(),
            self.bridge.body_count()
        );

        Ok(DemoScene {
            graph: self.graph,
            bridge: self.bridge,
            camera_node,
            box_node,
            box_body,
            ground_node,
            ground_body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tumblebox_scene::MaterialLibrary;

    fn demo() -> DemoScene {
        DemoScene::from_config(&AppConfig::default()).unwrap()
    }

    #[test]
    fn test_demo_scene_builds() {
        let scene = demo();
        // Root, camera, ground, three lights, box
        assert_eq!(scene.graph.node_count(), 7);
        assert_eq!(scene.bridge.body_count(), 2);
        assert_eq!(scene.bridge.shapes().len(), 2);
        assert_eq!(scene.graph.camera_node(), Some(scene.camera_node));
    }

    #[test]
    fn test_box_shape_from_unrotated_bounds() {
        let scene = demo();
        let entry = scene.bridge.body(scene.box_body).unwrap();
        let shape = scene.bridge.shapes().get(entry.shape()).unwrap();
        assert_eq!(shape.half_extents(), Vec3::splat(50.0));
        assert!(entry.is_dynamic());
        assert_eq!(entry.visual_node(), Some(scene.box_node));

        // m/12 * (100^2 + 100^2)
        let expected = 20_000.0 / 12.0;
        assert!((entry.local_inertia().x - expected).abs() < 1e-2);
    }

    #[test]
    fn test_box_starts_rotated() {
        let scene = demo();
        let node = scene.graph.node(scene.box_node).unwrap();
        let expected = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0).normalized(), 60f32.to_radians());
        assert_eq!(node.position(), Vec3::new(0.0, 200.0, 0.0));
        assert!(node.orientation().angle_to(&expected) < 1e-4);
        assert!(node.show_bounding_box);

        let body_pose = scene.bridge.body_transform(scene.box_body).unwrap();
        assert!(body_pose.orientation.angle_to(&expected) < 1e-4);
    }

    #[test]
    fn test_ground_is_static_and_flush() {
        let scene = demo();
        let entry = scene.bridge.body(scene.ground_body).unwrap();
        assert!(!entry.is_dynamic());
        assert_eq!(entry.local_inertia(), Vec3::ZERO);
        assert_eq!(entry.visual_node(), None);

        let shape = scene.bridge.shapes().get(entry.shape()).unwrap();
        assert_eq!(shape.half_extents(), Vec3::new(750.0, 50.0, 750.0));
        let pose = scene.bridge.body_transform(scene.ground_body).unwrap();
        assert_eq!(pose.position.y + shape.half_extents().y, 0.0);

        let ground = scene.graph.node(scene.ground_node).unwrap();
        let entity = ground.entities().next().unwrap();
        assert_eq!(entity.mesh_name(), GROUND_MESH);
        assert_eq!(entity.material_name(), MaterialLibrary::ROCKWALL);
        assert!(!entity.cast_shadows);
    }

    #[test]
    fn test_lights() {
        let scene = demo();
        assert_eq!(scene.graph.ambient_light, Colour::BLACK);
        assert_eq!(scene.graph.shadow_technique, ShadowTechnique::StencilModulative);

        let lights: Vec<_> = scene.graph.lights().collect();
        assert_eq!(lights.len(), 3);

        let (spot_node, spot) = lights
            .iter()
            .find(|(_, l)| l.name == "SpotLight")
            .copied()
            .unwrap();
        assert_eq!(spot.diffuse, Colour::rgb(0.0, 0.0, 1.0));
        let node = scene.graph.node(spot_node).unwrap();
        assert_eq!(node.position(), Vec3::new(200.0, 200.0, 0.0));
        assert!(node.direction().max_abs_diff(Vec3::new(-1.0, -1.0, 0.0).normalized()) < 1e-5);
    }

    #[test]
    fn test_camera_looks_at_origin() {
        let scene = demo();
        let node = scene.graph.node(scene.camera_node).unwrap();
        let to_origin = (Vec3::ZERO - node.position()).normalized();
        assert!(node.direction().max_abs_diff(to_origin) < 1e-4);
        assert_eq!(node.camera().unwrap().near_clip, 5.0);
    }

    #[test]
    fn test_build_without_box_is_incomplete() {
        let result = SceneBuilder::new(PhysicsConfig::default())
            .with_physics()
            .add_camera(&CameraConfig::default())
            .and_then(|b| b.add_floor(&SceneConfig::default()))
            .and_then(|b| b.build());
        assert!(matches!(result, Err(SetupError::Incomplete("box"))));
    }

    #[test]
    fn test_floor_without_physics_fails() {
        let result = SceneBuilder::new(PhysicsConfig::default()).add_floor(&SceneConfig::default());
        assert!(matches!(
            result,
            Err(SetupError::Bridge(BridgeError::WorldNotInitialized))
        ));
    }
}
