//! The simulation bridge: dynamics world ownership, stepping and teardown

use log::{debug, info, trace, warn};
use rapier3d::prelude::*;
use slotmap::SlotMap;
use tumblebox_math::{Transform, Vec3};
use tumblebox_scene::SceneGraph;

use crate::body::{BodyKey, BodyType, RigidBodyDesc, RigidBodyEntry};
use crate::convert::{from_isometry, from_vector, to_isometry, to_vector};
use crate::{BridgeError, CollisionShapes, MotionState, ShapeKey};

/// Configuration for the physics simulation
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsConfig {
    /// Gravity acceleration
    pub gravity: Vec3,
    /// Most fixed steps taken per frame; 0 switches to one variable step
    pub max_sub_steps: usize,
    /// Length of one fixed step in seconds
    pub fixed_time_step: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -10.0, 0.0),
            max_sub_steps: 10,
            fixed_time_step: 1.0 / 60.0,
        }
    }
}

impl PhysicsConfig {
    /// Create a new physics config with the given gravity
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity,
            ..Default::default()
        }
    }

    pub fn with_max_sub_steps(mut self, max_sub_steps: usize) -> Self {
        self.max_sub_steps = max_sub_steps;
        self
    }

    pub fn with_fixed_time_step(mut self, fixed_time_step: f32) -> Self {
        self.fixed_time_step = fixed_time_step;
        self
    }
}

/// Outcome of one [`SimulationBridge::frame`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Fixed (or variable) steps taken
    pub steps: usize,
    /// Scene nodes that received a pose
    pub nodes_synced: usize,
}

/// What a teardown released
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TeardownReport {
    pub bodies: usize,
    pub motion_states: usize,
    pub shapes: usize,
    /// Shapes that were still referenced elsewhere when released
    pub shapes_still_referenced: usize,
}

impl TeardownReport {
    /// True if nothing was released
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Constraint solver: the pipeline plus continuous collision detection
struct Solver {
    pipeline: PhysicsPipeline,
    ccd: CCDSolver,
}

/// Body, collider and joint storage plus island bookkeeping
struct WorldSets {
    islands: IslandManager,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    query_pipeline: QueryPipeline,
}

/// The dynamics world and the pieces it is built from
struct DynamicsWorld {
    configuration: IntegrationParameters,
    dispatcher: NarrowPhase,
    broadphase: DefaultBroadPhase,
    solver: Solver,
    sets: WorldSets,
    gravity: Vector<Real>,
}

impl DynamicsWorld {
    /// Build in dependency order: configuration, dispatcher, broadphase,
    /// solver, world
    fn new(config: &PhysicsConfig) -> Self {
        let mut configuration = IntegrationParameters::default();
        configuration.dt = config.fixed_time_step;
        let dispatcher = NarrowPhase::new();
        let broadphase = DefaultBroadPhase::new();
        let solver = Solver {
            pipeline: PhysicsPipeline::new(),
            ccd: CCDSolver::new(),
        };
        let sets = WorldSets {
            islands: IslandManager::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            query_pipeline: QueryPipeline::new(),
        };
        Self {
            configuration,
            dispatcher,
            broadphase,
            solver,
            sets,
            gravity: to_vector(config.gravity),
        }
    }

    /// Advance by `dt` seconds in one step
    fn step(&mut self, dt: f32) {
        self.configuration.dt = dt;
        self.solver.pipeline.step(
            &self.gravity,
            &self.configuration,
            &mut self.sets.islands,
            &mut self.broadphase,
            &mut self.dispatcher,
            &mut self.sets.bodies,
            &mut self.sets.colliders,
            &mut self.sets.impulse_joints,
            &mut self.sets.multibody_joints,
            &mut self.solver.ccd,
            Some(&mut self.sets.query_pipeline),
            &(),
            &(),
        );
    }

    fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.sets.bodies.remove(
            handle,
            &mut self.sets.islands,
            &mut self.sets.colliders,
            &mut self.sets.impulse_joints,
            &mut self.sets.multibody_joints,
            true,
        );
    }

    /// Drop in reverse construction order
    fn dismantle(self) {
        let DynamicsWorld {
            configuration: _configuration,
            dispatcher,
            broadphase,
            solver,
            sets,
            ..
        } = self;
        drop(sets);
        trace!("Dropped dynamics world");
        drop(solver);
        trace!("Dropped solver");
        drop(broadphase);
        trace!("Dropped broadphase");
        drop(dispatcher);
        trace!("Dropped dispatcher, releasing collision configuration");
    }
}

/// Owns the dynamics world, its shapes and bodies, and drives scene nodes
///
/// Lifecycle: [`init`](Self::init) once, then register shapes and bodies,
/// then call [`frame`](Self::frame) every frame. [`teardown`](Self::teardown)
/// releases everything in reverse order; dropping the bridge does the same.
pub struct SimulationBridge {
    config: PhysicsConfig,
    world: Option<DynamicsWorld>,
    shapes: CollisionShapes,
    bodies: SlotMap<BodyKey, RigidBodyEntry>,
    /// Registration order
    order: Vec<BodyKey>,
    /// Time accumulated toward the next fixed step
    local_time: f32,
}

impl SimulationBridge {
    /// Bridge without a dynamics world
    ///
    /// Stepping it is a no-op and registering bodies fails until a world
    /// exists. A fixed step that is not a positive finite length would
    /// never drain the accumulator, so it falls back to the default.
    pub fn new(mut config: PhysicsConfig) -> Self {
        let fixed = config.fixed_time_step;
        if !fixed.is_finite() || fixed <= 0.0 {
            config.fixed_time_step = PhysicsConfig::default().fixed_time_step;
            warn!(
                "Fixed time step {} is not a positive length, using {:.4}s",
                fixed, config.fixed_time_step
            );
        }
        Self {
            config,
            world: None,
            shapes: CollisionShapes::new(),
            bodies: SlotMap::with_key(),
            order: Vec::new(),
            local_time: 0.0,
        }
    }

    /// Bridge with a freshly built dynamics world
    pub fn init(config: PhysicsConfig) -> Self {
        let mut bridge = Self::new(config);
        bridge.initialize();
        bridge
    }

    /// Build the dynamics world if there is none
    pub fn initialize(&mut self) {
        if self.world.is_some() {
            return;
        }
        self.world = Some(DynamicsWorld::new(&self.config));
        self.local_time = 0.0;
        info!(
            "Dynamics world ready: gravity {:?}, max {} sub-steps of {:.4}s",
            self.config.gravity, self.config.max_sub_steps, self.config.fixed_time_step
        );
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.world.is_some()
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Time carried over toward the next fixed step
    pub fn local_time(&self) -> f32 {
        self.local_time
    }

    /// Register a box collision shape
    pub fn add_box_shape(&mut self, half_extents: Vec3) -> ShapeKey {
        self.shapes.add_box(half_extents)
    }

    pub fn shapes(&self) -> &CollisionShapes {
        &self.shapes
    }

    /// Create a rigid body with its collider and optional motion state
    pub fn add_rigid_body(&mut self, desc: RigidBodyDesc) -> Result<BodyKey, BridgeError> {
        let world = self.world.as_mut().ok_or(BridgeError::WorldNotInitialized)?;
        let shape = self
            .shapes
            .get(desc.shape)
            .ok_or(BridgeError::UnknownShape(desc.shape))?;
        if !desc.mass.is_finite() || desc.mass < 0.0 {
            return Err(BridgeError::InvalidMass(desc.mass));
        }

        let body_type = BodyType::from_mass(desc.mass);
        let local_inertia = shape.calculate_local_inertia(desc.mass);
        let position = to_isometry(&desc.start_transform);

        let builder = match body_type {
            BodyType::Static => RigidBodyBuilder::fixed(),
            BodyType::Dynamic => RigidBodyBuilder::dynamic().additional_mass_properties(
                MassProperties::new(Point::origin(), desc.mass, to_vector(local_inertia)),
            ),
        };
        let handle = world.sets.bodies.insert(builder.position(position).build());

        // Mass comes from the body, not the collider
        let collider = desc
            .material
            .apply(ColliderBuilder::new(shape.shape.clone()).density(0.0))
            .build();
        world
            .sets
            .colliders
            .insert_with_parent(collider, handle, &mut world.sets.bodies);

        let entry = RigidBodyEntry {
            handle,
            shape: desc.shape,
            mass: desc.mass,
            local_inertia,
            motion_state: desc
                .motion_state
                .then(|| MotionState::new(desc.start_transform)),
            visual_node: desc.visual_node,
            material: desc.material,
        };
        let key = self.bodies.insert(entry);
        self.order.push(key);

        debug!(
            "Added {:?} body {:?}: mass {}, inertia {:?}",
            body_type, key, desc.mass, local_inertia
        );
        Ok(key)
    }

    pub fn body(&self, key: BodyKey) -> Option<&RigidBodyEntry> {
        self.bodies.get(key)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Body keys in registration order
    pub fn body_keys(&self) -> &[BodyKey] {
        &self.order
    }

    /// Simulated pose of a body, without interpolation
    pub fn body_transform(&self, key: BodyKey) -> Option<Transform> {
        let world = self.world.as_ref()?;
        let entry = self.bodies.get(key)?;
        world.sets.bodies.get(entry.handle).map(|rb| from_isometry(rb.position()))
    }

    /// Pose to display: the motion state if there is one, else the simulated pose
    pub fn display_transform(&self, key: BodyKey) -> Option<Transform> {
        let entry = self.bodies.get(key)?;
        match entry.motion_state {
            Some(ms) => Some(ms.world_transform()),
            None => self.body_transform(key),
        }
    }

    pub fn linear_velocity(&self, key: BodyKey) -> Option<Vec3> {
        let world = self.world.as_ref()?;
        let entry = self.bodies.get(key)?;
        world.sets.bodies.get(entry.handle).map(|rb| from_vector(rb.linvel()))
    }

    /// Advance the simulation by `dt` seconds
    ///
    /// Time accumulates and is consumed in fixed steps, at most
    /// `max_sub_steps` of them; leftover whole steps beyond the cap are
    /// dropped. Returns the number of steps taken. An uninitialized bridge
    /// takes no steps.
    pub fn step_simulation(&mut self, dt: f32) -> usize {
        let Some(world) = self.world.as_mut() else {
            trace!("Step skipped: dynamics world not initialized");
            return 0;
        };
        if !dt.is_finite() || dt < 0.0 {
            warn!("Ignoring invalid time step {}", dt);
            return 0;
        }

        let fixed = self.config.fixed_time_step;
        let max_sub_steps = self.config.max_sub_steps;

        let steps = if max_sub_steps > 0 {
            self.local_time += dt;
            let mut due = 0;
            if self.local_time >= fixed {
                due = (self.local_time / fixed) as usize;
                self.local_time = (self.local_time - due as f32 * fixed).max(0.0);
            }
            let clamped = due.min(max_sub_steps);
            if due > clamped {
                debug!("Dropping {} sub-steps over the cap", due - clamped);
            }
            for _ in 0..clamped {
                world.step(fixed);
            }
            clamped
        } else {
            self.local_time = 0.0;
            if dt > 0.0 {
                world.step(dt);
                1
            } else {
                0
            }
        };

        self.synchronize_motion_states();
        trace!("Stepped {} time(s), {:.4}s carried", steps, self.local_time);
        steps
    }

    /// Extrapolate each moving body's last pose by the carried time
    fn synchronize_motion_states(&mut self) {
        let Some(world) = self.world.as_ref() else {
            return;
        };
        let carried = self.local_time;

        for entry in self.bodies.values_mut() {
            if !entry.is_dynamic() {
                continue;
            }
            let Some(motion_state) = entry.motion_state.as_mut() else {
                continue;
            };
            let Some(rb) = world.sets.bodies.get(entry.handle) else {
                continue;
            };
            let pose = from_isometry(rb.position());
            motion_state.set_world_transform(pose.integrate(
                from_vector(rb.linvel()),
                from_vector(rb.angvel()),
                carried,
            ));
        }
    }

    /// Write each body's display pose onto its scene node
    ///
    /// Bodies without a node, or whose node no longer exists, are skipped.
    /// Returns how many nodes were updated.
    pub fn sync_visuals(&self, graph: &mut SceneGraph) -> usize {
        let mut synced = 0;
        for &key in self.order.iter().rev() {
            let Some(node_key) = self.bodies.get(key).and_then(|e| e.visual_node) else {
                continue;
            };
            let Some(transform) = self.display_transform(key) else {
                continue;
            };
            match graph.node_mut(node_key) {
                Some(node) => {
                    node.set_position(transform.position);
                    node.set_orientation(transform.orientation);
                    synced += 1;
                }
                None => trace!("Body {:?} points at a removed node", key),
            }
        }
        synced
    }

    /// Step by `dt` and push the results to the scene graph
    pub fn frame(&mut self, dt: f32, graph: &mut SceneGraph) -> FrameReport {
        let steps = self.step_simulation(dt);
        let nodes_synced = self.sync_visuals(graph);
        FrameReport {
            steps,
            nodes_synced,
        }
    }

    /// Release everything: bodies and motion states newest first, then
    /// shapes, then the world and the pieces it was built from
    ///
    /// Safe to call more than once; later calls release nothing.
    pub fn teardown(&mut self) -> TeardownReport {
        let mut report = TeardownReport::default();

        while let Some(key) = self.order.pop() {
            let Some(entry) = self.bodies.remove(key) else {
                continue;
            };
            if let Some(world) = self.world.as_mut() {
                world.remove_body(entry.handle);
            }
            if entry.motion_state.is_some() {
                report.motion_states += 1;
            }
            report.bodies += 1;
        }
        self.bodies.clear();

        let (shapes, still_referenced) = self.shapes.release_all();
        report.shapes = shapes;
        report.shapes_still_referenced = still_referenced;

        if let Some(world) = self.world.take() {
            world.dismantle();
        }
        self.local_time = 0.0;

        if !report.is_empty() {
            info!(
                "Released {} bodies, {} motion states, {} shapes",
                report.bodies, report.motion_states, report.shapes
            );
        }
        report
    }
}

impl Drop for SimulationBridge {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tumblebox_math::Quat;

    const DT: f32 = 1.0 / 60.0;

    fn bridge() -> SimulationBridge {
        SimulationBridge::init(PhysicsConfig::default())
    }

    fn falling_box(bridge: &mut SimulationBridge, y: f32) -> BodyKey {
        let shape = bridge.add_box_shape(Vec3::ONE);
        bridge
            .add_rigid_body(
                RigidBodyDesc::new(shape)
                    .with_mass(1.0)
                    .with_transform(Transform::from_position(Vec3::new(0.0, y, 0.0))),
            )
            .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = PhysicsConfig::default();
        assert_eq!(config.gravity, Vec3::new(0.0, -10.0, 0.0));
        assert_eq!(config.max_sub_steps, 10);
        assert!((config.fixed_time_step - DT).abs() < 1e-9);
    }

    #[test]
    fn test_uninitialized_bridge() {
        let mut bridge = SimulationBridge::new(PhysicsConfig::default());
        let shape = bridge.add_box_shape(Vec3::ONE);
        assert_eq!(
            bridge.add_rigid_body(RigidBodyDesc::new(shape)).unwrap_err(),
            BridgeError::WorldNotInitialized
        );
        assert_eq!(bridge.step_simulation(DT), 0);
    }

    #[test]
    fn test_unknown_shape() {
        let mut bridge = bridge();
        let err = bridge
            .add_rigid_body(RigidBodyDesc::new(ShapeKey::default()))
            .unwrap_err();
        assert_eq!(err, BridgeError::UnknownShape(ShapeKey::default()));
    }

    #[test]
    fn test_invalid_mass() {
        let mut bridge = bridge();
        let shape = bridge.add_box_shape(Vec3::ONE);
        for mass in [-1.0, f32::NAN, f32::INFINITY] {
            let err = bridge
                .add_rigid_body(RigidBodyDesc::new(shape).with_mass(mass))
                .unwrap_err();
            assert!(matches!(err, BridgeError::InvalidMass(_)));
        }
        assert_eq!(bridge.body_count(), 0);
    }

    #[test]
    fn test_dynamic_body_has_inertia() {
        let mut bridge = bridge();
        let key = falling_box(&mut bridge, 5.0);
        let entry = bridge.body(key).unwrap();
        assert!(entry.is_dynamic());
        assert!(entry.local_inertia().x > 0.0);
        assert!(entry.local_inertia().y > 0.0);
        assert!(entry.local_inertia().z > 0.0);
    }

    #[test]
    fn test_static_body_never_moves() {
        let mut bridge = bridge();
        let shape = bridge.add_box_shape(Vec3::ONE);
        let start = Vec3::new(0.0, 5.0, 0.0);
        let key = bridge
            .add_rigid_body(RigidBodyDesc::new(shape).with_transform(Transform::from_position(start)))
            .unwrap();
        assert_eq!(bridge.body(key).unwrap().local_inertia(), Vec3::ZERO);

        for _ in 0..60 {
            bridge.step_simulation(DT);
        }
        assert_eq!(bridge.body_transform(key).unwrap().position, start);
    }

    #[test]
    fn test_zero_dt_changes_nothing() {
        let mut bridge = bridge();
        let key = falling_box(&mut bridge, 5.0);
        let before = bridge.display_transform(key).unwrap();

        assert_eq!(bridge.step_simulation(0.0), 0);
        let after = bridge.display_transform(key).unwrap();
        assert!(after.position.max_abs_diff(before.position) < 1e-6);
        assert!(after.orientation.angle_to(&before.orientation) < 1e-3);
    }

    #[test]
    fn test_falls_every_frame_without_ground() {
        let mut bridge = bridge();
        let key = falling_box(&mut bridge, 100.0);

        let mut last_y = bridge.display_transform(key).unwrap().position.y;
        for _ in 0..30 {
            assert_eq!(bridge.step_simulation(DT), 1);
            let y = bridge.display_transform(key).unwrap().position.y;
            assert!(y < last_y, "expected {} < {}", y, last_y);
            last_y = y;
        }
        assert!(bridge.linear_velocity(key).unwrap().y < 0.0);
    }

    #[test]
    fn test_sub_step_accounting() {
        let mut bridge = bridge();
        falling_box(&mut bridge, 100.0);

        // Half a step: nothing runs, time carries
        assert_eq!(bridge.step_simulation(DT * 0.5), 0);
        assert!((bridge.local_time() - DT * 0.5).abs() < 1e-6);

        // Completes the step
        assert_eq!(bridge.step_simulation(DT * 0.75), 1);
        assert!((bridge.local_time() - DT * 0.25).abs() < 1e-5);

        // A long frame is capped
        assert_eq!(bridge.step_simulation(1.0), 10);
        assert!(bridge.local_time() < DT);
    }

    #[test]
    fn test_variable_step_when_cap_is_zero() {
        let mut bridge = SimulationBridge::init(PhysicsConfig::default().with_max_sub_steps(0));
        let key = falling_box(&mut bridge, 100.0);

        assert_eq!(bridge.step_simulation(0.1), 1);
        assert_eq!(bridge.local_time(), 0.0);
        assert!(bridge.display_transform(key).unwrap().position.y < 100.0);
    }

    fn assert_keeps_falling(fixed_time_step: f32) {
        let mut bridge =
            SimulationBridge::init(PhysicsConfig::default().with_fixed_time_step(fixed_time_step));
        assert_eq!(bridge.config().fixed_time_step, DT);
        let key = falling_box(&mut bridge, 100.0);

        let mut steps = 0;
        for _ in 0..60 {
            steps += bridge.step_simulation(DT);
            assert!(bridge.local_time() < DT);
        }
        assert!(steps >= 59, "took {} steps", steps);
        assert!(bridge.display_transform(key).unwrap().position.y < 96.0);
    }

    #[test]
    fn test_zero_fixed_step_falls_back() {
        assert_keeps_falling(0.0);
    }

    #[test]
    fn test_negative_fixed_step_falls_back() {
        assert_keeps_falling(-0.01);
    }

    #[test]
    fn test_nan_fixed_step_falls_back() {
        assert_keeps_falling(f32::NAN);
    }

    #[test]
    fn test_motion_state_extrapolates_carried_time() {
        let mut bridge = bridge();
        let key = falling_box(&mut bridge, 100.0);
        bridge.step_simulation(DT * 1.5);

        let simulated = bridge.body_transform(key).unwrap().position.y;
        let shown = bridge.display_transform(key).unwrap().position.y;
        // Half a step ahead of the simulated pose, still falling
        assert!(shown < simulated);
    }

    #[test]
    fn test_body_without_motion_state_uses_raw_pose() {
        let mut bridge = bridge();
        let shape = bridge.add_box_shape(Vec3::ONE);
        let key = bridge
            .add_rigid_body(
                RigidBodyDesc::new(shape)
                    .with_mass(1.0)
                    .with_motion_state(false)
                    .with_transform(Transform::from_position(Vec3::new(0.0, 10.0, 0.0))),
            )
            .unwrap();
        bridge.step_simulation(DT * 1.5);
        assert!(bridge.body(key).unwrap().motion_state().is_none());
        assert_eq!(bridge.display_transform(key), bridge.body_transform(key));
    }

    #[test]
    fn test_sync_writes_pose_to_node() {
        let mut graph = SceneGraph::new();
        let node = graph.create_root_child();

        let mut bridge = bridge();
        let shape = bridge.add_box_shape(Vec3::ONE);
        let start = Transform::from_position_orientation(
            Vec3::new(0.0, 200.0, 0.0),
            Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 1.0),
        );
        let key = bridge
            .add_rigid_body(
                RigidBodyDesc::new(shape)
                    .with_mass(1.0)
                    .with_transform(start)
                    .with_visual_node(node),
            )
            .unwrap();

        let report = bridge.frame(DT, &mut graph);
        assert_eq!(report, FrameReport { steps: 1, nodes_synced: 1 });

        let shown = bridge.display_transform(key).unwrap();
        let n = graph.node(node).unwrap();
        // The node holds exactly what the bridge displays
        assert_eq!(n.position(), shown.position);
        assert_eq!(n.orientation(), shown.orientation.normalize());
        assert!(n.position().y < 200.0);
    }

    #[test]
    fn test_sync_skips_removed_node() {
        let mut graph = SceneGraph::new();
        let node = graph.create_root_child();

        let mut bridge = bridge();
        let shape = bridge.add_box_shape(Vec3::ONE);
        bridge
            .add_rigid_body(RigidBodyDesc::new(shape).with_mass(1.0).with_visual_node(node))
            .unwrap();
        graph.remove_node(node).unwrap();

        assert_eq!(bridge.frame(DT, &mut graph).nodes_synced, 0);
    }

    #[test]
    fn test_teardown_releases_once() {
        let mut bridge = bridge();
        let ground = bridge.add_box_shape(Vec3::new(750.0, 50.0, 750.0));
        bridge
            .add_rigid_body(
                RigidBodyDesc::new(ground)
                    .with_transform(Transform::from_position(Vec3::new(0.0, -50.0, 0.0))),
            )
            .unwrap();
        falling_box(&mut bridge, 3.0);
        bridge.step_simulation(DT);

        let report = bridge.teardown();
        assert_eq!(
            report,
            TeardownReport {
                bodies: 2,
                motion_states: 2,
                shapes: 2,
                shapes_still_referenced: 0,
            }
        );
        assert!(!bridge.is_initialized());
        assert_eq!(bridge.body_count(), 0);
        assert!(bridge.shapes().is_empty());

        assert!(bridge.teardown().is_empty());
        assert_eq!(bridge.step_simulation(DT), 0);
    }
}
