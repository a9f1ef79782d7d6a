//! Integration tests for the simulation bridge
//!
//! These drive the bridge the way the application does:
//! 1. Ground and box registered against a live world
//! 2. Frames stepped at a steady rate
//! 3. Poses pushed onto scene nodes
//! 4. Everything released at teardown

use tumblebox_math::{Quat, Transform, Vec3};
use tumblebox_physics::{
    BodyKey, PhysicsConfig, PhysicsMaterial, RigidBodyDesc, SimulationBridge, TeardownReport,
};
use tumblebox_scene::SceneGraph;

const DT: f32 = 1.0 / 60.0;

/// Static ground whose top face is at y = 0
fn add_ground(bridge: &mut SimulationBridge) -> BodyKey {
    let shape = bridge.add_box_shape(Vec3::new(750.0, 50.0, 750.0));
    bridge
        .add_rigid_body(
            RigidBodyDesc::new(shape)
                .with_material(PhysicsMaterial::default())
                .with_transform(Transform::from_position(Vec3::new(0.0, -50.0, 0.0))),
        )
        .expect("ground body")
}

// ==================== Resting Contact ====================

#[test]
fn test_box_settles_on_ground() {
    let mut bridge = SimulationBridge::init(PhysicsConfig::default());
    add_ground(&mut bridge);

    let shape = bridge.add_box_shape(Vec3::ONE);
    let cube = bridge
        .add_rigid_body(
            RigidBodyDesc::new(shape)
                .with_mass(1.0)
                .with_transform(Transform::from_position(Vec3::new(0.0, 3.0, 0.0))),
        )
        .unwrap();

    let mut previous = 0.0;
    for _ in 0..300 {
        bridge.step_simulation(DT);
        previous = bridge.display_transform(cube).unwrap().position.y;
    }
    bridge.step_simulation(DT);
    let y = bridge.display_transform(cube).unwrap().position.y;

    assert!((y - 1.0).abs() < 0.05, "box should rest on the ground, y = {}", y);
    assert!((y - previous).abs() < 1e-3, "box should have stopped moving");
}

#[test]
fn test_ground_stays_put_under_load() {
    let mut bridge = SimulationBridge::init(PhysicsConfig::default());
    let ground = add_ground(&mut bridge);

    let shape = bridge.add_box_shape(Vec3::splat(50.0));
    bridge
        .add_rigid_body(
            RigidBodyDesc::new(shape)
                .with_mass(1.0)
                .with_transform(Transform::from_position(Vec3::new(0.0, 200.0, 0.0))),
        )
        .unwrap();

    for _ in 0..240 {
        bridge.step_simulation(DT);
    }
    let pose = bridge.body_transform(ground).unwrap();
    assert_eq!(pose.position, Vec3::new(0.0, -50.0, 0.0));
    assert_eq!(pose.orientation, Quat::IDENTITY);
}

// ==================== Scene Sync ====================

#[test]
fn test_linked_node_follows_body() {
    let mut graph = SceneGraph::new();
    let linked = graph.create_root_child();
    let unlinked = graph.create_root_child();

    let mut bridge = SimulationBridge::init(PhysicsConfig::default());
    let shape = bridge.add_box_shape(Vec3::ONE);
    let start = Transform::from_position(Vec3::new(0.0, 50.0, 0.0));

    let key = bridge
        .add_rigid_body(
            RigidBodyDesc::new(shape)
                .with_mass(1.0)
                .with_transform(start)
                .with_visual_node(linked),
        )
        .unwrap();
    // Simulated but never shown
    bridge
        .add_rigid_body(RigidBodyDesc::new(shape).with_mass(1.0).with_transform(start))
        .unwrap();

    for _ in 0..10 {
        let report = bridge.frame(DT, &mut graph);
        assert_eq!(report.nodes_synced, 1);

        let shown = bridge.display_transform(key).unwrap();
        let node = graph.node(linked).unwrap();
        assert_eq!(node.position(), shown.position);
        assert_eq!(node.orientation(), shown.orientation.normalize());
    }

    assert!(graph.node(linked).unwrap().position().y < 50.0);
    assert_eq!(graph.node(unlinked).unwrap().position(), Vec3::ZERO);
}

#[test]
fn test_zero_dt_frame_leaves_nodes_alone() {
    let mut graph = SceneGraph::new();
    let node = graph.create_root_child();

    let mut bridge = SimulationBridge::init(PhysicsConfig::default());
    let shape = bridge.add_box_shape(Vec3::ONE);
    let start = Transform::from_position_orientation(
        Vec3::new(0.0, 200.0, 0.0),
        Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), std::f32::consts::FRAC_PI_3),
    );
    bridge
        .add_rigid_body(
            RigidBodyDesc::new(shape)
                .with_mass(1.0)
                .with_transform(start)
                .with_visual_node(node),
        )
        .unwrap();

    let report = bridge.frame(0.0, &mut graph);
    assert_eq!(report.steps, 0);

    let n = graph.node(node).unwrap();
    assert!(n.position().max_abs_diff(start.position) < 1e-5);
    assert!(n.orientation().angle_to(&start.orientation) < 1e-3);
}

// ==================== Teardown ====================

#[test]
fn test_teardown_after_simulation() {
    let mut graph = SceneGraph::new();
    let node = graph.create_root_child();

    let mut bridge = SimulationBridge::init(PhysicsConfig::default());
    add_ground(&mut bridge);
    let shape = bridge.add_box_shape(Vec3::splat(50.0));
    bridge
        .add_rigid_body(
            RigidBodyDesc::new(shape)
                .with_mass(1.0)
                .with_motion_state(false)
                .with_transform(Transform::from_position(Vec3::new(0.0, 200.0, 0.0)))
                .with_visual_node(node),
        )
        .unwrap();

    for _ in 0..30 {
        bridge.frame(DT, &mut graph);
    }

    let report = bridge.teardown();
    assert_eq!(
        report,
        TeardownReport {
            bodies: 2,
            motion_states: 1,
            shapes: 2,
            shapes_still_referenced: 0,
        }
    );

    // Node survives the bridge; it just stops moving
    let before = graph.node(node).unwrap().position();
    assert_eq!(bridge.frame(DT, &mut graph).nodes_synced, 0);
    assert_eq!(graph.node(node).unwrap().position(), before);
}
