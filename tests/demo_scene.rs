//! Integration tests for the demo scene
//!
//! These run the scene the way the frame loop does, minus the window:
//! 1. Build the scene from the default config
//! 2. Feed it fixed frame events
//! 3. Tear the bridge down

use tumblebox::config::AppConfig;
use tumblebox::scene::DemoScene;
use tumblebox::systems::{FrameEvent, SimulationSystem};
use tumblebox_physics::TeardownReport;

const DT: f32 = 1.0 / 60.0;

fn setup() -> (DemoScene, SimulationSystem) {
    let config = AppConfig::default();
    let scene = DemoScene::from_config(&config).unwrap();
    let sim = SimulationSystem::new(config.physics.max_frame_time);
    (scene, sim)
}

#[test]
fn test_box_falls_and_lands_on_ground() {
    let (mut scene, mut sim) = setup();

    let mut lowest = f32::MAX;
    for _ in 0..900 {
        let report = sim.step(FrameEvent::new(DT, 0.25), &mut scene);
        assert_eq!(report.nodes_synced, 1);
        lowest = lowest.min(scene.box_height().unwrap());
    }

    let y = scene.box_height().unwrap();
    // Half the cube's edge is 50; resting on a face puts the centre there
    assert!(lowest > 0.0, "box sank through the ground, lowest y = {}", lowest);
    assert!(y > 45.0 && y < 60.0, "box should rest on the ground, y = {}", y);
}

#[test]
fn test_ground_never_moves() {
    let (mut scene, mut sim) = setup();
    let start = scene.bridge.body_transform(scene.ground_body).unwrap();

    for _ in 0..120 {
        sim.step(FrameEvent::new(DT, 0.25), &mut scene);
    }

    assert_eq!(scene.bridge.body_transform(scene.ground_body).unwrap(), start);
    let ground = scene.graph.node(scene.ground_node).unwrap();
    assert_eq!(ground.position(), tumblebox_math::Vec3::ZERO);
}

#[test]
fn test_box_height_drops_every_frame_while_falling() {
    let (mut scene, mut sim) = setup();

    let mut previous = scene.box_height().unwrap();
    for _ in 0..60 {
        sim.step(FrameEvent::new(DT, 0.25), &mut scene);
        let y = scene.box_height().unwrap();
        assert!(y < previous, "box should keep falling: {} -> {}", previous, y);
        previous = y;
    }
}

#[test]
fn test_long_frame_is_capped() {
    let (mut scene, mut sim) = setup();

    // A five second stall is clamped to a quarter second, which is still
    // more whole steps than the sub-step cap; the excess is dropped
    let report = sim.step(FrameEvent::new(5.0, 0.25), &mut scene);
    assert_eq!(report.steps, 10);
    assert!(scene.bridge.local_time() < scene.bridge.config().fixed_time_step);
}

#[test]
fn test_bounds_follow_box() {
    let (mut scene, mut sim) = setup();
    let before = scene.graph.world_aabb(scene.box_node).unwrap();

    for _ in 0..30 {
        sim.step(FrameEvent::new(DT, 0.25), &mut scene);
    }

    let after = scene.graph.world_aabb(scene.box_node).unwrap();
    assert!(after.center().y < before.center().y);
    let node = scene.graph.node(scene.box_node).unwrap();
    assert!(after.center().max_abs_diff(node.position()) < 1e-3);
}

#[test]
fn test_teardown_releases_everything_once() {
    let (mut scene, mut sim) = setup();
    for _ in 0..10 {
        sim.step(FrameEvent::new(DT, 0.25), &mut scene);
    }

    let report = scene.bridge.teardown();
    assert_eq!(
        report,
        TeardownReport {
            bodies: 2,
            motion_states: 2,
            shapes: 2,
            shapes_still_referenced: 0,
        }
    );
    assert!(scene.bridge.teardown().is_empty());

    // The graph outlives the bridge; the box just stops moving
    let y = scene.box_height().unwrap();
    let report = sim.step(FrameEvent::new(DT, 0.25), &mut scene);
    assert_eq!(report.steps, 0);
    assert_eq!(scene.box_height().unwrap(), y);
}
