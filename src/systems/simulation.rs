//! Simulation system
//!
//! Measures frame time and advances the physics bridge once per frame:
//! - Delta time calculation (capped)
//! - Physics stepping
//! - Scene node synchronization and bounds refresh

use std::time::Instant;
use tumblebox_physics::FrameReport;

use crate::scene::DemoScene;

/// Timing for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameEvent {
    /// Seconds handed to the simulation
    pub time_since_last_frame: f32,
    /// Seconds actually measured, before capping
    pub measured: f32,
}

impl FrameEvent {
    /// Build an event from a measured frame time, capped at `max_frame_time`
    pub fn new(measured: f32, max_frame_time: f32) -> Self {
        let time_since_last_frame = if measured.is_finite() {
            measured.clamp(0.0, max_frame_time.max(0.0))
        } else {
            0.0
        };
        Self {
            time_since_last_frame,
            measured,
        }
    }

    /// True if the measured time was cut down
    pub fn was_capped(&self) -> bool {
        self.measured > self.time_since_last_frame
    }
}

/// Drives the simulation from wall-clock time
pub struct SimulationSystem {
    last_frame: Instant,
    max_frame_time: f32,
    frames: u64,
}

impl SimulationSystem {
    /// Create a new simulation system
    ///
    /// Frames longer than `max_frame_time` seconds (first frame, window drag,
    /// debugger pause) are cut down to it before stepping.
    pub fn new(max_frame_time: f32) -> Self {
        Self {
            last_frame: Instant::now(),
            max_frame_time,
            frames: 0,
        }
    }

    /// Measure the time since the previous frame
    pub fn begin_frame(&mut self) -> FrameEvent {
        let now = Instant::now();
        let measured = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        FrameEvent::new(measured, self.max_frame_time)
    }

    /// Run one simulation frame using wall-clock time
    pub fn update(&mut self, scene: &mut DemoScene) -> FrameReport {
        let event = self.begin_frame();
        self.step(event, scene)
    }

    /// Run one simulation frame for a given event
    pub fn step(&mut self, event: FrameEvent, scene: &mut DemoScene) -> FrameReport {
        if event.was_capped() {
            log::debug!(
                "Frame took {:.3}s, simulating {:.3}s",
                event.measured,
                event.time_since_last_frame
            );
        }

        let report = scene
            .bridge
            .frame(event.time_since_last_frame, &mut scene.graph);
        scene.graph.update_all_bounds();
        self.frames += 1;

        log::trace!(
            "Frame {}: {} step(s), {} node(s) synced",
            self.frames,
            report.steps,
            report.nodes_synced
        );
        report
    }

    /// Frames simulated so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn max_frame_time(&self) -> f32 {
        self.max_frame_time
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new(0.25)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_frame_event_capped() {
        let event = FrameEvent::new(1.5, 0.25);
        assert_eq!(event.time_since_last_frame, 0.25);
        assert!(event.was_capped());

        let event = FrameEvent::new(0.016, 0.25);
        assert_eq!(event.time_since_last_frame, 0.016);
        assert!(!event.was_capped());
    }

    #[test]
    fn test_frame_event_rejects_bad_time() {
        assert_eq!(FrameEvent::new(-1.0, 0.25).time_since_last_frame, 0.0);
        assert_eq!(FrameEvent::new(f32::NAN, 0.25).time_since_last_frame, 0.0);
    }

    #[test]
    fn test_begin_frame_measures_elapsed() {
        let mut sim = SimulationSystem::new(10.0);
        std::thread::sleep(std::time::Duration::from_millis(20));
        let event = sim.begin_frame();
        assert!(event.measured >= 0.02);
        assert!(!event.was_capped());
    }

    #[test]
    fn test_step_moves_box() {
        let mut scene = DemoScene::from_config(&AppConfig::default()).unwrap();
        let mut sim = SimulationSystem::default();

        let start = scene.box_height().unwrap();
        let report = sim.step(FrameEvent::new(0.11, 0.25), &mut scene);
        assert_eq!(report.steps, 6);
        assert_eq!(report.nodes_synced, 1);
        assert!(scene.box_height().unwrap() < start);
        assert_eq!(sim.frame_count(), 1);
    }

    #[test]
    fn test_default_construction() {
        let sim = SimulationSystem::default();
        assert_eq!(sim.max_frame_time(), 0.25);
        assert!(sim.last_frame.elapsed().as_millis() < 100);
    }
}
