//! Rigid-body simulation for tumblebox
//!
//! This crate owns the physics world and keeps scene nodes in step with it:
//! - Collision shapes kept in a shared registry and released once at teardown
//! - Rigid bodies with Bullet-style box inertia
//! - Motion states interpolated between fixed sub-steps
//! - A per-frame step that writes body poses onto linked scene nodes
//!
//! The dynamics engine underneath is `rapier3d`; nothing here exposes its
//! types.

pub mod body;
mod convert;
pub mod error;
pub mod material;
pub mod motion_state;
pub mod shapes;
pub mod world;

// Re-export commonly used types
pub use body::{BodyKey, BodyType, RigidBodyDesc, RigidBodyEntry};
pub use error::BridgeError;
pub use material::PhysicsMaterial;
pub use motion_state::MotionState;
pub use shapes::{box_inertia, BoxShape, CollisionShapes, ShapeKey};
pub use world::{FrameReport, PhysicsConfig, SimulationBridge, TeardownReport};
