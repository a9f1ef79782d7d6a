//! Errors from the simulation bridge

use std::fmt;

use crate::ShapeKey;

/// Errors that can occur while registering physics objects
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeError {
    /// The dynamics world has not been created (or was torn down)
    WorldNotInitialized,
    /// The shape key is not in the shape registry
    UnknownShape(ShapeKey),
    /// Mass must be finite and not negative
    InvalidMass(f32),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::WorldNotInitialized => write!(f, "Dynamics world is not initialized"),
            BridgeError::UnknownShape(key) => write!(f, "Unknown collision shape {:?}", key),
            BridgeError::InvalidMass(mass) => write!(f, "Invalid mass {}", mass),
        }
    }
}

impl std::error::Error for BridgeError {}
