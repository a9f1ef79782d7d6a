//! Scene graph errors

use std::fmt;

use crate::NodeKey;

/// Errors from scene graph operations
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// No mesh is registered under this name
    UnknownMesh(String),
    /// A mesh with this name already exists
    DuplicateMesh(String),
    /// The key does not refer to a live node
    UnknownNode(NodeKey),
    /// The root node cannot be removed
    CannotRemoveRoot,
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::UnknownMesh(name) => write!(f, "Unknown mesh '{}'", name),
            SceneError::DuplicateMesh(name) => write!(f, "Mesh '{}' already exists", name),
            SceneError::UnknownNode(key) => write!(f, "Unknown scene node {:?}", key),
            SceneError::CannotRemoveRoot => write!(f, "The root scene node cannot be removed"),
        }
    }
}

impl std::error::Error for SceneError {}
