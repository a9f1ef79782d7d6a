//! Scene graph for tumblebox
//!
//! This crate holds everything the renderer draws:
//!
//! - [`SceneGraph`] - Arena of scene nodes rooted at a single root node
//! - [`NodeKey`] - Generational key to a node in the graph
//! - [`SceneNode`] - Transform, children, and attached objects
//! - [`Camera`], [`Light`], [`Entity`] - Objects that can be attached to nodes
//! - [`MeshRegistry`] / [`MaterialLibrary`] - Named meshes and materials
//!
//! Nodes are owned by the graph. Other systems (the physics bridge in
//! particular) only ever hold a [`NodeKey`].

mod camera;
mod entity;
mod error;
mod graph;
mod light;
mod material;
mod mesh;
mod node;

pub use camera::Camera;
pub use entity::Entity;
pub use error::SceneError;
pub use graph::{DerivedTransform, SceneGraph, ShadowTechnique};
pub use light::{Light, LightKind};
pub use material::{Colour, Material, MaterialLibrary};
pub use mesh::{MeshRegistry, MeshShape, PlaneSpec, CUBE_MESH};
pub use node::{DirtyFlags, MovableObject, NodeKey, SceneNode};

// Re-export math types for convenience
pub use tumblebox_math::{Aabb, Quat, Transform, Vec3};
