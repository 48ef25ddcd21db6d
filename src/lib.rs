//! Procedural UV sphere meshes for GPU upload.
//!
//! [`generate`] builds positions, normals, texture coordinates and a
//! triangle index list; [`SceneState`] rebuilds the mesh when the viewport
//! aspect ratio changes.

pub mod config;
pub mod error;
pub mod mesh;
pub mod scene;

pub use error::{ConfigError, MeshError};
pub use mesh::{generate, SphereMesh, SphereParameters, Vertex};
pub use scene::SceneState;
