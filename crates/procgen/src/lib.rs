//! Procedural generation for growing meshes.

pub mod spiral_mesh;

pub use spiral_mesh::*;
