//! Render-side mesh data for the spiral scraper.
//!
//! Holds CPU copies of the geometry the GPU backend draws. Producers push raw
//! positions and indices through [`engine_core::MeshSink`]; shading data such
//! as normals is derived here.

pub mod mesh;
pub mod vertex;

pub use mesh::*;
pub use vertex::*;
