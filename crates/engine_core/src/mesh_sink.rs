//! Seam between geometry producers and whatever consumes the mesh (renderer, debug dumps).

use glam::Vec3;

/// Receives raw mesh geometry and derives shading data from it.
pub trait MeshSink {
    /// Replace the sink's geometry. `indices` holds triangles as index triples into `vertices`.
    fn set_geometry(&mut self, vertices: &[Vec3], indices: &[u32]);

    /// Rebuild vertex normals from the current geometry.
    fn recalculate_normals(&mut self);
}
