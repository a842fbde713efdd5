//! Mesh data before GPU upload.

use crate::vertex::Vertex;
use engine_core::MeshSink;
use glam::Vec3;

/// CPU-side mesh with vertex and index data.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex and index data as raw bytes, ready for a buffer upload.
    pub fn as_bytes(&self) -> (&[u8], &[u8]) {
        (
            bytemuck::cast_slice(&self.vertices),
            bytemuck::cast_slice(&self.indices),
        )
    }

    /// Smooth per-vertex normals.
    ///
    /// Each triangle contributes its unnormalized face normal `(b - a) x (c - a)`
    /// to its three corners, so larger faces weigh more. Vertices without a
    /// non-degenerate incident triangle keep a zero normal.
    pub fn recalculate_smooth_normals(&mut self) {
        let mut accum = vec![Vec3::ZERO; self.vertices.len()];

        for tri in self.indices.chunks_exact(3) {
            let [ia, ib, ic] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            if ia >= accum.len() || ib >= accum.len() || ic >= accum.len() {
                log::warn!("Skipping triangle {:?} with out-of-range index", tri);
                continue;
            }
            let a = Vec3::from(self.vertices[ia].position);
            let b = Vec3::from(self.vertices[ib].position);
            let c = Vec3::from(self.vertices[ic].position);
            let face = (b - a).cross(c - a);
            accum[ia] += face;
            accum[ib] += face;
            accum[ic] += face;
        }

        for (vertex, n) in self.vertices.iter_mut().zip(accum) {
            vertex.normal = n.normalize_or_zero().into();
        }
    }
}

impl MeshSink for MeshData {
    fn set_geometry(&mut self, vertices: &[Vec3], indices: &[u32]) {
        self.vertices.clear();
        self.vertices
            .extend(vertices.iter().map(|p| Vertex::from_position((*p).into())));
        self.indices.clear();
        self.indices.extend_from_slice(indices);
    }

    fn recalculate_normals(&mut self) {
        self.recalculate_smooth_normals();
    }
}
