//! Vertex types for rendering.

use bytemuck::{Pod, Zeroable};

/// Standard vertex with position, normal, UV coordinates, and color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coords,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }

    /// Vertex at `position` with no normal yet.
    pub fn from_position(position: [f32; 3]) -> Self {
        Self::new(position, [0.0; 3], [0.0; 2])
    }

    /// Size of one vertex in bytes, as laid out in a vertex buffer.
    pub const fn stride() -> usize {
        std::mem::size_of::<Vertex>()
    }
}
