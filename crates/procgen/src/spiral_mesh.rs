//! Procedural spiral ribbon mesh.
//!
//! The spiral starts as a small rectangular prism ("tip") and grows from its
//! base: every step the existing geometry is rotated and pushed up the growth
//! axis, then a new ring of four vertices is laid down at the local origin and
//! stitched to the previous ring. Older geometry therefore curls further away
//! from the base the longer the spiral grows.

use engine_core::MeshSink;
use glam::{Quat, Vec3};

/// Vertices in the seed tip.
pub const SEED_VERTEX_COUNT: usize = 8;
/// Indices in the seed tip (two capped end faces, two triangles each).
pub const SEED_INDEX_COUNT: usize = 12;
/// Vertices appended by a single extrusion.
pub const RING_VERTEX_COUNT: usize = 4;
/// Indices appended by a single extrusion (outer and inner wall quads).
pub const RING_INDEX_COUNT: usize = 12;

/// Growing vertex/index buffer for a spiral ribbon.
///
/// Vertex order is significant: each extrusion ring occupies four consecutive
/// slots `(0,0,0), (1,0,0), (0,0,t), (1,0,t)`. The first pair is the edge of
/// the outer face (`z = 0`), the second pair the edge of the inner face
/// (`z = thickness`). The seed's last four vertices stand in for the
/// "previous ring" of the first extrusion. Every index always refers to an
/// existing vertex.
#[derive(Debug, Clone)]
pub struct SpiralMesh {
    vertices: Vec<Vec3>,
    indices: Vec<u32>,
    unit_length: f32,
    thickness: f32,
}

impl SpiralMesh {
    /// Build the 1 x `unit_length` x `thickness` seed tip.
    ///
    /// Only the front and back faces are capped; the remaining sides are either
    /// covered by later extrusions or never visible.
    pub fn seed(unit_length: f32, thickness: f32) -> Self {
        let vertices = vec![
            Vec3::new(0.0, unit_length, 0.0),
            Vec3::new(1.0, unit_length, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, unit_length, thickness),
            Vec3::new(1.0, unit_length, thickness),
            Vec3::new(0.0, 0.0, thickness),
            Vec3::new(1.0, 0.0, thickness),
        ];

        #[rustfmt::skip]
        let indices = vec![
            3, 2, 0,  3, 0, 1, // Front cap (z = 0)
            7, 4, 6,  7, 5, 4, // Back cap (z = thickness)
        ];

        Self {
            vertices,
            indices,
            unit_length,
            thickness,
        }
    }

    /// Translate every vertex by `offset`.
    pub fn shift(&mut self, offset: Vec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Rotate every vertex by `rotation` around `center`.
    pub fn rotate(&mut self, rotation: Quat, center: Vec3) {
        for v in &mut self.vertices {
            *v = rotation * (*v - center) + center;
        }
    }

    /// Append a new ring at the local base and stitch it to the previous ring.
    pub fn extrude(&mut self) {
        let t = self.thickness;
        let base = self.vertices.len() as u32;

        self.vertices.extend_from_slice(&[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, t),
            Vec3::new(1.0, 0.0, t),
        ]);

        #[rustfmt::skip]
        self.indices.extend_from_slice(&[
            // Outer wall: new front edge to the previous front edge
            base, base - 3, base + 1,
            base, base - 4, base - 3,
            // Inner wall: new back edge to the previous back edge
            base + 2, base + 3, base - 1,
            base + 2, base - 1, base - 2,
        ]);
    }

    /// Push the current geometry to `sink` and have it rebuild normals.
    pub fn sync_to_sink<S: MeshSink + ?Sized>(&self, sink: &mut S) {
        sink.set_geometry(&self.vertices, &self.indices);
        sink.recalculate_normals();
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of rings extruded since the seed.
    pub fn ring_count(&self) -> usize {
        (self.vertices.len() - SEED_VERTEX_COUNT) / RING_VERTEX_COUNT
    }

    pub fn unit_length(&self) -> f32 {
        self.unit_length
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        vertices: Vec<Vec3>,
        indices: Vec<u32>,
        normal_passes: usize,
    }

    impl MeshSink for RecordingSink {
        fn set_geometry(&mut self, vertices: &[Vec3], indices: &[u32]) {
            self.vertices = vertices.to_vec();
            self.indices = indices.to_vec();
        }

        fn recalculate_normals(&mut self) {
            self.normal_passes += 1;
        }
    }

    fn assert_indices_valid(mesh: &SpiralMesh) {
        let n = mesh.vertex_count() as u32;
        assert_eq!(mesh.indices().len() % 3, 0);
        for &i in mesh.indices() {
            assert!(i < n, "index {} out of range for {} vertices", i, n);
        }
    }

    fn face_normal(mesh: &SpiralMesh, tri: usize) -> Vec3 {
        let idx = &mesh.indices()[tri * 3..tri * 3 + 3];
        let [a, b, c] = [0, 1, 2].map(|k| mesh.vertices()[idx[k] as usize]);
        (b - a).cross(c - a)
    }

    #[test]
    fn seed_has_box_corners_and_capped_faces() {
        let mesh = SpiralMesh::seed(0.5, 0.2);
        let expected = [
            Vec3::new(0.0, 0.5, 0.0),
            Vec3::new(1.0, 0.5, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.5, 0.2),
            Vec3::new(1.0, 0.5, 0.2),
            Vec3::new(0.0, 0.0, 0.2),
            Vec3::new(1.0, 0.0, 0.2),
        ];
        assert_eq!(mesh.vertices(), &expected);
        assert_eq!(mesh.indices(), &[3, 2, 0, 3, 0, 1, 7, 4, 6, 7, 5, 4]);
        assert_eq!(mesh.ring_count(), 0);
    }

    /// Front cap faces -Z and back cap faces +Z, i.e. both point out of the tip.
    #[test]
    fn seed_caps_wind_outward() {
        let mesh = SpiralMesh::seed(1.0, 0.25);
        for tri in 0..2 {
            assert!(face_normal(&mesh, tri).normalize().dot(Vec3::NEG_Z) > 0.99);
        }
        for tri in 2..4 {
            assert!(face_normal(&mesh, tri).normalize().dot(Vec3::Z) > 0.99);
        }
    }

    #[test]
    fn extrude_grows_by_fixed_increments() {
        let mut mesh = SpiralMesh::seed(1.0, 0.1);
        for k in 1..=20 {
            mesh.shift(Vec3::Y);
            mesh.extrude();
            assert_eq!(mesh.vertex_count(), SEED_VERTEX_COUNT + RING_VERTEX_COUNT * k);
            assert_eq!(mesh.indices().len(), SEED_INDEX_COUNT + RING_INDEX_COUNT * k);
            assert_eq!(mesh.ring_count(), k);
        }
    }

    #[test]
    fn indices_stay_in_range_under_mixed_operations() {
        let mut mesh = SpiralMesh::seed(0.3, 0.05);
        let rot = Quat::from_rotation_x(0.2);
        for step in 0..40 {
            match step % 3 {
                0 => mesh.rotate(rot, Vec3::ZERO),
                1 => mesh.shift(Vec3::new(0.0, 0.3, 0.01)),
                _ => mesh.extrude(),
            }
            assert_indices_valid(&mesh);
        }
    }

    #[test]
    fn extrude_places_ring_at_base_and_stitches_previous_ring() {
        let mut mesh = SpiralMesh::seed(1.0, 0.1);
        mesh.shift(Vec3::new(0.0, 2.0, 0.0));
        mesh.extrude();

        assert_eq!(
            &mesh.vertices()[8..],
            &[
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 0.1),
                Vec3::new(1.0, 0.0, 0.1),
            ]
        );
        assert_eq!(&mesh.indices()[12..], &[8, 5, 9, 8, 4, 5, 10, 11, 7, 10, 7, 6]);
    }

    /// Straight growth along +Y: the outer wall sits on z = 0 facing -Z and
    /// the inner wall on z = thickness facing +Z, same as the seed caps.
    #[test]
    fn extruded_walls_keep_seed_orientation() {
        let mut mesh = SpiralMesh::seed(1.0, 0.2);
        for _ in 0..3 {
            mesh.shift(Vec3::Y);
            mesh.extrude();
        }
        for tri in 4..mesh.triangle_count() {
            let n = face_normal(&mesh, tri).normalize();
            let ring_tri = (tri - 4) % 4;
            let expected = if ring_tri < 2 { Vec3::NEG_Z } else { Vec3::Z };
            assert!(n.dot(expected) > 0.99, "triangle {} normal {:?}", tri, n);
        }
    }

    #[test]
    fn rotate_preserves_pairwise_distances() {
        let mut mesh = SpiralMesh::seed(0.7, 0.1);
        for _ in 0..4 {
            mesh.shift(Vec3::new(0.0, 0.7, 0.0));
            mesh.extrude();
        }
        let before = mesh.vertices().to_vec();
        mesh.rotate(
            Quat::from_euler(glam::EulerRot::YXZ, 0.3, -1.1, 0.4),
            Vec3::new(0.2, -0.5, 3.0),
        );
        let after = mesh.vertices();
        for i in 0..before.len() {
            for j in i + 1..before.len() {
                let d0 = before[i].distance(before[j]);
                let d1 = after[i].distance(after[j]);
                assert!((d0 - d1).abs() < 1e-4, "pair ({}, {}) {} vs {}", i, j, d0, d1);
            }
        }
    }

    #[test]
    fn shift_preserves_relative_offsets() {
        let mut mesh = SpiralMesh::seed(1.0, 0.3);
        let before = mesh.vertices().to_vec();
        let offset = Vec3::new(-2.0, 5.0, 0.5);
        mesh.shift(offset);
        for (a, b) in before.iter().zip(mesh.vertices()) {
            assert!((*b - *a - offset).length() < 1e-6);
        }
        assert!((mesh.vertices()[7] - mesh.vertices()[0] - (before[7] - before[0])).length() < 1e-6);
    }

    #[test]
    fn rotate_about_origin_is_linear() {
        let rot = Quat::from_rotation_y(0.6);
        let mut a = SpiralMesh::seed(1.0, 0.1);
        let mut b = a.clone();
        let offset = Vec3::new(0.0, 1.5, 0.0);

        a.shift(offset);
        a.rotate(rot, Vec3::ZERO);

        b.rotate(rot, Vec3::ZERO);
        b.shift(rot * offset);

        for (p, q) in a.vertices().iter().zip(b.vertices()) {
            assert!((*p - *q).length() < 1e-5);
        }
    }

    #[test]
    fn sync_pushes_geometry_and_recalculates_normals() {
        let mut mesh = SpiralMesh::seed(1.0, 0.1);
        mesh.extrude();
        let mut sink = RecordingSink::default();
        mesh.sync_to_sink(&mut sink);
        assert_eq!(sink.vertices, mesh.vertices());
        assert_eq!(sink.indices, mesh.indices());
        assert_eq!(sink.normal_passes, 1);
    }
}
