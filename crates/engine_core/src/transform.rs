//! Transform component and utilities for spatial positioning.

use glam::{EulerRot, Quat, Vec3};

/// A rigid 3D transform: position and rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a new transform with position and rotation.
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Translate the transform by a delta.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }
}

/// Convert editor-style Euler angles in degrees into a rotation.
///
/// Applied as Z first, then X, then Y (the result is `Ry * Rx * Rz`), which is
/// the convention authored attitudes such as `(0, 90, 0)` are written in.
pub fn euler_degrees_to_quat(degrees: Vec3) -> Quat {
    let radians = degrees * (std::f32::consts::PI / 180.0);
    Quat::from_euler(EulerRot::YXZ, radians.y, radians.x, radians.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compare rotations by what they do to a few points; `angle_between`
    /// loses precision near identity in f32.
    fn assert_same_rotation(q: Quat, expected: Quat) {
        for p in [Vec3::X, Vec3::Y, Vec3::Z, Vec3::new(0.3, -1.2, 2.0)] {
            assert!((q * p - expected * p).length() < 1e-5, "{:?} vs {:?}", q, expected);
        }
    }

    #[test]
    fn euler_single_axis_matches_axis_rotation() {
        let q = euler_degrees_to_quat(Vec3::new(0.0, 10.0, 0.0));
        assert_same_rotation(q, Quat::from_rotation_y(10f32.to_radians()));
    }

    #[test]
    fn euler_applies_z_then_x_then_y() {
        let q = euler_degrees_to_quat(Vec3::new(30.0, 45.0, 60.0));
        let expected = Quat::from_rotation_y(45f32.to_radians())
            * Quat::from_rotation_x(30f32.to_radians())
            * Quat::from_rotation_z(60f32.to_radians());
        assert_same_rotation(q, expected);
    }

    #[test]
    fn translate_moves_position_only() {
        let mut t = Transform::from_position_rotation(Vec3::ONE, Quat::from_rotation_z(1.0));
        t.translate(Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(t.position, Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(t.rotation, Quat::from_rotation_z(1.0));
    }
}
