//! Physics world management with Rapier3D.

use crate::collision::{CollisionGroup, PhysicsBody};
use engine_core::{Transform, Vec3};
use glam::Quat;
use rapier3d::na::{Isometry3, Quaternion, Translation3, UnitQuaternion};
use rapier3d::prelude::*;

/// Smallest radius handed to Rapier for a capsule collider.
pub const MIN_CAPSULE_RADIUS: f32 = 0.01;

fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

fn to_isometry(position: Vec3, rotation: Quat) -> Isometry<Real> {
    let rotation = UnitQuaternion::from_quaternion(Quaternion::new(
        rotation.w, rotation.x, rotation.y, rotation.z,
    ));
    Isometry3::from_parts(Translation3::new(position.x, position.y, position.z), rotation)
}

/// Main physics world containing all simulation state.
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub gravity: Vector<Real>,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create a new physics world with default gravity.
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            gravity: vector![0.0, -9.81, 0.0],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Set the simulation step length in seconds.
    pub fn set_timestep(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    /// Step the physics simulation.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Add a ground plane collider (flat Y=0 half-space).
    pub fn add_ground_plane(&mut self) -> ColliderHandle {
        let collider = ColliderBuilder::halfspace(Vector::y_axis())
            .collision_groups(CollisionGroup::environment())
            .build();
        self.collider_set.insert(collider)
    }

    /// Add a kinematic spiral body with a disabled capsule collider.
    ///
    /// The body is driven by pose updates while the spiral grows; the collider
    /// is reshaped and enabled once the spiral's final geometry is known.
    pub fn add_spiral_body(&mut self, position: Vec3, rotation: Quat) -> PhysicsBody {
        let rigid_body = RigidBodyBuilder::kinematic_position_based()
            .position(to_isometry(position, rotation))
            .build();
        let body_handle = self.rigid_body_set.insert(rigid_body);

        let collider = ColliderBuilder::capsule_y(0.5, 0.5)
            .collision_groups(CollisionGroup::spiral())
            .enabled(false)
            .build();
        let collider_handle =
            self.collider_set
                .insert_with_parent(collider, body_handle, &mut self.rigid_body_set);

        PhysicsBody::with_collider(body_handle, collider_handle)
    }

    pub fn has_body(&self, handle: RigidBodyHandle) -> bool {
        self.rigid_body_set.contains(handle)
    }

    pub fn has_collider(&self, handle: ColliderHandle) -> bool {
        self.collider_set.contains(handle)
    }

    /// Set the next pose of a kinematic body.
    pub fn set_kinematic_pose(&mut self, handle: RigidBodyHandle, position: Vec3, rotation: Quat) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_next_kinematic_position(to_isometry(position, rotation));
        }
    }

    /// Hand a body over to the simulation (kinematic -> dynamic).
    pub fn make_dynamic(&mut self, handle: RigidBodyHandle) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_body_type(RigidBodyType::Dynamic, true);
        }
    }

    /// Overwrite the linear velocity of a body.
    pub fn set_linear_velocity(&mut self, handle: RigidBodyHandle, velocity: Vec3) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_linvel(to_vector(velocity), true);
        }
    }

    pub fn linear_velocity(&self, handle: RigidBodyHandle) -> Option<Vec3> {
        self.rigid_body_set
            .get(handle)
            .map(|body| Vec3::new(body.linvel().x, body.linvel().y, body.linvel().z))
    }

    /// Reshape a collider into a Y-axis capsule of total `height` around local `center`.
    ///
    /// Follows the usual capsule convention: when `2 * radius >= height` the
    /// capsule degenerates into a sphere. `radius` is clamped to
    /// [`MIN_CAPSULE_RADIUS`].
    pub fn set_capsule_collider(
        &mut self,
        handle: ColliderHandle,
        center: Vec3,
        radius: f32,
        height: f32,
        enabled: bool,
    ) {
        let radius = radius.max(MIN_CAPSULE_RADIUS);
        let half_height = (height * 0.5 - radius).max(0.0);
        if let Some(collider) = self.collider_set.get_mut(handle) {
            collider.set_shape(SharedShape::capsule_y(half_height, radius));
            collider.set_translation_wrt_parent(to_vector(center));
            collider.set_enabled(enabled);
        }
    }

    pub fn is_collider_enabled(&self, handle: ColliderHandle) -> bool {
        self.collider_set
            .get(handle)
            .map(|c| c.is_enabled())
            .unwrap_or(false)
    }

    /// Get the transform of a rigid body.
    pub fn get_body_transform(&self, handle: RigidBodyHandle) -> Option<Transform> {
        self.rigid_body_set.get(handle).map(|body| {
            let pos = body.translation();
            let rot = body.rotation();
            Transform {
                position: Vec3::new(pos.x, pos.y, pos.z),
                rotation: Quat::from_xyzw(rot.i, rot.j, rot.k, rot.w),
            }
        })
    }

    /// Remove a rigid body and its colliders.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spiral_body_starts_kinematic_with_disabled_collider() {
        let mut physics = PhysicsWorld::new();
        let body = physics.add_spiral_body(Vec3::new(0.0, 2.0, 0.0), Quat::IDENTITY);
        let collider = body.collider.expect("spiral body has a collider");

        assert!(physics.rigid_body_set[body.rigid_body].is_kinematic());
        assert!(!physics.is_collider_enabled(collider));
        let t = physics.get_body_transform(body.rigid_body).unwrap();
        assert!((t.position - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn capsule_collider_is_reshaped_and_enabled() {
        let mut physics = PhysicsWorld::new();
        let body = physics.add_spiral_body(Vec3::ZERO, Quat::IDENTITY);
        let collider = body.collider.unwrap();

        physics.set_capsule_collider(collider, Vec3::new(0.5, 1.0, 0.0), 0.4, 2.0, true);

        assert!(physics.is_collider_enabled(collider));
        let c = &physics.collider_set[collider];
        let capsule = c.shape().as_capsule().expect("capsule shape");
        assert!((capsule.radius - 0.4).abs() < 1e-6);
        assert!((capsule.half_height() - 0.6).abs() < 1e-6);
        let offset = c.position_wrt_parent().unwrap().translation.vector;
        assert!((offset.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn negative_radius_is_clamped() {
        let mut physics = PhysicsWorld::new();
        let body = physics.add_spiral_body(Vec3::ZERO, Quat::IDENTITY);
        let collider = body.collider.unwrap();
        physics.set_capsule_collider(collider, Vec3::ZERO, -0.2, 2.0, true);
        let capsule = physics.collider_set[collider].shape().as_capsule().unwrap();
        assert!((capsule.radius - MIN_CAPSULE_RADIUS).abs() < 1e-6);
    }

    #[test]
    fn released_body_falls_with_assigned_velocity() {
        let mut physics = PhysicsWorld::new();
        physics.set_timestep(1.0 / 60.0);
        let body = physics.add_spiral_body(Vec3::new(0.0, 10.0, 0.0), Quat::IDENTITY);
        physics.set_capsule_collider(body.collider.unwrap(), Vec3::ZERO, 0.2, 1.0, true);
        physics.make_dynamic(body.rigid_body);
        physics.set_linear_velocity(body.rigid_body, Vec3::new(0.0, 0.0, 2.0));

        for _ in 0..30 {
            physics.step();
        }

        let t = physics.get_body_transform(body.rigid_body).unwrap();
        assert!(t.position.y < 10.0, "body should fall, y = {}", t.position.y);
        assert!(t.position.z > 0.5, "body should carry its velocity, z = {}", t.position.z);
    }

    #[test]
    fn kinematic_pose_applies_on_step() {
        let mut physics = PhysicsWorld::new();
        let body = physics.add_spiral_body(Vec3::ZERO, Quat::IDENTITY);
        physics.set_kinematic_pose(body.rigid_body, Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY);
        physics.step();
        let t = physics.get_body_transform(body.rigid_body).unwrap();
        assert!((t.position - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn remove_body_drops_its_collider() {
        let mut physics = PhysicsWorld::new();
        let body = physics.add_spiral_body(Vec3::ZERO, Quat::IDENTITY);
        physics.remove_body(body.rigid_body);
        assert!(!physics.has_body(body.rigid_body));
        assert!(!physics.has_collider(body.collider.unwrap()));
    }
}
