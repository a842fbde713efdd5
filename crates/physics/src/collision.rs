//! Collision groups and filtering.

use rapier3d::prelude::*;

/// Collision groups for different entity types.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroup {
    /// Static environment (ground)
    Environment = 1 << 0,
    /// Released spirals
    Spiral = 1 << 1,
}

impl CollisionGroup {
    /// Create a collision group for environment.
    pub fn environment() -> InteractionGroups {
        let membership = Group::from_bits_retain(Self::Environment as u32);
        InteractionGroups::new(membership, Group::ALL)
    }

    /// Create a collision group for spirals: they land on the ground and pile on each other.
    pub fn spiral() -> InteractionGroups {
        let membership = Group::from_bits_retain(Self::Spiral as u32);
        let filter = Group::from_bits_retain(Self::Environment as u32 | Self::Spiral as u32);
        InteractionGroups::new(membership, filter)
    }
}

/// Component linking an ECS entity to its physics handles.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub rigid_body: RigidBodyHandle,
    pub collider: Option<ColliderHandle>,
}

impl PhysicsBody {
    pub fn new(rigid_body: RigidBodyHandle) -> Self {
        Self {
            rigid_body,
            collider: None,
        }
    }

    pub fn with_collider(rigid_body: RigidBodyHandle, collider: ColliderHandle) -> Self {
        Self {
            rigid_body,
            collider: Some(collider),
        }
    }
}
