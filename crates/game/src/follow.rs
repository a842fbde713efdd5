//! Follow-target binding: keeps a spiral glued to the scraper while it grows.

use glam::Vec3;
use hecs::Entity;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FollowState {
    #[default]
    Active,
    Inactive,
}

/// Copies a target's position plus a fixed offset every tick while active.
#[derive(Debug, Clone, Copy)]
pub struct FollowScraper {
    target: Option<Entity>,
    offset: Vec3,
    state: FollowState,
}

impl FollowScraper {
    /// New active binding with no target yet.
    pub fn new(offset: Vec3) -> Self {
        Self {
            target: None,
            offset,
            state: FollowState::Active,
        }
    }

    pub fn bind(&mut self, target: Entity) {
        self.target = Some(target);
    }

    pub fn deactivate(&mut self) {
        self.state = FollowState::Inactive;
    }

    pub fn state(&self) -> FollowState {
        self.state
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// Target to read this tick, if the binding is active and bound.
    pub fn active_target(&self) -> Option<Entity> {
        match self.state {
            FollowState::Active => self.target,
            FollowState::Inactive => None,
        }
    }

    /// Where the follower should be given the target's current position.
    pub fn follow(&self, target_position: Vec3) -> Option<Vec3> {
        match self.state {
            FollowState::Active => Some(target_position + self.offset),
            FollowState::Inactive => None,
        }
    }
}
