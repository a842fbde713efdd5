//! Common ECS components used across the engine.

use glam::Vec3;

/// Velocity component for moving entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct Velocity {
    pub linear: Vec3,
}

impl Velocity {
    pub fn new(linear: Vec3) -> Self {
        Self { linear }
    }
}

/// Tag component for the scraper entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scraper;

/// Tag component for spiral entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spiral;
