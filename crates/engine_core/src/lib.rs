//! Core engine types and utilities for the spiral scraper.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Transform and rotation helpers
//! - Deterministic frame timing
//! - Common component types for ECS
//! - The mesh sink seam between geometry producers and the renderer

pub mod components;
pub mod mesh_sink;
pub mod time;
pub mod transform;

pub use components::*;
pub use mesh_sink::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Quat, Vec3};
pub use hecs::{Entity, World};
