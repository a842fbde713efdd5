//! Simulation configuration (timing, scraper, spiral tuning). Loaded from scraper.ron at startup.

use engine_core::euler_degrees_to_quat;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Tuning for a single spiral.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpiralConfig {
    /// Minimum length of one spiral segment (growth-axis height of the seed tip).
    #[serde(default = "default_unit_length")]
    pub unit_length: f32,
    /// Thickness of the ribbon.
    #[serde(default = "default_thickness")]
    pub thickness: f32,
    /// Attitude the spiral spawns with, Euler degrees.
    #[serde(default = "default_starting_euler_angles")]
    pub starting_euler_angles: Vec3,
    /// Rotation applied to the whole mesh every tick, Euler degrees.
    #[serde(default = "default_rotation_euler_angles")]
    pub rotation_euler_angles: Vec3,
    /// Velocity assigned to the spiral when it is released.
    #[serde(default = "default_spiral_velocity")]
    pub spiral_velocity: Vec3,
    /// Seconds a released spiral lives before it is destroyed.
    #[serde(default = "default_spiral_life_span")]
    pub spiral_life_span: f32,
    /// Offset from the scraper while the spiral follows it.
    #[serde(default = "default_follow_offset")]
    pub follow_offset: Vec3,
    /// Total height of the release capsule along the spiral's local Y axis.
    #[serde(default = "default_capsule_height")]
    pub capsule_height: f32,
    /// Per-tick shift is `unit_length + elapsed / growth_time_divisor`.
    #[serde(default = "default_growth_time_divisor")]
    pub growth_time_divisor: f32,
}

fn default_unit_length() -> f32 {
    0.02
}
fn default_thickness() -> f32 {
    0.05
}
fn default_starting_euler_angles() -> Vec3 {
    Vec3::new(0.0, 90.0, 0.0)
}
fn default_rotation_euler_angles() -> Vec3 {
    Vec3::new(8.0, 0.0, 0.0)
}
fn default_spiral_velocity() -> Vec3 {
    Vec3::new(0.0, 0.0, 2.0)
}
fn default_spiral_life_span() -> f32 {
    5.0
}
fn default_follow_offset() -> Vec3 {
    Vec3::new(0.0, 0.0, -0.5)
}
fn default_capsule_height() -> f32 {
    1.0
}
fn default_growth_time_divisor() -> f32 {
    10.0
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            unit_length: default_unit_length(),
            thickness: default_thickness(),
            starting_euler_angles: default_starting_euler_angles(),
            rotation_euler_angles: default_rotation_euler_angles(),
            spiral_velocity: default_spiral_velocity(),
            spiral_life_span: default_spiral_life_span(),
            follow_offset: default_follow_offset(),
            capsule_height: default_capsule_height(),
            growth_time_divisor: default_growth_time_divisor(),
        }
    }
}

impl SpiralConfig {
    /// Replace values the growth math cannot use with their defaults.
    pub fn sanitized(mut self) -> Self {
        self.unit_length = finite_or("unit_length", self.unit_length, default_unit_length());
        self.thickness = finite_or("thickness", self.thickness, default_thickness());
        self.growth_time_divisor = positive_or(
            "growth_time_divisor",
            self.growth_time_divisor,
            default_growth_time_divisor(),
        );
        self.capsule_height =
            positive_or("capsule_height", self.capsule_height, default_capsule_height());
        self.spiral_life_span = non_negative_or(
            "spiral_life_span",
            self.spiral_life_span,
            default_spiral_life_span(),
        );
        if !self.starting_euler_angles.is_finite() {
            log::warn!("Invalid starting_euler_angles, using default");
            self.starting_euler_angles = default_starting_euler_angles();
        }
        if !self.rotation_euler_angles.is_finite() {
            log::warn!("Invalid rotation_euler_angles, using default");
            self.rotation_euler_angles = default_rotation_euler_angles();
        }
        if !self.spiral_velocity.is_finite() {
            log::warn!("Invalid spiral_velocity, using default");
            self.spiral_velocity = default_spiral_velocity();
        }
        if !self.follow_offset.is_finite() {
            log::warn!("Invalid follow_offset, using default");
            self.follow_offset = default_follow_offset();
        }
        self
    }

    /// Attitude a new spiral's transform starts with.
    pub fn starting_rotation(&self) -> Quat {
        euler_degrees_to_quat(self.starting_euler_angles)
    }
}

/// The scraper the spirals peel off behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    #[serde(default = "default_scraper_start")]
    pub start_position: Vec3,
    /// Constant velocity the scraper travels at.
    #[serde(default = "default_scraper_velocity")]
    pub velocity: Vec3,
}

fn default_scraper_start() -> Vec3 {
    Vec3::new(0.0, 1.0, 0.0)
}
fn default_scraper_velocity() -> Vec3 {
    Vec3::new(0.0, 0.0, 2.0)
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            start_position: default_scraper_start(),
            velocity: default_scraper_velocity(),
        }
    }
}

/// Top-level settings for a headless scrape run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Fixed tick rate in Hz.
    #[serde(default = "default_tick_rate")]
    pub tick_rate_hz: f64,
    /// Total simulated seconds.
    #[serde(default = "default_duration")]
    pub duration_seconds: f32,
    /// When the scripted trigger goes down.
    #[serde(default = "default_press_at")]
    pub press_at: f32,
    /// When the scripted trigger goes up.
    #[serde(default = "default_release_at")]
    pub release_at: f32,
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub spiral: SpiralConfig,
}

fn default_tick_rate() -> f64 {
    60.0
}
fn default_duration() -> f32 {
    10.0
}
fn default_press_at() -> f32 {
    0.5
}
fn default_release_at() -> f32 {
    2.0
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: default_tick_rate(),
            duration_seconds: default_duration(),
            press_at: default_press_at(),
            release_at: default_release_at(),
            scraper: ScraperConfig::default(),
            spiral: SpiralConfig::default(),
        }
    }
}

/// Slowest tick rate the simulation accepts.
pub const MIN_TICK_RATE_HZ: f64 = 1.0;
/// Fastest tick rate the simulation accepts.
pub const MAX_TICK_RATE_HZ: f64 = 10_000.0;

fn finite_or(name: &str, value: f32, default: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        log::warn!("Invalid {} {}, using {}", name, value, default);
        default
    }
}

fn positive_or(name: &str, value: f32, default: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        log::warn!("{} must be positive, got {}, using {}", name, value, default);
        default
    }
}

fn non_negative_or(name: &str, value: f32, default: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!("{} must not be negative, got {}, using {}", name, value, default);
        default
    }
}

impl SimConfig {
    /// Replace values the simulation cannot run with by their defaults.
    pub fn sanitized(mut self) -> Self {
        if !(MIN_TICK_RATE_HZ..=MAX_TICK_RATE_HZ).contains(&self.tick_rate_hz) {
            log::warn!(
                "tick_rate_hz must be within {}..={}, got {}, using {}",
                MIN_TICK_RATE_HZ,
                MAX_TICK_RATE_HZ,
                self.tick_rate_hz,
                default_tick_rate()
            );
            self.tick_rate_hz = default_tick_rate();
        }
        self.duration_seconds =
            non_negative_or("duration_seconds", self.duration_seconds, default_duration());
        self.press_at = finite_or("press_at", self.press_at, default_press_at());
        self.release_at = finite_or("release_at", self.release_at, default_release_at());
        if !self.scraper.start_position.is_finite() {
            log::warn!("Invalid scraper start_position, using default");
            self.scraper.start_position = default_scraper_start();
        }
        if !self.scraper.velocity.is_finite() {
            log::warn!("Invalid scraper velocity, using default");
            self.scraper.velocity = default_scraper_velocity();
        }
        self.spiral = self.spiral.sanitized();
        self
    }

    /// Load config from `scraper.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from `path`, falling back to defaults like [`SimConfig::load`].
    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str::<SimConfig>(&data) {
                Ok(c) => return c.sanitized(),
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        } else {
            log::debug!("No config at {:?}, using defaults", path);
        }
        Self::default()
    }

    /// Save current config to `path`. Logs on error.
    pub fn save_to(&self, path: &Path) {
        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(s) => {
                if let Err(e) = std::fs::write(path, s) {
                    log::warn!("Could not write config to {:?}: {}", path, e);
                }
            }
            Err(e) => log::warn!("Could not serialize config: {}", e),
        }
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("scraper.ron")
}
