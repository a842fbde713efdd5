//! Spiral lifecycle: grow while scraping, fall once released, disappear after a while.

use crate::config::SpiralConfig;
use crate::follow::FollowScraper;
use engine_core::{euler_degrees_to_quat, MeshSink};
use glam::{Quat, Vec3};
use physics::{ColliderHandle, PhysicsBody, PhysicsWorld, RigidBodyHandle};
use procgen::SpiralMesh;
use renderer::MeshData;
use thiserror::Error;

/// Spirals with fewer vertices take the capsule center from the tip alone.
pub const CAPSULE_BODY_THRESHOLD: usize = 50;
/// Vertex roughly where a longer spiral's body starts.
pub const CAPSULE_BODY_INDEX: usize = 49;
/// The radius is measured to this many vertices before the end of the buffer.
pub const CAPSULE_TAIL_OFFSET: usize = 5;
/// Pulled off the measured radius so the collider sits inside the ribbon.
pub const CAPSULE_RADIUS_INSET: f32 = 0.05;

#[derive(Debug, Error)]
pub enum SpiralError {
    #[error("spiral body has no collider attached")]
    MissingCollider,
    #[error("rigid body {0:?} is not in the physics world")]
    UnknownBody(RigidBodyHandle),
    #[error("collider {0:?} is not in the physics world")]
    UnknownCollider(ColliderHandle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiralPhase {
    Scraping,
    Released,
    Disposed,
}

/// Cheap collision proxy for a finished spiral, in the spiral's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingCapsule {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingCapsule {
    /// Fit a capsule to a spiral vertex buffer.
    ///
    /// Short spirals are centered on the tip's first edge; longer ones on the
    /// midpoint between the tip and vertex 49. The radius reaches the ring
    /// before the newest one. Returns `None` when the buffer is too small to
    /// index.
    pub fn fit(vertices: &[Vec3]) -> Option<Self> {
        let count = vertices.len();
        if count < CAPSULE_TAIL_OFFSET {
            return None;
        }

        let far = if count < CAPSULE_BODY_THRESHOLD {
            vertices[1]
        } else {
            vertices[CAPSULE_BODY_INDEX]
        };
        let center = (vertices[0] + far) / 2.0;
        let radius = center.distance(vertices[count - CAPSULE_TAIL_OFFSET]) - CAPSULE_RADIUS_INSET;

        Some(Self { center, radius })
    }
}

/// Owns one growing spiral mesh and drives it through its lifecycle.
pub struct SpiralController<S: MeshSink = MeshData> {
    config: SpiralConfig,
    phase: SpiralPhase,
    start_time: f32,
    release_time: Option<f32>,
    rotation_step: Quat,
    mesh: SpiralMesh,
    sink: S,
    body: RigidBodyHandle,
    collider: ColliderHandle,
    follow: FollowScraper,
    capsule: Option<BoundingCapsule>,
}

impl<S: MeshSink> SpiralController<S> {
    /// Start a spiral at `now`: build the seed tip and push it to `sink`.
    ///
    /// Fails if the physics handles are incomplete or stale. Unusable tuning
    /// values are replaced by their defaults.
    pub fn new(
        config: SpiralConfig,
        body: PhysicsBody,
        mut sink: S,
        follow: FollowScraper,
        physics: &PhysicsWorld,
        now: f32,
    ) -> Result<Self, SpiralError> {
        let collider = body.collider.ok_or(SpiralError::MissingCollider)?;
        if !physics.has_body(body.rigid_body) {
            return Err(SpiralError::UnknownBody(body.rigid_body));
        }
        if !physics.has_collider(collider) {
            return Err(SpiralError::UnknownCollider(collider));
        }

        let config = config.sanitized();
        let mesh = SpiralMesh::seed(config.unit_length, config.thickness);
        mesh.sync_to_sink(&mut sink);
        let rotation_step = euler_degrees_to_quat(config.rotation_euler_angles);

        log::debug!("Spiral started at t={:.3}", now);

        Ok(Self {
            config,
            phase: SpiralPhase::Scraping,
            start_time: now,
            release_time: None,
            rotation_step,
            mesh,
            sink,
            body: body.rigid_body,
            collider,
            follow,
            capsule: None,
        })
    }

    /// Advance the spiral to `now` and report the phase afterwards.
    pub fn tick(&mut self, now: f32) -> SpiralPhase {
        match self.phase {
            SpiralPhase::Scraping => {
                let growth = self.config.unit_length
                    + (now - self.start_time) / self.config.growth_time_divisor;
                self.mesh.rotate(self.rotation_step, Vec3::ZERO);
                self.mesh.shift(Vec3::new(0.0, growth, 0.0));
                self.mesh.extrude();
                self.mesh.sync_to_sink(&mut self.sink);
            }
            SpiralPhase::Released => {
                let released_at = self.release_time.unwrap_or(now);
                if now - released_at > self.config.spiral_life_span {
                    log::debug!("Spiral expired at t={:.3}", now);
                    self.phase = SpiralPhase::Disposed;
                }
            }
            SpiralPhase::Disposed => {}
        }
        self.phase
    }

    /// Lift the scraper off this spiral: stop growing and hand it to physics.
    ///
    /// Returns `false` (and changes nothing) unless the spiral is still scraping.
    pub fn stop_scraping(&mut self, now: f32, physics: &mut PhysicsWorld) -> bool {
        if self.phase != SpiralPhase::Scraping {
            return false;
        }

        self.phase = SpiralPhase::Released;
        self.follow.deactivate();
        self.release_time = Some(now);

        self.capsule = BoundingCapsule::fit(self.mesh.vertices());
        match self.capsule {
            Some(capsule) => {
                physics.set_capsule_collider(
                    self.collider,
                    capsule.center,
                    capsule.radius,
                    self.config.capsule_height,
                    true,
                );
                log::info!(
                    "Spiral released at t={:.3}: {} vertices, capsule center {:?} radius {:.3}",
                    now,
                    self.mesh.vertex_count(),
                    capsule.center,
                    capsule.radius
                );
            }
            None => log::warn!(
                "Spiral released with {} vertices, too few to fit a collider",
                self.mesh.vertex_count()
            ),
        }

        physics.make_dynamic(self.body);
        physics.set_linear_velocity(self.body, self.config.spiral_velocity);
        true
    }

    pub fn phase(&self) -> SpiralPhase {
        self.phase
    }

    pub fn start_time(&self) -> f32 {
        self.start_time
    }

    pub fn release_time(&self) -> Option<f32> {
        self.release_time
    }

    /// Time at which a released spiral gets disposed.
    pub fn expires_at(&self) -> Option<f32> {
        self.release_time.map(|t| t + self.config.spiral_life_span)
    }

    pub fn capsule(&self) -> Option<BoundingCapsule> {
        self.capsule
    }

    pub fn mesh(&self) -> &SpiralMesh {
        &self.mesh
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn follow(&self) -> &FollowScraper {
        &self.follow
    }

    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    pub fn collider(&self) -> ColliderHandle {
        self.collider
    }
}
