//! Scrape session: turns engage/disengage edges into scraper moves and spiral lifecycles.

use crate::config::SpiralConfig;
use crate::follow::FollowScraper;
use crate::spiral::SpiralController;
use anyhow::{Context, Result};
use engine_core::{Spiral, Transform};
use glam::Vec3;
use hecs::{Entity, World};
use physics::PhysicsWorld;
use renderer::MeshData;

/// How far the scraper drops onto the surface when engaged.
const SCRAPER_DROP: Vec3 = Vec3::new(0.0, -1.0, 0.0);

/// Tracks whether the scraper is down and which spiral it is currently growing.
#[derive(Debug)]
pub struct ScrapeSession {
    scraper: Entity,
    engaged: bool,
    spiral: Option<Entity>,
}

impl ScrapeSession {
    pub fn new(scraper: Entity) -> Self {
        Self {
            scraper,
            engaged: false,
            spiral: None,
        }
    }

    /// Drop the scraper and start a new spiral under it. Ignored while already engaged.
    pub fn engage(
        &mut self,
        world: &mut World,
        physics: &mut PhysicsWorld,
        config: &SpiralConfig,
        now: f32,
    ) -> Result<bool> {
        if self.engaged {
            return Ok(false);
        }

        // TODO: ease the scraper down over a few ticks instead of snapping.
        let position = self.move_scraper(world, SCRAPER_DROP)?;

        let rotation = config.starting_rotation();
        let body = physics.add_spiral_body(position, rotation);
        let mut follow = FollowScraper::new(config.follow_offset);
        follow.bind(self.scraper);
        let controller =
            SpiralController::new(config.clone(), body, MeshData::new(), follow, physics, now)
                .context("failed to start spiral")?;

        let entity = world.spawn((
            Spiral,
            Transform::from_position_rotation(position, rotation),
            controller,
        ));
        self.spiral = Some(entity);
        self.engaged = true;

        log::info!("Scraper engaged at t={:.3}, growing spiral {:?}", now, entity);
        Ok(true)
    }

    /// Lift the scraper and release the current spiral. Ignored while not engaged.
    pub fn disengage(
        &mut self,
        world: &mut World,
        physics: &mut PhysicsWorld,
        now: f32,
    ) -> Result<bool> {
        if !self.engaged {
            return Ok(false);
        }

        self.move_scraper(world, -SCRAPER_DROP)?;
        self.engaged = false;

        if let Some(entity) = self.spiral.take() {
            match world.get::<&mut SpiralController>(entity) {
                Ok(mut controller) => {
                    controller.stop_scraping(now, physics);
                }
                Err(_) => log::warn!("Spiral {:?} gone before it was released", entity),
            }
        }

        log::info!("Scraper lifted at t={:.3}", now);
        Ok(true)
    }

    fn move_scraper(&self, world: &mut World, delta: Vec3) -> Result<Vec3> {
        let mut transform = world
            .get::<&mut Transform>(self.scraper)
            .context("scraper entity has no transform")?;
        transform.translate(delta);
        Ok(transform.position)
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn current_spiral(&self) -> Option<Entity> {
        self.spiral
    }

    pub fn scraper(&self) -> Entity {
        self.scraper
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::spawn_scraper;
    use crate::spiral::SpiralPhase;

    fn setup() -> (World, PhysicsWorld, ScrapeSession) {
        let mut world = World::new();
        let scraper = spawn_scraper(&mut world, Vec3::new(0.0, 1.0, 0.0), Vec3::ZERO);
        (world, PhysicsWorld::new(), ScrapeSession::new(scraper))
    }

    fn scraper_y(world: &World, session: &ScrapeSession) -> f32 {
        world.get::<&Transform>(session.scraper()).unwrap().position.y
    }

    #[test]
    fn engage_drops_scraper_and_spawns_spiral() {
        let (mut world, mut physics, mut session) = setup();
        let config = SpiralConfig::default();

        assert!(session.engage(&mut world, &mut physics, &config, 0.0).unwrap());
        assert!(session.is_engaged());
        assert_eq!(scraper_y(&world, &session), 0.0);

        let spiral = session.current_spiral().unwrap();
        let controller = world.get::<&SpiralController>(spiral).unwrap();
        assert_eq!(controller.phase(), SpiralPhase::Scraping);
        assert_eq!(controller.follow().active_target(), Some(session.scraper()));
        let t = world.get::<&Transform>(spiral).unwrap();
        let expected = config.starting_rotation();
        for p in [Vec3::X, Vec3::Y, Vec3::Z] {
            assert!((t.rotation * p - expected * p).length() < 1e-6);
        }
    }

    #[test]
    fn engage_is_ignored_while_engaged() {
        let (mut world, mut physics, mut session) = setup();
        let config = SpiralConfig::default();
        session.engage(&mut world, &mut physics, &config, 0.0).unwrap();
        let first = session.current_spiral();

        assert!(!session.engage(&mut world, &mut physics, &config, 0.5).unwrap());
        assert_eq!(session.current_spiral(), first);
        assert_eq!(scraper_y(&world, &session), 0.0);
        assert_eq!(world.query::<&SpiralController>().iter().count(), 1);
    }

    #[test]
    fn disengage_lifts_scraper_and_releases_spiral() {
        let (mut world, mut physics, mut session) = setup();
        assert!(!session.disengage(&mut world, &mut physics, 0.0).unwrap());
        assert_eq!(scraper_y(&world, &session), 1.0);

        session
            .engage(&mut world, &mut physics, &SpiralConfig::default(), 0.0)
            .unwrap();
        let spiral = session.current_spiral().unwrap();

        assert!(session.disengage(&mut world, &mut physics, 1.0).unwrap());
        assert!(!session.is_engaged());
        assert_eq!(session.current_spiral(), None);
        assert_eq!(scraper_y(&world, &session), 1.0);

        let controller = world.get::<&SpiralController>(spiral).unwrap();
        assert_eq!(controller.phase(), SpiralPhase::Released);
        assert_eq!(controller.release_time(), Some(1.0));

        drop(controller);
        assert!(!session.disengage(&mut world, &mut physics, 2.0).unwrap());
        assert_eq!(scraper_y(&world, &session), 1.0);
    }
}
