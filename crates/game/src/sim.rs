//! Fixed-step simulation: runs the scrape systems in order over one hecs world.

use crate::config::SimConfig;
use crate::scraper::{spawn_scraper, update_scraper_movement};
use crate::session::ScrapeSession;
use crate::spiral::{SpiralController, SpiralPhase};
use anyhow::Result;
use engine_core::{Time, Transform};
use glam::Vec3;
use hecs::{Entity, World};
use input::{InputState, Trigger};
use physics::PhysicsWorld;

/// Everything a headless scrape run needs.
pub struct ScrapeSim {
    world: World,
    physics: PhysicsWorld,
    time: Time,
    input: InputState,
    trigger: Trigger,
    session: ScrapeSession,
    config: SimConfig,
}

impl ScrapeSim {
    pub fn new(config: SimConfig) -> Self {
        let config = config.sanitized();
        let mut world = World::new();
        let time = Time::with_fixed_rate(config.tick_rate_hz);

        let mut physics = PhysicsWorld::new();
        physics.set_timestep(time.fixed_timestep_seconds());
        physics.add_ground_plane();

        let scraper = spawn_scraper(
            &mut world,
            config.scraper.start_position,
            config.scraper.velocity,
        );

        Self {
            world,
            physics,
            time,
            input: InputState::new(),
            trigger: Trigger::default(),
            session: ScrapeSession::new(scraper),
            config,
        }
    }

    /// Bind the engage/disengage signal to a different input.
    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = trigger;
        self
    }

    /// Run one tick at the current time, then advance the clock.
    pub fn step(&mut self) -> Result<()> {
        let now = self.time.elapsed_seconds();
        let dt = self.time.fixed_timestep_seconds();

        if self.input.is_trigger_pressed(self.trigger) {
            self.session
                .engage(&mut self.world, &mut self.physics, &self.config.spiral, now)?;
        }
        if self.input.is_trigger_released(self.trigger) {
            self.session
                .disengage(&mut self.world, &mut self.physics, now)?;
        }

        // Scraper moves before spirals read its position.
        update_scraper_movement(&mut self.world, dt);
        self.update_follow();
        let disposed = self.update_spirals(now);

        self.physics.step();
        self.sync_released_transforms();
        self.dispose(disposed);

        self.time.advance();
        self.input.begin_frame();
        Ok(())
    }

    fn update_follow(&mut self) {
        let targets: Vec<(Entity, Vec3)> = self
            .world
            .query::<&SpiralController>()
            .iter()
            .filter_map(|(entity, controller)| {
                let target = controller.follow().active_target()?;
                let target_position = self.world.get::<&Transform>(target).ok()?.position;
                controller
                    .follow()
                    .follow(target_position)
                    .map(|position| (entity, position))
            })
            .collect();

        for (entity, position) in targets {
            if let Ok((transform, controller)) = self
                .world
                .query_one_mut::<(&mut Transform, &SpiralController)>(entity)
            {
                transform.position = position;
                self.physics
                    .set_kinematic_pose(controller.body(), position, transform.rotation);
            }
        }
    }

    fn update_spirals(&mut self, now: f32) -> Vec<Entity> {
        let mut disposed = Vec::new();
        for (entity, controller) in self.world.query_mut::<&mut SpiralController>() {
            if controller.tick(now) == SpiralPhase::Disposed {
                disposed.push(entity);
            }
        }
        disposed
    }

    fn sync_released_transforms(&mut self) {
        for (_, (transform, controller)) in self
            .world
            .query_mut::<(&mut Transform, &SpiralController)>()
        {
            if controller.phase() != SpiralPhase::Released {
                continue;
            }
            if let Some(body_transform) = self.physics.get_body_transform(controller.body()) {
                *transform = body_transform;
            }
        }
    }

    fn dispose(&mut self, entities: Vec<Entity>) {
        for entity in entities {
            let body = self
                .world
                .get::<&SpiralController>(entity)
                .map(|c| c.body())
                .ok();
            if let Some(body) = body {
                self.physics.remove_body(body);
            }
            if self.world.despawn(entity).is_err() {
                log::warn!("Spiral {:?} was already despawned", entity);
            } else {
                log::info!("Spiral {:?} disposed", entity);
            }
        }
    }

    pub fn spiral_count(&self) -> usize {
        self.world.query::<&SpiralController>().iter().count()
    }

    /// Vertex count of the spiral currently being scraped, if any.
    pub fn growing_vertex_count(&self) -> Option<usize> {
        let entity = self.session.current_spiral()?;
        let controller = self.world.get::<&SpiralController>(entity).ok()?;
        Some(controller.mesh().vertex_count())
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn session(&self) -> &ScrapeSession {
        &self.session
    }
}
