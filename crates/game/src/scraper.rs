//! The scraper: a transform moving at constant velocity that spirals peel off behind.

use engine_core::{Scraper, Transform, Velocity};
use glam::Vec3;
use hecs::{Entity, World};

/// Spawn the scraper entity.
pub fn spawn_scraper(world: &mut World, position: Vec3, velocity: Vec3) -> Entity {
    world.spawn((Scraper, Transform::from_position(position), Velocity::new(velocity)))
}

/// Advance every scraper by its velocity.
pub fn update_scraper_movement(world: &mut World, dt: f32) {
    for (_, (transform, velocity, _)) in
        world.query_mut::<(&mut Transform, &Velocity, &Scraper)>()
    {
        transform.translate(velocity.linear * dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scraper_moves_at_constant_velocity() {
        let mut world = World::new();
        let e = spawn_scraper(&mut world, Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 2.0));
        for _ in 0..10 {
            update_scraper_movement(&mut world, 0.1);
        }
        let t = world.get::<&Transform>(e).unwrap();
        assert!((t.position - Vec3::new(0.0, 1.0, 2.0)).length() < 1e-5);
    }
}
