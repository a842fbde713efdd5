//! Headless spiral scraper run.
//!
//! Runs at a fixed tick rate. The trigger is scripted from the config:
//! it goes down at `press_at` and up at `release_at`.

use anyhow::Result;
use game::{ScrapeSim, SimConfig};
use input::{ElementState, MouseButton};
use std::path::Path;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load_from(Path::new(&path)),
        None => SimConfig::load(),
    };

    log::info!(
        "Starting spiral scraper: {} Hz for {:.1}s, trigger down at {:.2}s, up at {:.2}s",
        config.tick_rate_hz,
        config.duration_seconds,
        config.press_at,
        config.release_at
    );

    let mut sim = ScrapeSim::new(config.clone());
    let mut pressed = false;
    let mut released = false;

    while sim.time().elapsed_seconds() < config.duration_seconds {
        let now = sim.time().elapsed_seconds();
        if !pressed && now >= config.press_at {
            sim.input_mut()
                .process_mouse_button(MouseButton::Left, ElementState::Pressed);
            pressed = true;
        }
        if pressed && !released && now >= config.release_at {
            sim.input_mut()
                .process_mouse_button(MouseButton::Left, ElementState::Released);
            released = true;
        }

        sim.step()?;

        if let Some(vertices) = sim.growing_vertex_count() {
            log::debug!("t={:.3}: spiral has {} vertices", now, vertices);
        }
    }

    log::info!(
        "Finished after {} ticks, {} spiral(s) still alive",
        sim.time().frame_count(),
        sim.spiral_count()
    );
    Ok(())
}
