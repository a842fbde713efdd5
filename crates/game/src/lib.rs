//! Spiral scraper gameplay: a scraper peels curling ribbons off a surface while it is held down.
//!
//! - [`spiral`]: growth, release and disposal of one spiral
//! - [`session`]: engage/disengage handling
//! - [`sim`]: the fixed-step system schedule over a hecs world

pub mod config;
pub mod follow;
pub mod scraper;
pub mod session;
pub mod sim;
pub mod spiral;

pub use config::*;
pub use sim::ScrapeSim;
