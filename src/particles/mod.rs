//! Particle records and the per-frame simulation rules.
//!
//! A frame is `advance`: age the previous set with [`step`], then append
//! whatever the current sample buffer [`spawn`]s. Both are pure apart from
//! the caller's RNG, so the driver threads the particle vector through
//! them instead of mutating shared state.

mod spawn;
mod step;

use rand::Rng;

use crate::params::{Color, ParticlePhysics};

pub use spawn::spawn;
pub use step::step;

/// One live particle in viewbox coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    /// Radius
    pub size: f32,
    pub opacity: f32,
    pub color: Color,
    /// Horizontal drift per frame, fixed at spawn
    pub speed: f32,
    /// Vertical drift factor, fixed at spawn (never positive)
    pub y_direction: f32,
}

/// Run one frame: age `particles`, then append spawns for `samples`
pub fn advance<R: Rng + ?Sized>(
    particles: Vec<Particle>,
    samples: &[u8],
    physics: &ParticlePhysics,
    rng: &mut R,
) -> Vec<Particle> {
    let mut next = step(&particles, physics, rng);
    next.extend(spawn(samples, physics, rng));
    next
}
