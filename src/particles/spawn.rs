//! Spawning: one particle per sample slot above the baseline.

use rand::Rng;

use super::Particle;
use crate::params::{palette_color, ParticlePhysics};

/// New particles for one sample buffer, in slot order.
///
/// A slot spawns only when its byte is strictly above the baseline; the
/// radius is half the excess, capped at `max_size`.
pub fn spawn<R: Rng + ?Sized>(
    samples: &[u8],
    physics: &ParticlePhysics,
    rng: &mut R,
) -> Vec<Particle> {
    samples
        .iter()
        .enumerate()
        .filter(|&(_, &value)| value > physics.baseline)
        .map(|(i, &value)| {
            let excess = (value - physics.baseline) as f32;
            Particle {
                x: physics.spawn_x,
                y: rng.gen::<f32>() * physics.viewbox_size,
                size: (excess / 2.0).min(physics.max_size),
                opacity: 1.0,
                color: palette_color(i),
                speed: rng.gen::<f32>() * physics.max_speed,
                y_direction: (rng.gen::<f32>() - 1.0) * physics.y_drift_scale,
            }
        })
        .collect()
}
