//! Aging: drift, shrink, fade and prune.

use rand::Rng;

use super::Particle;
use crate::params::ParticlePhysics;

/// Age every particle by one frame.
///
/// Particles at or below the opacity cutoff are dropped; the rest are
/// moved by their drift plus up to one unit of jitter, and scaled by
/// `physics.decay`. Order is preserved.
pub fn step<R: Rng + ?Sized>(
    particles: &[Particle],
    physics: &ParticlePhysics,
    rng: &mut R,
) -> Vec<Particle> {
    particles
        .iter()
        .filter(|p| p.opacity > physics.opacity_cutoff)
        .map(|p| Particle {
            x: p.x + rng.gen::<f32>() + p.speed,
            y: p.y + rng.gen::<f32>() * p.y_direction,
            size: p.size * physics.decay,
            opacity: p.opacity * physics.decay,
            ..*p
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::PALETTE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn particle(opacity: f32) -> Particle {
        Particle {
            x: 10.0,
            y: 100.0,
            size: 8.0,
            opacity,
            color: PALETTE[5],
            speed: 2.5,
            y_direction: -3.0,
        }
    }

    #[test]
    fn test_step_empty_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(step(&[], &ParticlePhysics::default(), &mut rng).is_empty());
    }

    #[test]
    fn test_step_decays_size_and_opacity() {
        let physics = ParticlePhysics::default();
        let mut rng = StdRng::seed_from_u64(2);
        let input = [particle(1.0), particle(0.5)];

        let output = step(&input, &physics, &mut rng);

        assert_eq!(output.len(), 2);
        for (before, after) in input.iter().zip(&output) {
            assert!(after.size < before.size);
            assert!(after.opacity < before.opacity);
            assert!((after.size - before.size * 0.99).abs() < 1e-6);
            assert!((after.opacity - before.opacity * 0.99).abs() < 1e-6);
        }
    }

    #[test]
    fn test_step_drift_bounds() {
        let physics = ParticlePhysics::default();
        let mut rng = StdRng::seed_from_u64(3);
        let before = particle(1.0);

        for _ in 0..100 {
            let after = step(&[before], &physics, &mut rng)[0];
            // x gains speed plus jitter in [0, 1)
            assert!(after.x >= before.x + before.speed);
            assert!(after.x <= before.x + before.speed + 1.0);
            // y moves by jitter * y_direction, never downwards in value
            assert!(after.y <= before.y);
            assert!(after.y >= before.y + before.y_direction);
            assert_eq!(after.speed, before.speed);
            assert_eq!(after.y_direction, before.y_direction);
            assert_eq!(after.color, before.color);
        }
    }

    #[test]
    fn test_step_drops_at_or_below_cutoff() {
        let physics = ParticlePhysics::default();
        let mut rng = StdRng::seed_from_u64(4);
        let input = [
            particle(0.9),
            particle(0.1),
            particle(0.05),
            particle(0.100_001),
        ];

        let output = step(&input, &physics, &mut rng);

        assert_eq!(output.len(), 2);
        assert!((output[0].opacity - 0.9 * 0.99).abs() < 1e-6);
        assert!((output[1].opacity - 0.100_001 * 0.99).abs() < 1e-6);
    }

    #[test]
    fn test_particle_eventually_expires() {
        let physics = ParticlePhysics::default();
        let mut rng = StdRng::seed_from_u64(5);
        let mut particles = vec![particle(1.0)];
        let mut frames = 0;
        while !particles.is_empty() {
            particles = step(&particles, &physics, &mut rng);
            frames += 1;
            assert!(frames < 1000);
        }
        // 0.99^229 ≈ 0.1003 survives; the next frame drops it
        assert_eq!(frames, 231);
    }
}
