//! Particle motion and spawn parameters.

/// Particle simulation parameters (viewbox units, per-frame factors)
#[derive(Debug, Clone)]
pub struct ParticlePhysics {
    /// Side of the square viewbox the particles live in
    pub viewbox_size: f32,

    /// Multiplicative size and opacity factor applied every frame
    /// 0.99 ≈ 229 frames from full opacity down to the cutoff
    pub decay: f32,

    /// Particles at or below this opacity are dropped
    pub opacity_cutoff: f32,

    /// Spawn x, left of the viewbox so particles drift into view
    pub spawn_x: f32,

    /// Waveform byte value of silence
    pub baseline: u8,

    /// Largest spawn radius
    pub max_size: f32,

    /// Upper bound (exclusive) of the random horizontal drift per frame
    pub max_speed: f32,

    /// Vertical drift is drawn from (-y_drift_scale, 0]
    pub y_drift_scale: f32,
}

impl Default for ParticlePhysics {
    fn default() -> Self {
        Self {
            viewbox_size: 256.0,
            decay: 0.99,
            opacity_cutoff: 0.1,
            spawn_x: -96.0,
            baseline: 128,
            max_size: 16.0,
            max_speed: 10.0,
            y_drift_scale: 4.0,
        }
    }
}
