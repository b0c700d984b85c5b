//! Rendering: particle circles on a square viewbox.
//!
//! `gpu` draws into the window with wgpu; `svg` writes one document per
//! frame for headless runs. Both consume the same particle slice.

mod gpu;
mod svg;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use std::path::PathBuf;

use crate::error::RenderError;
use crate::params::RecordingConfig;
use crate::particles::Particle;

pub use gpu::RenderSystem;
pub use svg::{to_svg, SvgRenderer};

/// Anything that can present one frame's particle set
pub trait Renderer {
    /// Replace the whole picture with `particles`
    fn draw(&mut self, particles: &[Particle]) -> Result<(), RenderError>;
}

/// Per-instance data for the circle shader
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Circle {
    pub center: [f32; 2],
    pub radius: f32,
    pub opacity: f32,
    /// Linear RGB
    pub color: [f32; 3],
    pub _padding: f32,
}

impl From<&Particle> for Circle {
    fn from(p: &Particle) -> Self {
        Self {
            center: [p.x, p.y],
            radius: p.size,
            opacity: p.opacity,
            color: p.color.to_linear(),
            _padding: 0.0,
        }
    }
}

/// Instance records for a particle set, in draw order
pub fn circles(particles: &[Particle]) -> Vec<Circle> {
    particles.iter().map(Circle::from).collect()
}

/// Frame numbering for a recording session.
///
/// Only frames drawn while armed are captured, so idle redraws before
/// Play or while paused never reach the disk and frame `n` is always the
/// `n`th simulated tick.
#[derive(Debug, Clone)]
pub struct FrameCapture {
    config: RecordingConfig,
    armed: bool,
    captured: usize,
}

impl FrameCapture {
    pub fn new(config: RecordingConfig) -> Self {
        Self {
            config,
            armed: false,
            captured: 0,
        }
    }

    /// Arm for frames that advanced the simulation, disarm for redraws
    pub fn set_armed(&mut self, armed: bool) {
        self.armed = armed;
    }

    /// Claim the path for the frame being drawn, if it should be saved
    pub fn next_path(&mut self) -> Option<PathBuf> {
        if !self.armed || self.is_complete() {
            return None;
        }
        let path = self.config.frame_path(self.captured);
        self.captured += 1;
        Some(path)
    }

    pub fn captured(&self) -> usize {
        self.captured
    }

    pub fn is_complete(&self) -> bool {
        self.captured >= self.config.total_frames()
    }

    pub fn config(&self) -> &RecordingConfig {
        &self.config
    }
}

/// Viewbox → clip space mapping (`clip = pos * scale + offset`)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ViewboxUniforms {
    pub scale: [f32; 2],
    pub offset: [f32; 2],
}

/// Fit a square viewbox of side `viewbox` into a `width`×`height` target,
/// centered and letterboxed, y pointing down.
pub fn viewbox_transform(width: u32, height: u32, viewbox: f32) -> ViewboxUniforms {
    let (w, h) = (width.max(1) as f32, height.max(1) as f32);
    // Fraction of each clip axis the viewbox occupies
    let fit = if w >= h {
        Vec2::new(h / w, 1.0)
    } else {
        Vec2::new(1.0, w / h)
    };
    let scale = Vec2::new(2.0, -2.0) * fit / viewbox;
    let offset = Vec2::new(-fit.x, fit.y);
    ViewboxUniforms {
        scale: scale.to_array(),
        offset: offset.to_array(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::PALETTE;

    fn to_clip(t: &ViewboxUniforms, x: f32, y: f32) -> (f32, f32) {
        (x * t.scale[0] + t.offset[0], y * t.scale[1] + t.offset[1])
    }

    #[test]
    fn test_square_target_fills_clip_space() {
        let t = viewbox_transform(800, 800, 256.0);
        assert_eq!(to_clip(&t, 0.0, 0.0), (-1.0, 1.0));
        assert_eq!(to_clip(&t, 256.0, 256.0), (1.0, -1.0));
        assert_eq!(to_clip(&t, 128.0, 128.0), (0.0, 0.0));
    }

    #[test]
    fn test_wide_target_is_pillarboxed() {
        let t = viewbox_transform(1600, 800, 256.0);
        assert_eq!(to_clip(&t, 0.0, 0.0), (-0.5, 1.0));
        assert_eq!(to_clip(&t, 256.0, 256.0), (0.5, -1.0));
    }

    #[test]
    fn test_tall_target_is_letterboxed() {
        let t = viewbox_transform(400, 800, 256.0);
        assert_eq!(to_clip(&t, 0.0, 0.0), (-1.0, 0.5));
        assert_eq!(to_clip(&t, 256.0, 256.0), (1.0, -0.5));
    }

    #[test]
    fn test_circle_from_particle() {
        let p = Particle {
            x: 12.0,
            y: 34.0,
            size: 5.0,
            opacity: 0.5,
            color: PALETTE[10],
            speed: 1.0,
            y_direction: -1.0,
        };
        let c = Circle::from(&p);
        assert_eq!(c.center, [12.0, 34.0]);
        assert_eq!(c.radius, 5.0);
        assert_eq!(c.opacity, 0.5);
        assert_eq!(c.color, PALETTE[10].to_linear());
        assert_eq!(std::mem::size_of::<Circle>(), 32);
    }

    #[test]
    fn test_capture_only_while_armed() {
        let mut capture = FrameCapture::new(RecordingConfig::new(1.0, 3));

        // Entry screen redraws before Play
        assert_eq!(capture.next_path(), None);
        assert_eq!(capture.next_path(), None);
        assert_eq!(capture.captured(), 0);

        capture.set_armed(true);
        assert_eq!(
            capture.next_path(),
            Some(PathBuf::from("recording/frames/frame_00000.png"))
        );

        // Paused: numbering resumes where it left off
        capture.set_armed(false);
        assert_eq!(capture.next_path(), None);
        capture.set_armed(true);
        assert_eq!(
            capture.next_path(),
            Some(PathBuf::from("recording/frames/frame_00001.png"))
        );
        assert_eq!(capture.captured(), 2);
        assert!(!capture.is_complete());
    }

    #[test]
    fn test_capture_stops_at_total_frames() {
        let mut capture = FrameCapture::new(RecordingConfig::new(1.0, 2));
        capture.set_armed(true);
        assert!(capture.next_path().is_some());
        assert!(capture.next_path().is_some());
        assert!(capture.is_complete());
        assert_eq!(capture.next_path(), None);
        assert_eq!(capture.captured(), capture.config().total_frames());
    }
}
