//! Headless renderer writing one SVG document per frame.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use super::Renderer;
use crate::error::RenderError;
use crate::params::BACKGROUND;
use crate::particles::Particle;

/// Serialize a particle set as a square-viewbox SVG document
pub fn to_svg(particles: &[Particle], viewbox: f32) -> String {
    let mut doc = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(
        doc,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {v} {v}" style="background:{bg}">"#,
        v = viewbox,
        bg = BACKGROUND.hex()
    );
    for p in particles {
        let _ = writeln!(
            doc,
            r#"  <circle cx="{:.3}" cy="{:.3}" r="{:.3}" fill="{}" opacity="{:.4}"/>"#,
            p.x,
            p.y,
            p.size,
            p.color.hex(),
            p.opacity
        );
    }
    doc.push_str("</svg>\n");
    doc
}

/// Writes `frame_NNNNN.svg` files into a directory
pub struct SvgRenderer {
    dir: PathBuf,
    viewbox: f32,
    frame: usize,
}

impl SvgRenderer {
    /// Create the output directory if needed
    pub fn new(dir: &Path, viewbox: f32) -> Result<Self, RenderError> {
        fs::create_dir_all(dir).map_err(|source| RenderError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(Self {
            dir: dir.to_path_buf(),
            viewbox,
            frame: 0,
        })
    }

    /// Frames written so far
    pub fn frames_written(&self) -> usize {
        self.frame
    }

    pub fn frame_path(&self, frame: usize) -> PathBuf {
        self.dir.join(format!("frame_{:05}.svg", frame))
    }
}

impl Renderer for SvgRenderer {
    fn draw(&mut self, particles: &[Particle]) -> Result<(), RenderError> {
        let path = self.frame_path(self.frame);
        fs::write(&path, to_svg(particles, self.viewbox))
            .map_err(|source| RenderError::Io { path, source })?;
        self.frame += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::PALETTE;

    #[test]
    fn test_empty_document() {
        let doc = to_svg(&[], 256.0);
        assert!(doc.starts_with("<svg"));
        assert!(doc.contains(r#"viewBox="0 0 256 256""#));
        assert!(!doc.contains("<circle"));
        assert!(doc.ends_with("</svg>\n"));
    }

    #[test]
    fn test_circle_attributes() {
        let p = Particle {
            x: -96.0,
            y: 10.5,
            size: 16.0,
            opacity: 1.0,
            color: PALETTE[3],
            speed: 4.0,
            y_direction: -2.0,
        };
        let doc = to_svg(&[p, p], 256.0);
        assert_eq!(doc.matches("<circle").count(), 2);
        assert!(doc.contains(
            r##"<circle cx="-96.000" cy="10.500" r="16.000" fill="#a16207" opacity="1.0000"/>"##
        ));
    }

    #[test]
    fn test_renderer_numbers_frames() {
        let dir = std::env::temp_dir().join(format!("sparkwave-svg-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        let mut renderer = SvgRenderer::new(&dir, 256.0).unwrap();
        assert_eq!(renderer.frames_written(), 0);
        renderer.draw(&[]).unwrap();
        renderer.draw(&[]).unwrap();
        assert_eq!(renderer.frames_written(), 2);
        assert!(dir.join("frame_00000.svg").exists());
        assert!(dir.join("frame_00001.svg").exists());
        assert!(!dir.join("frame_00002.svg").exists());

        fs::remove_dir_all(&dir).unwrap();
    }
}
