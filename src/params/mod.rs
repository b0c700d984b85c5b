//! Parameter definitions with units and documented semantics.
//!
//! Every magic number of the visualizer lives here:
//! - Viewbox units for positions and radii
//! - Per-frame factors for decay
//! - Byte units for waveform samples

mod audio;
mod palette;
mod particles;
mod render;

// Re-export all types
pub use audio::{audio_constants, AnalyserConfig, SampleMode};
pub use palette::{palette_color, Color, BACKGROUND, PALETTE};
pub use particles::ParticlePhysics;
pub use render::{RecordingConfig, RenderConfig};
