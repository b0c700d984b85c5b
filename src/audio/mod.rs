//! Amplitude sampling: microphone capture, WAV replay and the shared
//! fixed-window analyser both feed.

mod analyser;
mod capture;
mod wav;

use crate::params::audio_constants::SampleBuffer;

// Re-export public types
pub use analyser::{blackman_window, downmix, Analyser};
pub use capture::MicCapture;
pub use wav::WavSource;

/// Anything that can be queried once per frame for a sample buffer
pub trait AmplitudeSource {
    /// Overwrite `out` with the latest reading
    fn read_samples(&mut self, out: &mut SampleBuffer);
}
