//! Capture bootstrap: open the amplitude source once the user hits Play.

use std::path::PathBuf;

use crate::audio::{AmplitudeSource, MicCapture, WavSource};
use crate::driver::FrameDriver;
use crate::error::CaptureError;
use crate::params::{AnalyserConfig, RecordingConfig};

/// Where samples come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Default capture device
    Microphone,
    /// Decoded file, replayed at the frame rate
    WavFile(PathBuf),
}

/// Build the analysis pipeline for `input`
pub fn open_source(
    input: &InputSource,
    analyser: AnalyserConfig,
    recording: Option<&RecordingConfig>,
    fps: u32,
) -> Result<Box<dyn AmplitudeSource>, CaptureError> {
    match input {
        InputSource::Microphone => Ok(Box::new(MicCapture::start(analyser, recording)?)),
        InputSource::WavFile(path) => Ok(Box::new(WavSource::open(path, analyser, fps)?)),
    }
}

/// Open a source and, only if that worked, start the driver.
///
/// A failure leaves the driver idle so the entry screen stays up; the
/// caller may try again on the next Play.
pub fn play<F>(driver: &mut FrameDriver, open: F) -> Option<Box<dyn AmplitudeSource>>
where
    F: FnOnce() -> Result<Box<dyn AmplitudeSource>, CaptureError>,
{
    match open() {
        Ok(source) => {
            driver.start();
            Some(source)
        }
        Err(e) => {
            log::warn!("Audio capture unavailable: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::audio_constants::SampleBuffer;
    use crate::params::ParticlePhysics;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Silence;

    impl AmplitudeSource for Silence {
        fn read_samples(&mut self, out: &mut SampleBuffer) {
            out.fill(128);
        }
    }

    fn driver() -> FrameDriver {
        FrameDriver::new(ParticlePhysics::default(), StdRng::seed_from_u64(0))
    }

    #[test]
    fn test_play_success_starts_driver() {
        let mut driver = driver();
        let source = play(&mut driver, || Ok(Box::new(Silence) as Box<dyn AmplitudeSource>));
        assert!(source.is_some());
        assert!(driver.is_running());
    }

    #[test]
    fn test_play_failure_stays_idle() {
        let mut driver = driver();
        let source = play(&mut driver, || Err(CaptureError::NoDevice));
        assert!(source.is_none());
        assert!(!driver.is_running());

        // A second attempt is just another call
        let source = play(&mut driver, || Ok(Box::new(Silence) as Box<dyn AmplitudeSource>));
        assert!(source.is_some());
        assert!(driver.is_running());
    }

    #[test]
    fn test_open_missing_wav_fails() {
        let result = open_source(
            &InputSource::WavFile(PathBuf::from("missing.wav")),
            AnalyserConfig::default(),
            None,
            60,
        );
        assert!(matches!(result, Err(CaptureError::Wav { .. })));
    }
}
