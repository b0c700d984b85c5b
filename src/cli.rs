//! Command-line argument parsing.

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::bootstrap::InputSource;
use crate::headless::HeadlessOptions;
use crate::params::{AnalyserConfig, RecordingConfig, RenderConfig, SampleMode};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "sparkwave")]
#[command(about = "Audio-reactive particles driven by your microphone", long_about = None)]
pub struct Args {
    /// Analyse a WAV file instead of the default microphone
    #[arg(long, value_name = "WAV")]
    pub input: Option<PathBuf>,

    /// Sample reading that spawns particles: time (waveform) or frequency (spectrum)
    #[arg(long, value_enum, default_value_t = SampleMode::TimeDomain)]
    pub mode: SampleMode,

    /// Seed for particle randomness (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Frame rate used to pace WAV replay, recording and export
    #[arg(long, default_value = "60")]
    pub fps: u32,

    /// Start capturing immediately instead of waiting for Play
    #[arg(long)]
    pub autoplay: bool,

    /// Window width (pixels)
    #[arg(long, default_value = "800")]
    pub width: u32,

    /// Window height (pixels)
    #[arg(long, default_value = "800")]
    pub height: u32,

    /// Record frames and captured audio to ./recording (duration in seconds)
    #[arg(long, value_name = "SECONDS", conflicts_with = "svg")]
    pub record: Option<f32>,

    /// Export SVG frames to DIR without opening a window (needs --input)
    #[arg(long, value_name = "DIR", requires = "input")]
    pub svg: Option<PathBuf>,

    /// Number of frames to export (defaults to the input length)
    #[arg(long, value_name = "N", requires = "svg")]
    pub frames: Option<u64>,
}

impl Args {
    pub fn input_source(&self) -> InputSource {
        match &self.input {
            Some(path) => InputSource::WavFile(path.clone()),
            None => InputSource::Microphone,
        }
    }

    pub fn analyser_config(&self) -> AnalyserConfig {
        AnalyserConfig::default().with_mode(self.mode)
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width,
            window_height: self.height,
            ..RenderConfig::default()
        }
    }

    /// Headless export options, when `--svg` was given
    pub fn headless_options(&self) -> Option<HeadlessOptions> {
        let output_dir = self.svg.clone()?;
        let input = self.input.clone()?;
        Some(HeadlessOptions {
            input,
            output_dir,
            frames: self.frames,
            analyser: self.analyser_config(),
            fps: self.fps,
            seed: self.seed,
        })
    }

    /// Create recording configuration (and its directories) if recording is enabled
    pub fn create_recording_config(&self) -> io::Result<Option<RecordingConfig>> {
        let Some(duration) = self.record else {
            return Ok(None);
        };
        let config = RecordingConfig::new(duration, self.fps);
        fs::create_dir_all(config.frames_dir())?;
        Ok(Some(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["sparkwave"]).unwrap();
        assert_eq!(args.input_source(), InputSource::Microphone);
        assert_eq!(args.mode, SampleMode::TimeDomain);
        assert_eq!(args.fps, 60);
        assert!(!args.autoplay);
        assert!(args.headless_options().is_none());
        assert!(args.create_recording_config().unwrap().is_none());
    }

    #[test]
    fn test_wav_input_and_frequency_mode() {
        let args =
            Args::try_parse_from(["sparkwave", "--input", "song.wav", "--mode", "frequency"])
                .unwrap();
        assert_eq!(
            args.input_source(),
            InputSource::WavFile(PathBuf::from("song.wav"))
        );
        assert_eq!(args.analyser_config().mode, SampleMode::Frequency);
    }

    #[test]
    fn test_svg_requires_input() {
        assert!(Args::try_parse_from(["sparkwave", "--svg", "out"]).is_err());

        let args = Args::try_parse_from([
            "sparkwave", "--svg", "out", "--input", "a.wav", "--frames", "10", "--seed", "3",
        ])
        .unwrap();
        let options = args.headless_options().unwrap();
        assert_eq!(options.output_dir, PathBuf::from("out"));
        assert_eq!(options.frames, Some(10));
        assert_eq!(options.seed, Some(3));
    }

    #[test]
    fn test_record_conflicts_with_svg() {
        let result = Args::try_parse_from([
            "sparkwave", "--svg", "out", "--input", "a.wav", "--record", "5",
        ]);
        assert!(result.is_err());
    }
}
