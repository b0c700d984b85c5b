//! WAV replay, paced at one frame's worth of samples per query.

use std::path::Path;

use super::analyser::downmix;
use super::{AmplitudeSource, Analyser};
use crate::error::CaptureError;
use crate::params::audio_constants::SampleBuffer;
use crate::params::AnalyserConfig;

/// A decoded WAV file played back through an analyser
pub struct WavSource {
    samples: Vec<f32>,
    cursor: usize,
    samples_per_frame: usize,
    analyser: Analyser,
}

impl WavSource {
    /// Decode `path` (integer or float PCM, any channel count) to mono
    pub fn open(path: &Path, config: AnalyserConfig, fps: u32) -> Result<Self, CaptureError> {
        config.validate()?;

        let wav_err = |source| CaptureError::Wav {
            path: path.to_path_buf(),
            source,
        };
        let reader = hound::WavReader::open(path).map_err(wav_err)?;
        let spec = reader.spec();

        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(wav_err)?,
            hound::SampleFormat::Int => {
                let scale = 1.0 / (1u64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| v as f32 * scale))
                    .collect::<Result<_, _>>()
                    .map_err(wav_err)?
            }
        };
        let samples = downmix(&interleaved, spec.channels as usize).collect();

        log::info!(
            "Audio input: {} @ {}Hz, {} channel(s)",
            path.display(),
            spec.sample_rate,
            spec.channels
        );

        Ok(Self::from_samples(samples, spec.sample_rate, config, fps))
    }

    /// Replay already-decoded mono samples
    pub fn from_samples(samples: Vec<f32>, sample_rate: u32, config: AnalyserConfig, fps: u32) -> Self {
        let samples_per_frame = (sample_rate / fps.max(1)).max(1) as usize;
        Self {
            samples,
            cursor: 0,
            samples_per_frame,
            analyser: Analyser::new(config),
        }
    }

    /// Frames needed to play the whole file
    pub fn duration_frames(&self) -> usize {
        self.samples.len().div_ceil(self.samples_per_frame)
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.samples.len()
    }
}

impl AmplitudeSource for WavSource {
    fn read_samples(&mut self, out: &mut SampleBuffer) {
        let start = self.cursor.min(self.samples.len());
        let end = (start + self.samples_per_frame).min(self.samples.len());
        self.analyser.push_samples(self.samples[start..end].iter().copied());

        // Past the end the file reads as silence
        let missing = self.samples_per_frame - (end - start);
        self.analyser.push_samples(std::iter::repeat(0.0).take(missing));

        self.cursor = start + self.samples_per_frame;
        self.analyser.read(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_and_finish() {
        let mut source = WavSource::from_samples(vec![0.0; 2000], 48_000, AnalyserConfig::default(), 60);
        assert_eq!(source.duration_frames(), 3);

        let mut out: SampleBuffer = [0; 16];
        for _ in 0..3 {
            assert!(!source.is_finished());
            source.read_samples(&mut out);
        }
        assert!(source.is_finished());
    }

    #[test]
    fn test_reads_loud_then_silent() {
        // One frame of full-scale signal followed by one frame of silence
        let mut samples = vec![0.5; 800];
        samples.extend(vec![0.0; 800]);
        let mut source = WavSource::from_samples(samples, 48_000, AnalyserConfig::default(), 60);

        let mut out: SampleBuffer = [0; 16];
        source.read_samples(&mut out);
        assert_eq!(out, [192; 16]);

        source.read_samples(&mut out);
        assert_eq!(out, [128; 16]);

        // Past the end stays silent
        source.read_samples(&mut out);
        assert_eq!(out, [128; 16]);
    }

    #[test]
    fn test_open_missing_file() {
        let result = WavSource::open(
            Path::new("definitely/not/here.wav"),
            AnalyserConfig::default(),
            60,
        );
        assert!(matches!(result, Err(CaptureError::Wav { .. })));
    }
}
