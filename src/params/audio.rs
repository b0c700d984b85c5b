//! Amplitude analysis configuration and constants.

use clap::ValueEnum;

use crate::error::ConfigError;

/// Which analyser reading feeds the spawner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SampleMode {
    /// Raw waveform bytes, silence sits at 128
    #[default]
    #[value(name = "time")]
    TimeDomain,

    /// Smoothed dB magnitude per frequency bin
    #[value(name = "frequency")]
    Frequency,
}

/// Analyser configuration
#[derive(Debug, Clone)]
pub struct AnalyserConfig {
    /// Reading used by `Analyser::read`
    pub mode: SampleMode,

    /// Weight of the previous frame in frequency smoothing, in [0, 1]
    pub smoothing_time_constant: f32,

    /// dB value mapped to byte 0
    pub min_decibels: f32,

    /// dB value mapped to byte 255
    pub max_decibels: f32,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            mode: SampleMode::TimeDomain,
            smoothing_time_constant: 0.8,
            min_decibels: -100.0,
            max_decibels: -30.0,
        }
    }
}

impl AnalyserConfig {
    pub fn with_mode(self, mode: SampleMode) -> Self {
        Self { mode, ..self }
    }

    /// Validate configuration (smoothing in range, decibel range ordered)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.smoothing_time_constant) {
            return Err(ConfigError::Smoothing(self.smoothing_time_constant));
        }
        if self.min_decibels >= self.max_decibels {
            return Err(ConfigError::DecibelRange {
                min: self.min_decibels,
                max: self.max_decibels,
            });
        }
        Ok(())
    }
}

/// Audio constants (compile-time, fixed analysis window)
pub mod audio_constants {
    /// Analysis window (samples)
    pub const FFT_SIZE: usize = 32;

    /// Samples returned per query, one per palette slot
    pub const BIN_COUNT: usize = FFT_SIZE / 2;

    /// One frame's worth of analyser output
    pub type SampleBuffer = [u8; BIN_COUNT];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AnalyserConfig::default().validate().is_ok());
        assert_eq!(audio_constants::BIN_COUNT, 16);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = AnalyserConfig {
            smoothing_time_constant: 1.5,
            ..AnalyserConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Smoothing(_))));

        let config = AnalyserConfig {
            min_decibels: -20.0,
            max_decibels: -30.0,
            ..AnalyserConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DecibelRange { .. })
        ));
    }
}
