//! Fixed-window waveform and spectrum analyser.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::collections::VecDeque;
use std::f32::consts::PI;
use std::sync::Arc;

use crate::params::audio_constants::FFT_SIZE;
use crate::params::{AnalyserConfig, SampleMode};

/// Keeps the most recent `FFT_SIZE` mono samples and turns them into
/// byte readings on demand.
pub struct Analyser {
    config: AnalyserConfig,
    window: VecDeque<f32>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// Smoothed magnitudes carried between frequency reads
    smoothed: Vec<f32>,
}

impl Analyser {
    pub fn new(config: AnalyserConfig) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(FFT_SIZE);
        Self {
            config,
            window: VecDeque::from(vec![0.0; FFT_SIZE]),
            fft,
            scratch: vec![Complex::new(0.0, 0.0); FFT_SIZE],
            smoothed: vec![0.0; FFT_SIZE / 2],
        }
    }

    /// Append mono samples, discarding anything older than the window
    pub fn push_samples<I: IntoIterator<Item = f32>>(&mut self, samples: I) {
        for s in samples {
            self.window.push_back(s);
        }
        while self.window.len() > FFT_SIZE {
            self.window.pop_front();
        }
    }

    /// Fill `out` with the configured reading
    pub fn read(&mut self, out: &mut [u8]) {
        match self.config.mode {
            SampleMode::TimeDomain => self.time_domain_bytes(out),
            SampleMode::Frequency => self.frequency_bytes(out),
        }
    }

    /// Waveform bytes, oldest sample of the window first; 128 is silence.
    ///
    /// Only the first `min(out.len(), FFT_SIZE)` slots are written.
    pub fn time_domain_bytes(&self, out: &mut [u8]) {
        for (slot, &sample) in out.iter_mut().zip(self.window.iter()) {
            *slot = (128.0 * (1.0 + sample)).clamp(0.0, 255.0) as u8;
        }
    }

    /// Smoothed spectrum bytes, one per bin from DC upwards
    pub fn frequency_bytes(&mut self, out: &mut [u8]) {
        for (i, (dst, &sample)) in self.scratch.iter_mut().zip(self.window.iter()).enumerate() {
            *dst = Complex::new(sample * blackman_window(i, FFT_SIZE), 0.0);
        }
        self.fft.process(&mut self.scratch);

        let tau = self.config.smoothing_time_constant;
        let scale = 1.0 / FFT_SIZE as f32;
        for (smoothed, bin) in self.smoothed.iter_mut().zip(&self.scratch) {
            let magnitude = bin.norm() * scale;
            let next = tau * *smoothed + (1.0 - tau) * magnitude;
            *smoothed = if next.is_finite() { next } else { 0.0 };
        }

        let min_db = self.config.min_decibels;
        let range = self.config.max_decibels - min_db;
        for (slot, &magnitude) in out.iter_mut().zip(&self.smoothed) {
            *slot = if magnitude > 0.0 {
                let db = 20.0 * magnitude.log10();
                (255.0 * (db - min_db) / range).clamp(0.0, 255.0) as u8
            } else {
                0
            };
        }
    }
}

/// Average interleaved frames down to mono
pub fn downmix(interleaved: &[f32], channels: usize) -> impl Iterator<Item = f32> + '_ {
    interleaved
        .chunks(channels.max(1))
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
}

/// Blackman window (alpha = 0.16)
pub fn blackman_window(index: usize, size: usize) -> f32 {
    let alpha = 0.16;
    let a0 = 0.5 * (1.0 - alpha);
    let a1 = 0.5;
    let a2 = 0.5 * alpha;
    let x = index as f32 / size as f32;
    a0 - a1 * (2.0 * PI * x).cos() + a2 * (4.0 * PI * x).cos()
}
