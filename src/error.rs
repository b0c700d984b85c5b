//! Error types for capture, rendering and configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid analyser parameters
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("smoothing time constant must be within [0, 1], got {0}")]
    Smoothing(f32),
    #[error("min decibels ({min}) must be below max decibels ({max})")]
    DecibelRange { min: f32, max: f32 },
}

/// Failure to open an amplitude source
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no audio input device available")]
    NoDevice,
    #[error("failed to query input config: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),
    #[error("failed to build input stream: {0}")]
    Build(#[from] cpal::BuildStreamError),
    #[error("failed to start input stream: {0}")]
    Play(#[from] cpal::PlayStreamError),
    #[error("unsupported sample format {0}")]
    SampleFormat(cpal::SampleFormat),
    #[error("wav {}: {source}", path.display())]
    Wav {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
    #[error("invalid analyser config: {0}")]
    Analyser(#[from] ConfigError),
}

/// Failure while setting up or drawing a frame
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter")]
    NoAdapter,
    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to save frame {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Failure of a headless export run
#[derive(Debug, Error)]
pub enum HeadlessError {
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    Render(#[from] RenderError),
}
