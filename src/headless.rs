//! Headless export: replay a WAV file and write one SVG per frame.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use crate::audio::WavSource;
use crate::driver::{FrameBudget, FrameDriver};
use crate::error::HeadlessError;
use crate::params::{AnalyserConfig, ParticlePhysics};
use crate::rendering::SvgRenderer;

/// Options for one export run
#[derive(Debug, Clone)]
pub struct HeadlessOptions {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Frame limit; defaults to the length of the input
    pub frames: Option<u64>,
    pub analyser: AnalyserConfig,
    pub fps: u32,
    pub seed: Option<u64>,
}

/// Run the driver over the whole input. Returns frames written.
pub fn run(options: &HeadlessOptions) -> Result<u64, HeadlessError> {
    let physics = ParticlePhysics::default();
    let mut source = WavSource::open(&options.input, options.analyser.clone(), options.fps)?;
    let mut renderer = SvgRenderer::new(&options.output_dir, physics.viewbox_size)?;

    let frames = options
        .frames
        .unwrap_or(source.duration_frames() as u64);
    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    log::info!(
        "Exporting {} frames to {}",
        frames,
        options.output_dir.display()
    );

    let mut driver = FrameDriver::new(physics, rng);
    driver.start();
    let ticks = driver.run(&mut FrameBudget::new(frames), &mut source, &mut renderer)?;
    driver.stop();

    let written = renderer.frames_written() as u64;
    log::info!("Wrote {} frames in {} ticks", written, ticks);
    Ok(written)
}
