//! Frame driver: the per-frame update-and-render cycle.
//!
//! The driver owns every piece of mutable state the animation needs and
//! threads the particle set through [`advance`] once per tick. Pacing is
//! external: a [`Scheduler`] for headless loops, or the window event loop
//! calling [`FrameDriver::tick`] whenever [`FixedRate::poll`] grants a frame.

use rand::rngs::StdRng;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::RenderError;
use crate::params::audio_constants::{SampleBuffer, BIN_COUNT};
use crate::params::ParticlePhysics;
use crate::particles::{advance, Particle};

pub use crate::audio::AmplitudeSource;
pub use crate::rendering::Renderer;

/// Whether ticks currently do anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    /// Nothing scheduled; the entry screen is showing
    Idle,
    /// One tick per frame
    Running,
}

/// Decides when the next frame happens
pub trait Scheduler {
    /// Block until the next frame is due; `false` ends the loop
    fn next_frame(&mut self) -> bool;
}

/// A fixed number of frames, as fast as possible
#[derive(Debug, Clone)]
pub struct FrameBudget {
    remaining: u64,
}

impl FrameBudget {
    pub fn new(frames: u64) -> Self {
        Self { remaining: frames }
    }
}

impl Scheduler for FrameBudget {
    fn next_frame(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// Frames at a target rate, optionally limited
///
/// Headless loops block in [`Scheduler::next_frame`]; the window loop
/// calls [`FixedRate::poll`] and sleeps until [`FixedRate::deadline`].
#[derive(Debug, Clone)]
pub struct FixedRate {
    interval: Duration,
    next_due: Option<Instant>,
    budget: Option<FrameBudget>,
}

impl FixedRate {
    pub fn new(fps: u32, frames: Option<u64>) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            next_due: None,
            budget: frames.map(FrameBudget::new),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the next frame is due (`None` before the first one)
    pub fn deadline(&self) -> Option<Instant> {
        self.next_due
    }

    /// Claim a frame if one is due at `now`, without blocking
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.next_due.is_some_and(|due| due > now) {
            return false;
        }
        if !self.take_budget() {
            return false;
        }
        self.schedule_after(now);
        true
    }

    fn take_budget(&mut self) -> bool {
        self.budget.as_mut().map_or(true, FrameBudget::next_frame)
    }

    fn schedule_after(&mut self, now: Instant) {
        let next = self.next_due.unwrap_or(now) + self.interval;
        // Late frames don't try to catch up
        self.next_due = Some(if next > now { next } else { now + self.interval });
    }
}

impl Scheduler for FixedRate {
    fn next_frame(&mut self) -> bool {
        if !self.take_budget() {
            return false;
        }
        let now = Instant::now();
        if let Some(due) = self.next_due.filter(|&due| due > now) {
            thread::sleep(due - now);
        }
        self.schedule_after(Instant::now());
        true
    }
}

/// Particle state, latest samples and the playing phase
pub struct FrameDriver {
    phase: DriverPhase,
    particles: Vec<Particle>,
    samples: SampleBuffer,
    physics: ParticlePhysics,
    rng: StdRng,
    frames: u64,
}

impl FrameDriver {
    pub fn new(physics: ParticlePhysics, rng: StdRng) -> Self {
        Self {
            phase: DriverPhase::Idle,
            particles: Vec::new(),
            samples: [physics.baseline; BIN_COUNT],
            physics,
            rng,
            frames: 0,
        }
    }

    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == DriverPhase::Running
    }

    pub fn start(&mut self) {
        if self.phase == DriverPhase::Idle {
            log::info!("Frame driver running");
            self.phase = DriverPhase::Running;
        }
    }

    /// Stop scheduling; particles stay where they are
    pub fn stop(&mut self) {
        if self.phase == DriverPhase::Running {
            log::info!("Frame driver idle after {} frames", self.frames);
            self.phase = DriverPhase::Idle;
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Buffer used by the most recent tick
    pub fn samples(&self) -> &SampleBuffer {
        &self.samples
    }

    pub fn physics(&self) -> &ParticlePhysics {
        &self.physics
    }

    /// Ticks executed while running
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// One frame: age, spawn from the latest samples, render.
    /// Does nothing while idle.
    pub fn tick<A, R>(&mut self, source: &mut A, renderer: &mut R) -> Result<(), RenderError>
    where
        A: AmplitudeSource + ?Sized,
        R: Renderer + ?Sized,
    {
        if !self.is_running() {
            return Ok(());
        }

        source.read_samples(&mut self.samples);
        let previous = std::mem::take(&mut self.particles);
        self.particles = advance(previous, &self.samples, &self.physics, &mut self.rng);
        self.frames += 1;

        log::trace!(
            "frame {}: {} particles, samples {:?}",
            self.frames,
            self.particles.len(),
            self.samples
        );

        renderer.draw(&self.particles)
    }

    /// Tick until the driver stops or the scheduler runs out.
    /// Returns the number of frames rendered by this call.
    pub fn run<S, A, R>(
        &mut self,
        scheduler: &mut S,
        source: &mut A,
        renderer: &mut R,
    ) -> Result<u64, RenderError>
    where
        S: Scheduler + ?Sized,
        A: AmplitudeSource + ?Sized,
        R: Renderer + ?Sized,
    {
        let start = self.frames;
        while self.is_running() && scheduler.next_frame() {
            self.tick(source, renderer)?;
        }
        Ok(self.frames - start)
    }
}
