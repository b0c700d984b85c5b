//! Sparkwave - audio-reactive particles
//!
//! Sound from the microphone bursts into colored sparks that drift in
//! from the left, one color per waveform slot, fading as they go.

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use sparkwave::audio::AmplitudeSource;
use sparkwave::bootstrap::{self, InputSource};
use sparkwave::cli::Args;
use sparkwave::driver::{FixedRate, FrameDriver};
use sparkwave::error::RenderError;
use sparkwave::headless;
use sparkwave::params::{AnalyserConfig, ParticlePhysics, RecordingConfig, RenderConfig};
use sparkwave::rendering::{RenderSystem, Renderer};

const IDLE_TITLE: &str = "Sparkwave - press Space or click to play";
const RUNNING_TITLE: &str = "Sparkwave";

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation
    driver: FrameDriver,
    source: Option<Box<dyn AmplitudeSource>>,
    pacer: FixedRate,
    /// Set when the pacer granted the next redraw a tick
    frame_due: bool,

    // Configuration
    input: InputSource,
    analyser_config: AnalyserConfig,
    render_config: RenderConfig,
    recording_config: Option<RecordingConfig>,
    fps: u32,
    autoplay: bool,
}

impl App {
    fn new(args: &Args, recording_config: Option<RecordingConfig>) -> Self {
        Self {
            window: None,
            render_system: None,
            driver: FrameDriver::new(ParticlePhysics::default(), args.rng()),
            source: None,
            pacer: FixedRate::new(args.fps, None),
            frame_due: false,
            input: args.input_source(),
            analyser_config: args.analyser_config(),
            render_config: args.render_config(),
            recording_config,
            fps: args.fps,
            autoplay: args.autoplay,
        }
    }

    /// Play pressed: open the source on first use, otherwise resume/pause
    fn toggle_play(&mut self) {
        if self.driver.is_running() {
            self.driver.stop();
        } else if self.source.is_some() {
            self.driver.start();
        } else {
            let (input, analyser, recording, fps) = (
                &self.input,
                self.analyser_config.clone(),
                self.recording_config.as_ref(),
                self.fps,
            );
            self.source = bootstrap::play(&mut self.driver, || {
                bootstrap::open_source(input, analyser, recording, fps)
            });
        }

        if let Some(window) = &self.window {
            window.set_title(if self.driver.is_running() {
                RUNNING_TITLE
            } else {
                IDLE_TITLE
            });
        }
    }

    /// Render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render_system) = self.render_system.as_mut() else {
            return;
        };

        // Only paced redraws advance the simulation; expose and resize
        // redraws repeat the current particle set
        let due = std::mem::take(&mut self.frame_due);
        let ticking = due && self.driver.is_running();
        render_system.set_capturing(ticking);

        let result = match self.source.as_mut() {
            Some(source) if ticking => self.driver.tick(source.as_mut(), render_system),
            // Idle: keep showing whatever is on screen
            _ => render_system.draw(self.driver.particles()),
        };

        match result {
            Ok(()) => {}
            Err(RenderError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                render_system.reconfigure();
            }
            Err(e) => log::error!("Render error: {}", e),
        }

        if render_system.recording_complete() {
            if let Some(ref config) = self.recording_config {
                log::info!(
                    "Recording complete: {} frames in {} ({} ticks)",
                    render_system.frames_captured(),
                    config.output_dir.display(),
                    self.driver.frames()
                );
            }
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else {
            return;
        };

        if self.pacer.poll(Instant::now()) {
            self.frame_due = true;
            window.request_redraw();
        }
        if let Some(deadline) = self.pacer.deadline() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        let window_attributes = Window::default_attributes()
            .with_title(IDLE_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let render_system = match pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            self.driver.physics().viewbox_size,
            self.render_config.initial_capacity,
            self.recording_config.clone(),
        )) {
            Ok(render_system) => render_system,
            Err(e) => {
                log::error!("Failed to initialize renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window);
        self.render_system = Some(render_system);

        log::info!("Press Space, Enter or click to play; Escape quits");

        if self.autoplay {
            self.toggle_play();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::Space | KeyCode::Enter => self.toggle_play(),
                _ => {}
            },
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } if !self.driver.is_running() => self.toggle_play(),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Some(options) = args.headless_options() {
        headless::run(&options)?;
        return Ok(());
    }

    log::info!("Sparkwave - audio-reactive particles");

    let recording_config = args.create_recording_config()?;
    if let Some(ref config) = recording_config {
        log::info!(
            "Recording {} frames to {}",
            config.total_frames(),
            config.output_dir.display()
        );
    }

    let mut app = App::new(&args, recording_config);
    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
