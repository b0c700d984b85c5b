//! Sparkwave library - audio-reactive particles

pub mod audio;
pub mod bootstrap;
pub mod cli;
pub mod driver;
pub mod error;
pub mod headless;
pub mod params;
pub mod particles;
pub mod rendering;
