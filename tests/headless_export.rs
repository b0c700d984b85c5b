//! End-to-end: WAV in, SVG frames out.

use std::fs;
use std::path::PathBuf;

use sparkwave::headless::{self, HeadlessOptions};
use sparkwave::params::AnalyserConfig;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sparkwave-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// 16-bit mono WAV: `loud_frames` frames of a positive DC offset, then silence
fn write_wav(path: &PathBuf, sample_rate: u32, fps: u32, loud_frames: u32, quiet_frames: u32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    let per_frame = sample_rate / fps;
    for _ in 0..loud_frames * per_frame {
        writer.write_sample(i16::MAX / 2).unwrap();
    }
    for _ in 0..quiet_frames * per_frame {
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();
}

#[test]
fn test_export_spawns_then_ages() {
    let dir = scratch_dir("export");
    let wav = dir.join("input.wav");
    write_wav(&wav, 48_000, 60, 1, 2);

    let out = dir.join("frames");
    let written = headless::run(&HeadlessOptions {
        input: wav,
        output_dir: out.clone(),
        frames: None,
        analyser: AnalyserConfig::default(),
        fps: 60,
        seed: Some(9),
    })
    .unwrap();

    assert_eq!(written, 3);

    let count = |frame: usize| {
        let doc = fs::read_to_string(out.join(format!("frame_{:05}.svg", frame))).unwrap();
        doc.matches("<circle").count()
    };
    // Half-scale DC reads as byte 191 in every slot: one spark each
    assert_eq!(count(0), 16);
    // Silence spawns nothing; the first batch is still alive
    assert_eq!(count(1), 16);
    assert_eq!(count(2), 16);
    assert!(!out.join("frame_00003.svg").exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_export_respects_frame_limit() {
    let dir = scratch_dir("limit");
    let wav = dir.join("input.wav");
    write_wav(&wav, 8_000, 50, 0, 10);

    let out = dir.join("frames");
    let written = headless::run(&HeadlessOptions {
        input: wav,
        output_dir: out.clone(),
        frames: Some(4),
        analyser: AnalyserConfig::default(),
        fps: 50,
        seed: Some(1),
    })
    .unwrap();

    assert_eq!(written, 4);
    assert_eq!(fs::read_dir(&out).unwrap().count(), 4);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_export_missing_input_fails() {
    let dir = scratch_dir("missing");
    let result = headless::run(&HeadlessOptions {
        input: dir.join("nope.wav"),
        output_dir: dir.join("frames"),
        frames: None,
        analyser: AnalyserConfig::default(),
        fps: 60,
        seed: None,
    });
    assert!(result.is_err());
    let _ = fs::remove_dir_all(&dir);
}
