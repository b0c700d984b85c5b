//! Microphone capture feeding the analyser from the cpal callback.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample};
use hound::WavWriter;
use std::fs::File;
use std::io::BufWriter;
use std::sync::{Arc, Mutex, PoisonError};

use super::analyser::downmix;
use super::{AmplitudeSource, Analyser};
use crate::error::CaptureError;
use crate::params::audio_constants::SampleBuffer;
use crate::params::{AnalyserConfig, RecordingConfig};

type Recorder = WavWriter<BufWriter<File>>;

/// Live input stream from the default capture device
pub struct MicCapture {
    /// Input stream (kept alive; dropping it stops capture and finalizes the recording)
    _stream: cpal::Stream,

    /// Shared with the audio callback
    analyser: Arc<Mutex<Analyser>>,
}

impl MicCapture {
    /// Open the default input device and start streaming into a fresh analyser
    pub fn start(
        config: AnalyserConfig,
        recording: Option<&RecordingConfig>,
    ) -> Result<Self, CaptureError> {
        config.validate()?;

        let host = cpal::default_host();
        let device = host.default_input_device().ok_or(CaptureError::NoDevice)?;
        let supported = device.default_input_config()?;
        let sample_format = supported.sample_format();
        let stream_config: cpal::StreamConfig = supported.into();
        let sample_rate = stream_config.sample_rate.0;
        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());

        log::info!(
            "Audio input: {} @ {}Hz, {} channel(s), {:?}",
            device_name,
            sample_rate,
            stream_config.channels,
            sample_format
        );

        let recorder = recording
            .map(|rec| create_recorder(rec, sample_rate))
            .transpose()?;

        let analyser = Arc::new(Mutex::new(Analyser::new(config)));
        let sink = CaptureSink {
            analyser: Arc::clone(&analyser),
            recorder,
            channels: stream_config.channels as usize,
            mono: Vec::new(),
        };

        let stream = match sample_format {
            SampleFormat::F32 => build_input::<f32>(&device, &stream_config, sink),
            SampleFormat::I16 => build_input::<i16>(&device, &stream_config, sink),
            SampleFormat::U16 => build_input::<u16>(&device, &stream_config, sink),
            other => return Err(CaptureError::SampleFormat(other)),
        }?;

        stream.play()?;

        Ok(Self {
            _stream: stream,
            analyser,
        })
    }
}

impl AmplitudeSource for MicCapture {
    fn read_samples(&mut self, out: &mut SampleBuffer) {
        self.analyser
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .read(out);
    }
}

/// State owned by the audio callback
struct CaptureSink {
    analyser: Arc<Mutex<Analyser>>,
    recorder: Option<Recorder>,
    channels: usize,
    /// Reused downmix buffer
    mono: Vec<f32>,
}

impl CaptureSink {
    fn push(&mut self, interleaved: &[f32]) {
        self.mono.clear();
        self.mono.extend(downmix(interleaved, self.channels));

        self.analyser
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_samples(self.mono.iter().copied());

        if let Some(writer) = self.recorder.as_mut() {
            for &s in &self.mono {
                if let Err(e) = writer.write_sample(s) {
                    log::error!("Stopping audio recording: {}", e);
                    self.recorder = None;
                    break;
                }
            }
        }
    }
}

fn build_input<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut sink: CaptureSink,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let mut converted = Vec::new();
    device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            converted.clear();
            converted.extend(data.iter().map(|&s| f32::from_sample(s)));
            sink.push(&converted);
        },
        |err| log::error!("Audio input stream error: {}", err),
        None,
    )
}

fn create_recorder(config: &RecordingConfig, sample_rate: u32) -> Result<Recorder, CaptureError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let path = config.audio_path();
    log::info!("Recording audio to {}", path.display());
    WavWriter::create(&path, spec).map_err(|source| CaptureError::Wav { path, source })
}
