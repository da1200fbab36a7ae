use crate::{
    CoreResult, StoreError,
    audio::{AudioCapturer, AudioSource, CaptureRequest, Resampler},
};

use std::{panic::Location, thread, time::Duration};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

/// Largest shortfall, in seconds, that is made up with trailing silence.
///
/// Devices deliver audio in callback-sized blocks, so the last block of a
/// window can be missing when the stream is stopped.
const MAX_PAD_SECS: f64 = 0.05;

/// Extra recording time to absorb stream start-up latency.
const STARTUP_SLACK: Duration = Duration::from_millis(20);

/// Interleaved samples needed to hold `window` of device audio.
pub(crate) fn buffer_limit(window: Duration, device_rate: u32, device_channels: u16) -> usize {
    (window.as_secs_f64() * f64::from(device_rate) * f64::from(device_channels.max(1))).ceil()
        as usize
}

/// Averages interleaved frames down to a single channel.
pub(crate) fn downmix_to_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    match channels {
        0 | 1 => samples.to_vec(),
        n => {
            let n = usize::from(n);
            samples
                .chunks_exact(n)
                .map(|frame| frame.iter().sum::<f32>() / n as f32)
                .collect()
        }
    }
}

/// Trims or pads `samples` to exactly `expected` frames.
///
/// Returns `None` when more than `max_pad` frames are missing.
pub(crate) fn fit_to_length(
    mut samples: Vec<f32>,
    expected: usize,
    max_pad: usize,
) -> Option<Vec<f32>> {
    if samples.len() + max_pad < expected {
        return None;
    }
    samples.resize(expected, 0.0);
    Some(samples)
}

/// Default input device captured through cpal.
///
/// The device is opened per capture so the `!Send` cpal stream never leaves
/// the calling thread.
#[derive(Debug, Clone, Default)]
pub struct MicrophoneSource {
    device_name: Option<String>,
}

impl MicrophoneSource {
    /// Source for the named input device, or the host default for `None`.
    pub fn new(device_name: Option<String>) -> Self {
        Self { device_name }
    }
}

impl AudioSource for MicrophoneSource {
    #[track_caller]
    #[instrument(skip(self), fields(device = ?self.device_name))]
    fn capture(&self, request: &CaptureRequest) -> CoreResult<Vec<f32>> {
        request.ensure_mono()?;

        let mut capturer = AudioCapturer::open(self.device_name.as_deref())?;
        let device_rate = capturer.sample_rate();
        let device_channels = capturer.channels();

        let window = request.duration + STARTUP_SLACK;
        let limit = buffer_limit(window, device_rate, device_channels);

        capturer.start(limit)?;
        thread::sleep(window);
        let raw = capturer.stop()?;

        if raw.is_empty() {
            return Err(StoreError::NoAudioCaptured {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mono = downmix_to_mono(&raw, device_channels);
        let mono = if device_rate == request.sample_rate {
            mono
        } else {
            Resampler::new(device_rate, request.sample_rate)?.resample(&mono)?
        };

        let expected = request.expected_frames();
        let max_pad = (MAX_PAD_SECS * f64::from(request.sample_rate)) as usize;
        let captured = mono.len();

        let samples = fit_to_length(mono, expected, max_pad).ok_or_else(|| {
            warn!(captured, expected, "Device delivered too little audio");
            StoreError::NoAudioCaptured {
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        debug!(
            device_rate,
            device_channels,
            captured,
            expected,
            "Capture normalized"
        );
        info!(sample_count = samples.len(), "Microphone capture complete");

        Ok(samples)
    }

    fn name(&self) -> &'static str {
        "microphone"
    }
}
