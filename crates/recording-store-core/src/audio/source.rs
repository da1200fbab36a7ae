use crate::{CoreResult, StoreError};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;

/// Sample rate every recording is stored at.
pub const RECORDING_SAMPLE_RATE: u32 = 44_100;

/// Channel count every recording is stored with.
pub const RECORDING_CHANNELS: u16 = 1;

/// Parameters for a single fixed-length capture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureRequest {
    /// Length of audio to capture.
    pub duration: Duration,
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Output channel count.
    pub channels: u16,
}

impl CaptureRequest {
    /// Mono capture at [`RECORDING_SAMPLE_RATE`].
    pub fn mono(duration: Duration) -> Self {
        Self {
            duration,
            sample_rate: RECORDING_SAMPLE_RATE,
            channels: RECORDING_CHANNELS,
        }
    }

    /// Number of samples per channel the capture must produce.
    pub fn expected_frames(&self) -> usize {
        (self.duration.as_secs_f64() * f64::from(self.sample_rate)).round() as usize
    }

    /// Sources only produce single-channel audio.
    #[track_caller]
    pub fn ensure_mono(&self) -> CoreResult<()> {
        if self.channels == RECORDING_CHANNELS {
            return Ok(());
        }
        Err(StoreError::DeviceError {
            reason: format!("Unsupported channel count: {}", self.channels),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

/// Blocking capability that captures N seconds of PCM audio.
///
/// Implementations block the calling thread for the full duration. Callers on
/// an async runtime must move the call onto a blocking thread.
pub trait AudioSource: Send + Sync {
    /// Capture `request.duration` of audio and return exactly
    /// [`CaptureRequest::expected_frames`] interleaved samples per channel.
    fn capture(&self, request: &CaptureRequest) -> CoreResult<Vec<f32>>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}
