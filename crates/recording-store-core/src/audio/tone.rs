use crate::{
    CoreResult,
    audio::{AudioSource, CaptureRequest},
};

use std::{f32::consts::TAU, thread};

use tracing::{debug, instrument};

const DEFAULT_FREQUENCY_HZ: f32 = 440.0;
const DEFAULT_AMPLITUDE: f32 = 0.25;

/// Synthetic sine-wave source for hosts without an input device.
#[derive(Debug, Clone, Copy)]
pub struct ToneSource {
    frequency_hz: f32,
    amplitude: f32,
    realtime: bool,
}

impl ToneSource {
    /// Tone at `frequency_hz`, returned without waiting.
    pub fn new(frequency_hz: f32) -> Self {
        Self {
            frequency_hz,
            amplitude: DEFAULT_AMPLITUDE,
            realtime: false,
        }
    }

    /// Block for the requested duration like a real device does.
    pub fn realtime(mut self) -> Self {
        self.realtime = true;
        self
    }

    /// Peak amplitude, clamped to [0.0, 1.0].
    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude.clamp(0.0, 1.0);
        self
    }
}

impl Default for ToneSource {
    fn default() -> Self {
        Self::new(DEFAULT_FREQUENCY_HZ)
    }
}

impl AudioSource for ToneSource {
    #[instrument(skip(self))]
    fn capture(&self, request: &CaptureRequest) -> CoreResult<Vec<f32>> {
        request.ensure_mono()?;

        if self.realtime {
            thread::sleep(request.duration);
        }

        let step = TAU * self.frequency_hz / request.sample_rate as f32;
        let samples: Vec<f32> = (0..request.expected_frames())
            .map(|i| self.amplitude * (step * i as f32).sin())
            .collect();

        debug!(sample_count = samples.len(), "Tone synthesized");

        Ok(samples)
    }

    fn name(&self) -> &'static str {
        "tone"
    }
}
