pub(crate) mod capture;
pub(crate) mod microphone;
mod resampler;
mod source;
mod tone;

pub(crate) use {capture::AudioCapturer, resampler::Resampler};

pub use {
    microphone::MicrophoneSource,
    source::{AudioSource, CaptureRequest, RECORDING_CHANNELS, RECORDING_SAMPLE_RATE},
    tone::ToneSource,
};
