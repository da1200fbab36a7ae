mod gate;
#[allow(clippy::module_inception)]
mod recorder;

pub use {
    gate::{CaptureGate, CapturePermit},
    recorder::{
        DEFAULT_DURATION_SECS, DEFAULT_MAX_DURATION_SECS, DURATION_CEILING_SECS, DurationPolicy,
        Recorder,
    },
};
