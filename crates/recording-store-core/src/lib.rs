//! Recording Store Core Library
//!
//! Fixed-length audio capture (CPAL, Rubato) and flat-file WAV storage
//! (Hound) behind a single-admission capture gate.
//!
//! # Example
//!
//! ```no_run
//! use recording_store_core::{CoreResult, DurationPolicy, MicrophoneSource, Recorder, RecordingStore};
//!
//! use std::sync::Arc;
//!
//! fn main() -> CoreResult<()> {
//!     let store = RecordingStore::open("recordings")?;
//!     let recorder = Recorder::new(
//!         Arc::new(MicrophoneSource::default()),
//!         store,
//!         DurationPolicy::default(),
//!     );
//!
//!     let recording = recorder.record(Some(2.0))?;
//!     println!("Saved {}", recording.id);
//!     Ok(())
//! }
//! ```

mod audio;
mod error;
mod recorder;
mod store;

pub use {
    audio::{
        AudioSource, CaptureRequest, MicrophoneSource, RECORDING_CHANNELS, RECORDING_SAMPLE_RATE,
        ToneSource,
    },
    error::{Result as CoreResult, StoreError},
    recorder::{
        CaptureGate, CapturePermit, DEFAULT_DURATION_SECS, DEFAULT_MAX_DURATION_SECS,
        DURATION_CEILING_SECS, DurationPolicy, Recorder,
    },
    store::{PARTIAL_EXTENSION, RECORDING_EXTENSION, Recording, RecordingId, RecordingStore, wav},
};
