use crate::{
    CoreResult, StoreError,
    audio::{AudioSource, CaptureRequest},
    recorder::CaptureGate,
    store::{Recording, RecordingStore},
};

use std::{panic::Location, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use tracing::{info, instrument};

/// Duration used when a request does not name one.
pub const DEFAULT_DURATION_SECS: f64 = 5.0;

/// Longest capture accepted by default.
pub const DEFAULT_MAX_DURATION_SECS: f64 = 300.0;

/// Upper bound for a configured maximum duration.
///
/// Capture buffers are sized from the request, so this bounds their memory.
pub const DURATION_CEILING_SECS: f64 = 1800.0;

/// Bounds applied to requested capture durations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationPolicy {
    /// Seconds captured when none are requested.
    pub default_secs: f64,
    /// Largest accepted request in seconds.
    pub max_secs: f64,
}

impl Default for DurationPolicy {
    fn default() -> Self {
        Self {
            default_secs: DEFAULT_DURATION_SECS,
            max_secs: DEFAULT_MAX_DURATION_SECS,
        }
    }
}

impl DurationPolicy {
    /// Resolves an optional request into a concrete capture length.
    ///
    /// Rejects non-finite, zero or negative values, anything above
    /// `max_secs`, and durations that round to zero samples at
    /// [`crate::RECORDING_SAMPLE_RATE`].
    #[track_caller]
    pub fn resolve(&self, requested: Option<f64>) -> CoreResult<Duration> {
        let seconds = requested.unwrap_or(self.default_secs);

        let invalid = || StoreError::InvalidDuration {
            seconds,
            max_seconds: self.max_secs,
            location: ErrorLocation::from(Location::caller()),
        };

        if !seconds.is_finite() || seconds <= 0.0 || seconds > self.max_secs {
            return Err(invalid());
        }

        let duration = Duration::from_secs_f64(seconds);
        if CaptureRequest::mono(duration).expected_frames() == 0 {
            return Err(invalid());
        }

        Ok(duration)
    }
}

/// Captures audio and stores it as a new recording.
///
/// Holds the capture gate for the whole capture-and-persist sequence, so at
/// most one recording is produced at a time per `Recorder`.
pub struct Recorder {
    source: Arc<dyn AudioSource>,
    store: RecordingStore,
    gate: CaptureGate,
    policy: DurationPolicy,
}

impl Recorder {
    /// Creates a recorder over `source` writing into `store`.
    pub fn new(source: Arc<dyn AudioSource>, store: RecordingStore, policy: DurationPolicy) -> Self {
        info!(source = source.name(), ?policy, "Recorder initialized");

        Self {
            source,
            store,
            gate: CaptureGate::new(),
            policy,
        }
    }

    /// Store the recorder writes into.
    pub fn store(&self) -> &RecordingStore {
        &self.store
    }

    /// Gate guarding the capture device.
    pub fn gate(&self) -> &CaptureGate {
        &self.gate
    }

    /// Records `duration_secs` (or the default) of mono audio.
    ///
    /// Blocks for the full capture duration.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidDuration`] for out-of-range durations,
    /// [`StoreError::CaptureBusy`] when another capture is in flight, and any
    /// device or write fault from capture and persistence.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn record(&self, duration_secs: Option<f64>) -> CoreResult<Recording> {
        let duration = self.policy.resolve(duration_secs)?;
        let _permit = self.gate.try_acquire()?;

        let request = CaptureRequest::mono(duration);
        let start = std::time::Instant::now();
        let samples = self.source.capture(&request)?;

        info!(
            duration_secs = duration.as_secs_f64(),
            sample_count = samples.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Capture complete"
        );

        let recording = self.store.persist(&samples, request.sample_rate)?;

        info!(recording_id = %recording.id, "Recording created");

        Ok(recording)
    }
}
