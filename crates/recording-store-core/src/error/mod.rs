use error_location::ErrorLocation;
use thiserror::Error;

/// Capture and storage errors with source location tracking.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No audio input device found.
    #[error("No microphone found {location}")]
    NoMicrophoneFound {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Audio device operation failed.
    #[error("Audio device error: {reason} {location}")]
    DeviceError {
        /// Description of the device error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The device produced no samples for the capture window.
    #[error("No audio captured {location}")]
    NoAudioCaptured {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Audio resampling failed.
    #[error("Resampling error: {reason} {location}")]
    ResamplingError {
        /// Description of the resampling error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// WAV encoding or decoding failed.
    #[error("WAV encoding error: {reason} {location}")]
    EncodingError {
        /// Description of the codec error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Another capture currently holds the input device.
    #[error("Capture device busy {location}")]
    CaptureBusy {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Requested capture duration is out of range.
    #[error("Invalid duration: {seconds}s (must be > 0 and <= {max_seconds}s) {location}")]
    InvalidDuration {
        /// Requested duration in seconds.
        seconds: f64,
        /// Largest accepted duration in seconds.
        max_seconds: f64,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// No recording is stored under the identifier.
    #[error("Recording not found: {id} {location}")]
    NotFound {
        /// Identifier as supplied by the caller.
        id: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The storage directory cannot be created or read.
    #[error("Storage unavailable at {path:?}: {source} {location}")]
    StorageUnavailable {
        /// Storage directory path.
        path: std::path::PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Writing a recording file failed.
    #[error("Failed to write recording {path:?}: {source} {location}")]
    WriteFailed {
        /// Path being written.
        path: std::path::PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl StoreError {
    /// True for failures of the capture device itself.
    pub fn is_device_fault(&self) -> bool {
        matches!(
            self,
            StoreError::NoMicrophoneFound { .. }
                | StoreError::DeviceError { .. }
                | StoreError::NoAudioCaptured { .. }
        )
    }
}

/// Result type alias using [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
