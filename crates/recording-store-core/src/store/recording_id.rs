use crate::{CoreResult, StoreError};

use std::{fmt, panic::Location};

use error_location::ErrorLocation;
use serde::Serialize;
use uuid::Uuid;

/// File extension every recording carries.
pub const RECORDING_EXTENSION: &str = "wav";

const MAX_ID_LEN: usize = 255;

/// Validated recording identifier, which is also the file name.
///
/// Only plain file names of the form `name.wav` built from ASCII
/// alphanumerics, `-`, `_` and `.` are accepted. Hidden names, `..` and any
/// path separator are rejected, so an id can always be joined onto the
/// storage directory without escaping it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordingId(String);

impl RecordingId {
    /// Fresh `<uuid-v4>.wav` identifier.
    pub fn generate() -> Self {
        Self(format!("{}.{}", Uuid::new_v4(), RECORDING_EXTENSION))
    }

    /// Parses a client-supplied identifier.
    ///
    /// Invalid identifiers are reported as [`StoreError::NotFound`]: nothing
    /// can be stored under them.
    #[track_caller]
    pub fn parse(raw: &str) -> CoreResult<Self> {
        if is_valid(raw) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(StoreError::NotFound {
                id: raw.to_owned(),
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid(raw: &str) -> bool {
    let Some(stem) = raw
        .strip_suffix(RECORDING_EXTENSION)
        .and_then(|s| s.strip_suffix('.'))
    else {
        return false;
    };

    !stem.is_empty()
        && raw.len() <= MAX_ID_LEN
        && !raw.starts_with('.')
        && !raw.contains("..")
        && raw
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
}

impl fmt::Display for RecordingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecordingId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
