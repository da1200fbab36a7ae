//! Flat-directory recording storage.
//!
//! The directory listing is the only index: a recording exists exactly when
//! `<id>` is present in the storage directory. New files are written under a
//! `.partial` name and renamed into place once complete, so readers never see
//! a truncated WAV.

use crate::{
    CoreResult, StoreError,
    store::{Recording, RecordingId, wav},
};

use std::{
    fs,
    io::{BufWriter, ErrorKind},
    panic::Location,
    path::{Path, PathBuf},
    time::SystemTime,
};

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

/// Suffix for files still being written.
pub const PARTIAL_EXTENSION: &str = "partial";

/// Recording files in a single flat directory.
#[derive(Debug, Clone)]
pub struct RecordingStore {
    dir: PathBuf,
}

impl RecordingStore {
    /// Opens the store, creating `dir` and its parents if absent.
    ///
    /// Leftover `.partial` files from an interrupted write are removed.
    #[track_caller]
    #[instrument(skip(dir), fields(dir = ?dir.as_ref()))]
    pub fn open<P: AsRef<Path>>(dir: P) -> CoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();

        fs::create_dir_all(&dir).map_err(|source| StoreError::StorageUnavailable {
            path: dir.clone(),
            source,
            location: ErrorLocation::from(Location::caller()),
        })?;

        let store = Self { dir };
        let swept = store.sweep_partials()?;
        if swept > 0 {
            warn!(count = swept, "Removed interrupted recording writes");
        }

        info!(dir = ?store.dir, "Recording store opened");

        Ok(store)
    }

    /// Storage directory path.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Lists every stored recording in directory enumeration order.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn list(&self) -> CoreResult<Vec<Recording>> {
        let entries = fs::read_dir(&self.dir).map_err(|source| self.unavailable(source))?;

        let mut recordings = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| self.unavailable(source))?;

            let Some(id) = entry
                .file_name()
                .to_str()
                .and_then(|name| RecordingId::parse(name).ok())
            else {
                continue;
            };

            // The file can vanish between read_dir and stat.
            let metadata = match entry.metadata() {
                Ok(m) if m.is_file() => m,
                Ok(_) => continue,
                Err(e) => {
                    debug!(recording_id = %id, error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            let created = metadata
                .created()
                .or_else(|_| metadata.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);

            recordings.push(Recording::new(id, DateTime::<Utc>::from(created)));
        }

        debug!(count = recordings.len(), "Listed recordings");

        Ok(recordings)
    }

    /// Reads the full WAV payload of a recording.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn read(&self, id: &str) -> CoreResult<Vec<u8>> {
        let id = RecordingId::parse(id)?;
        let path = self.existing_file(&id)?;

        match fs::read(&path) {
            Ok(bytes) => {
                debug!(recording_id = %id, bytes = bytes.len(), "Recording read");
                Ok(bytes)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound {
                id: id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(source) => Err(StoreError::StorageUnavailable {
                path,
                source,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Permanently removes a recording.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn delete(&self, id: &str) -> CoreResult<()> {
        let id = RecordingId::parse(id)?;
        let path = self.existing_file(&id)?;

        match fs::remove_file(&path) {
            Ok(()) => {
                info!(recording_id = %id, "Recording deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound {
                id: id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(source) => Err(StoreError::WriteFailed {
                path,
                source,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Encodes `samples` into a new recording under a fresh identifier.
    ///
    /// The file only becomes visible once fully written and synced. On failure
    /// nothing is left behind.
    #[track_caller]
    #[instrument(skip(self, samples), fields(sample_count = samples.len()))]
    pub fn persist(&self, samples: &[f32], sample_rate: u32) -> CoreResult<Recording> {
        let id = RecordingId::generate();
        let final_path = self.path_of(&id);
        let partial_path = self.dir.join(format!("{}.{}", id, PARTIAL_EXTENSION));

        if let Err(e) = write_partial(&partial_path, samples, sample_rate) {
            remove_partial(&partial_path);
            return Err(e);
        }

        if let Err(source) = fs::rename(&partial_path, &final_path) {
            remove_partial(&partial_path);
            return Err(StoreError::WriteFailed {
                path: final_path,
                source,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        info!(recording_id = %id, sample_rate, "Recording persisted");

        Ok(Recording::new(id, Utc::now()))
    }

    fn path_of(&self, id: &RecordingId) -> PathBuf {
        self.dir.join(id.as_str())
    }

    /// Path of `id` if it names a regular file, matching what `list` reports.
    #[track_caller]
    fn existing_file(&self, id: &RecordingId) -> CoreResult<PathBuf> {
        let path = self.path_of(id);

        match fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => Ok(path),
            Ok(_) => Err(StoreError::NotFound {
                id: id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound {
                id: id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(source) => Err(StoreError::StorageUnavailable {
                path,
                source,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    #[track_caller]
    fn sweep_partials(&self) -> CoreResult<usize> {
        let entries = fs::read_dir(&self.dir).map_err(|source| self.unavailable(source))?;

        let mut removed = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == PARTIAL_EXTENSION) {
                match fs::remove_file(&path) {
                    Ok(()) => removed += 1,
                    Err(e) => warn!(path = ?path, error = %e, "Failed to remove partial recording"),
                }
            }
        }

        Ok(removed)
    }

    #[track_caller]
    fn unavailable(&self, source: std::io::Error) -> StoreError {
        StoreError::StorageUnavailable {
            path: self.dir.clone(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Removes a partial file, logging any failure other than it already being gone.
pub(crate) fn remove_partial(path: &Path) {
    match fs::remove_file(path) {
        Err(e) if e.kind() != ErrorKind::NotFound => {
            warn!(path = ?path, error = %e, "Failed to remove partial recording");
        }
        _ => {}
    }
}

#[track_caller]
fn write_partial(path: &Path, samples: &[f32], sample_rate: u32) -> CoreResult<()> {
    let write_failed = |source| StoreError::WriteFailed {
        path: path.to_path_buf(),
        source,
        location: ErrorLocation::from(Location::caller()),
    };

    let file = fs::File::create(path).map_err(write_failed)?;
    let mut writer = BufWriter::new(file);

    wav::encode_wav(samples, sample_rate, &mut writer)?;

    let file = writer
        .into_inner()
        .map_err(|e| write_failed(e.into_error()))?;
    file.sync_all().map_err(write_failed)?;

    Ok(())
}
