use crate::config::default_recordings_dir;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Recording storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding recordings, relative to the working directory unless absolute.
    #[serde(default = "default_recordings_dir")]
    pub recordings_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            recordings_dir: default_recordings_dir(),
        }
    }
}
