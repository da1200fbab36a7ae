mod audio_config;
#[allow(clippy::module_inception)]
mod config;
mod logging_config;
mod server_config;
mod storage_config;

pub(crate) use {
    audio_config::{AudioBackend, AudioConfig},
    config::{Config, LoadedConfig},
    logging_config::{LogFormat, LoggingConfig},
    server_config::ServerConfig,
    storage_config::StorageConfig,
};

use recording_store_core::{DEFAULT_DURATION_SECS, DEFAULT_MAX_DURATION_SECS};

use std::path::PathBuf;

pub(crate) const DEFAULT_HOST: &str = "127.0.0.1";
pub(crate) const DEFAULT_PORT: u16 = 5000;
pub(crate) const DEFAULT_RECORDINGS_DIR: &str = "recordings";

/// Environment variable overriding the config file location.
pub(crate) const CONFIG_PATH_ENV: &str = "RECORDING_STORE_CONFIG";

pub(crate) fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

pub(crate) fn default_port() -> u16 {
    DEFAULT_PORT
}

pub(crate) fn default_recordings_dir() -> PathBuf {
    PathBuf::from(DEFAULT_RECORDINGS_DIR)
}

pub(crate) fn default_duration_secs() -> f64 {
    DEFAULT_DURATION_SECS
}

pub(crate) fn default_max_duration_secs() -> f64 {
    DEFAULT_MAX_DURATION_SECS
}
