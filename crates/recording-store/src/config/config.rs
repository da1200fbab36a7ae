//! Configuration management for recording-store.
//!
//! Loads a TOML file from `$RECORDING_STORE_CONFIG` or the platform config
//! directory, creating a default one on first run. Saves use an atomic
//! write-then-rename.

use crate::{
    AppError, AppResult,
    config::{AudioConfig, CONFIG_PATH_ENV, LoggingConfig, ServerConfig, StorageConfig},
};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use recording_store_core::{DURATION_CEILING_SECS, DurationPolicy};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// A loaded configuration and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    /// The validated configuration.
    pub config: Config,
    /// File it was read from or written to.
    pub path: PathBuf,
    /// True when the file did not exist and defaults were written.
    pub created: bool,
}

impl LoadedConfig {
    /// Reports the load once logging is initialized.
    pub fn log_outcome(&self) {
        if self.created {
            info!(config_path = ?self.path, "No config found, created default");
        } else {
            info!(config_path = ?self.path, "Configuration loaded");
        }
    }
}

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Recording storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Audio capture settings.
    #[serde(default)]
    pub audio: AudioConfig,
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location, creating it if absent.
    #[track_caller]
    pub fn load() -> AppResult<LoadedConfig> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, writing defaults there if it does not exist.
    ///
    /// Runs before the subscriber is installed, so the outcome is reported
    /// through [`LoadedConfig::log_outcome`] instead of logged here.
    #[track_caller]
    pub fn load_from(path: &Path) -> AppResult<LoadedConfig> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(LoadedConfig {
                config,
                path: path.to_path_buf(),
                created: true,
            });
        }

        let contents = fs::read_to_string(path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to read config {:?}: {}", path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(LoadedConfig {
            config: Self::parse(&contents)?,
            path: path.to_path_buf(),
            created: false,
        })
    }

    /// Parse and validate TOML contents.
    #[track_caller]
    pub fn parse(contents: &str) -> AppResult<Self> {
        let config: Config = toml::from_str(contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Check cross-field constraints serde cannot express.
    #[track_caller]
    pub fn validate(&self) -> AppResult<()> {
        let audio = &self.audio;

        if !audio.max_duration_secs.is_finite()
            || audio.max_duration_secs <= 0.0
            || audio.max_duration_secs > DURATION_CEILING_SECS
        {
            return Err(AppError::ConfigError {
                reason: format!(
                    "audio.max_duration_secs must be in (0, {}], got {}",
                    DURATION_CEILING_SECS, audio.max_duration_secs
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if !audio.default_duration_secs.is_finite()
            || audio.default_duration_secs <= 0.0
            || audio.default_duration_secs > audio.max_duration_secs
        {
            return Err(AppError::ConfigError {
                reason: format!(
                    "audio.default_duration_secs must be in (0, {}], got {}",
                    audio.max_duration_secs, audio.default_duration_secs
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.storage.recordings_dir.as_os_str().is_empty() {
            return Err(AppError::ConfigError {
                reason: "storage.recordings_dir must not be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Save configuration to `path` using an atomic write.
    ///
    /// Writes to a temporary file first, then renames, so a crash mid-write
    /// never leaves a truncated config.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        debug!(config_path = ?path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Duration bounds for the recorder.
    pub fn duration_policy(&self) -> DurationPolicy {
        DurationPolicy {
            default_secs: self.audio.default_duration_secs,
            max_secs: self.audio.max_duration_secs,
        }
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            debug!(config_path = ?path, "Using config path from environment");
            return Ok(PathBuf::from(path));
        }

        let proj_dirs = ProjectDirs::from("com", "recording-store", "Recording-Store")
            .ok_or_else(|| AppError::ConfigError {
                reason: "Failed to get config directory".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}
