use crate::config::{default_duration_secs, default_max_duration_secs};

use serde::{Deserialize, Serialize};

/// Which capture backend produces audio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioBackend {
    /// Physical input device through cpal.
    #[default]
    Microphone,
    /// Synthetic sine tone, for hosts without an input device.
    Tone,
}

/// Audio capture configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Capture backend.
    #[serde(default)]
    pub backend: AudioBackend,
    /// Selected input device name (None = default device).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_device: Option<String>,
    /// Seconds recorded when a request names no duration.
    #[serde(default = "default_duration_secs")]
    pub default_duration_secs: f64,
    /// Longest accepted recording in seconds.
    #[serde(default = "default_max_duration_secs")]
    pub max_duration_secs: f64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            backend: AudioBackend::default(),
            selected_device: None,
            default_duration_secs: default_duration_secs(),
            max_duration_secs: default_max_duration_secs(),
        }
    }
}
