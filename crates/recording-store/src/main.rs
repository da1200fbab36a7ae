//! Recording Store: HTTP service that captures audio clips to a directory of
//! WAV files and serves them back for listing, playback and deletion.

mod api;
mod config;
mod error;
mod logging;
mod server;

pub(crate) use error::{AppError, Result as AppResult};

use crate::config::Config;

use tracing::{error, info};

/// Application entry point.
fn main() {
    let loaded = Config::load();
    logging::init(
        loaded
            .as_ref()
            .map(|l| l.config.logging.format)
            .unwrap_or_default(),
    );

    let config = match loaded {
        Ok(loaded) => {
            loaded.log_outcome();
            loaded.config
        }
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    info!(
        bind_addr = %config.bind_addr(),
        recordings_dir = ?config.storage.recordings_dir,
        backend = ?config.audio.backend,
        "Recording store starting"
    );

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = rt.block_on(server::run(config)) {
        error!(error = ?e, "Recording store failed");
        std::process::exit(1);
    }
}
