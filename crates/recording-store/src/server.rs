//! Service assembly and the HTTP serve loop.

use crate::{
    AppError, AppResult,
    api::{ApiState, build_router},
    config::{AudioBackend, AudioConfig, Config},
};

use std::{panic::Location, sync::Arc};

use error_location::ErrorLocation;
use recording_store_core::{AudioSource, MicrophoneSource, Recorder, RecordingStore, ToneSource};
use tokio::net::TcpListener;
use tracing::{info, instrument, warn};

/// Builds the capture backend named by the config.
pub(crate) fn audio_source(audio: &AudioConfig) -> Arc<dyn AudioSource> {
    match audio.backend {
        AudioBackend::Microphone => Arc::new(MicrophoneSource::new(audio.selected_device.clone())),
        AudioBackend::Tone => {
            if audio.selected_device.is_some() {
                warn!("audio.selected_device is ignored by the tone backend");
            }
            Arc::new(ToneSource::default().realtime())
        }
    }
}

/// Opens the store and wires the recorder into handler state.
#[track_caller]
#[instrument(skip(config))]
pub(crate) fn build_state(config: &Config) -> AppResult<ApiState> {
    let store = RecordingStore::open(&config.storage.recordings_dir)?;
    let recorder = Recorder::new(
        audio_source(&config.audio),
        store,
        config.duration_policy(),
    );
    Ok(ApiState::new(Arc::new(recorder)))
}

/// Runs the service until Ctrl-C.
#[instrument(skip(config))]
pub(crate) async fn run(config: Config) -> AppResult<()> {
    let state = build_state(&config)?;

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| AppError::ServerError {
            reason: format!("Failed to bind {}: {}", bind_addr, e),
            location: ErrorLocation::from(Location::caller()),
        })?;
    let local_addr = listener.local_addr()?;

    info!(addr = %local_addr, "Recording store listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::ServerError {
            reason: format!("HTTP server failed: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    info!("Recording store shut down successfully");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => warn!(error = ?e, "Failed to listen for Ctrl-C, shutting down"),
    }
}
