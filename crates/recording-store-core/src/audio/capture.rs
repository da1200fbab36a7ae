use crate::{CoreResult, StoreError};

use std::{
    collections::VecDeque,
    panic::Location,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use cpal::{
    Device, Stream, StreamConfig,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument, warn};

/// Appends a callback's samples and drops the oldest ones beyond `limit`.
pub(crate) fn push_bounded(buf: &mut VecDeque<f32>, data: &[f32], limit: usize) {
    buf.extend(data.iter().copied());
    while buf.len() > limit {
        buf.pop_front();
    }
}

/// Raw cpal input stream at the device's native configuration.
pub(crate) struct AudioCapturer {
    device: Device,
    config: StreamConfig,
    stream: Option<Stream>,
    samples: Arc<Mutex<VecDeque<f32>>>,
    /// Set before the stream is dropped so a late callback cannot append
    /// after `stop()` has taken the lock.
    shutdown: Arc<AtomicBool>,
}

impl AudioCapturer {
    /// Opens the named input device, or the host default when `device_name`
    /// is `None`.
    #[track_caller]
    #[instrument]
    pub(crate) fn open(device_name: Option<&str>) -> CoreResult<Self> {
        let host = cpal::default_host();

        let device = match device_name {
            Some(wanted) => find_input_device(&host, wanted)?,
            None => host
                .default_input_device()
                .ok_or(StoreError::NoMicrophoneFound {
                    location: ErrorLocation::from(Location::caller()),
                })?,
        };

        let config = device
            .default_input_config()
            .map_err(|e| StoreError::DeviceError {
                reason: format!("Failed to get config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(
            device_id = ?device.id(),
            sample_rate = config.sample_rate(),
            channels = config.channels(),
            "Input device opened"
        );

        Ok(Self {
            device,
            config: config.into(),
            stream: None,
            samples: Arc::new(Mutex::new(VecDeque::new())),
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Starts streaming into a buffer holding at most `limit` interleaved
    /// samples.
    #[track_caller]
    #[instrument(skip(self))]
    pub(crate) fn start(&mut self, limit: usize) -> CoreResult<()> {
        let samples = Arc::clone(&self.samples);
        let shutdown = Arc::clone(&self.shutdown);

        self.shutdown.store(false, Ordering::Release);

        {
            let mut buf = samples.lock().map_err(|e| StoreError::DeviceError {
                reason: format!("Failed to lock samples: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
            buf.clear();
            buf.reserve(limit);
        }

        let stream = self
            .device
            .build_input_stream(
                &self.config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if shutdown.load(Ordering::Acquire) {
                        return;
                    }
                    // A poisoned lock still holds valid samples.
                    let mut buf = samples.lock().unwrap_or_else(|e| {
                        error!("Sample buffer lock poisoned, recovering: {}", e);
                        e.into_inner()
                    });
                    push_bounded(&mut buf, data, limit);
                },
                |err| {
                    error!("Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| StoreError::DeviceError {
                reason: format!("Failed to build stream: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        stream.play().map_err(|e| StoreError::DeviceError {
            reason: format!("Failed to start stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        self.stream = Some(stream);
        debug!(limit, "Audio stream started");

        Ok(())
    }

    /// Stops the stream and returns the interleaved samples captured so far.
    #[track_caller]
    #[instrument(skip(self))]
    pub(crate) fn stop(&mut self) -> CoreResult<Vec<f32>> {
        self.shutdown.store(true, Ordering::Release);

        if let Some(stream) = self.stream.take() {
            drop(stream);
            // Some backends return from drop() before the last callback ends.
            std::thread::sleep(std::time::Duration::from_millis(5));
            debug!("Audio stream stopped");
        }

        let samples: Vec<f32> = self
            .samples
            .lock()
            .map_err(|e| StoreError::DeviceError {
                reason: format!("Failed to lock samples: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?
            .drain(..)
            .collect();

        debug!(sample_count = samples.len(), "Captured audio samples");

        Ok(samples)
    }

    pub(crate) fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }

    pub(crate) fn channels(&self) -> u16 {
        self.config.channels
    }
}

#[track_caller]
fn find_input_device(host: &cpal::Host, wanted: &str) -> CoreResult<Device> {
    let devices = host.input_devices().map_err(|e| StoreError::DeviceError {
        reason: format!("Failed to enumerate input devices: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    for device in devices {
        #[allow(deprecated)]
        let name = device.name();
        match name {
            Ok(name) if name == wanted => return Ok(device),
            Ok(_) => {}
            Err(e) => warn!(error = %e, "Skipping input device without a name"),
        }
    }

    Err(StoreError::NoMicrophoneFound {
        location: ErrorLocation::from(Location::caller()),
    })
}
