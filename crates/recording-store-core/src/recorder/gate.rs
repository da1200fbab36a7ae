use crate::{CoreResult, StoreError};

use std::{
    panic::Location,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use error_location::ErrorLocation;
use tracing::debug;

/// Single-slot admission gate for the capture device.
///
/// A second caller is rejected immediately instead of queueing behind the
/// in-flight capture.
#[derive(Debug, Clone, Default)]
pub struct CaptureGate {
    busy: Arc<AtomicBool>,
}

impl CaptureGate {
    /// Creates an open gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the slot, or fails with [`StoreError::CaptureBusy`].
    #[track_caller]
    pub fn try_acquire(&self) -> CoreResult<CapturePermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| StoreError::CaptureBusy {
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!("Capture slot acquired");

        Ok(CapturePermit {
            busy: Arc::clone(&self.busy),
        })
    }

    /// True while a permit is outstanding.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// RAII permit; the slot is released when this is dropped, including on
/// unwind.
#[derive(Debug)]
pub struct CapturePermit {
    busy: Arc<AtomicBool>,
}

impl Drop for CapturePermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
        debug!("Capture slot released");
    }
}
