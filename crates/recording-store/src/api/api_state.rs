use recording_store_core::{Recorder, RecordingStore};

use std::sync::Arc;

/// Shared handler state.
#[derive(Clone)]
pub struct ApiState {
    pub(crate) store: RecordingStore,
    pub(crate) recorder: Arc<Recorder>,
}

impl ApiState {
    /// State serving `recorder`'s store.
    pub fn new(recorder: Arc<Recorder>) -> Self {
        Self {
            store: recorder.store().clone(),
            recorder,
        }
    }
}
