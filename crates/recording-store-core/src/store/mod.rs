mod recording;
mod recording_id;
pub(crate) mod recording_store;
pub mod wav;

pub use {
    recording::Recording,
    recording_id::{RECORDING_EXTENSION, RecordingId},
    recording_store::{PARTIAL_EXTENSION, RecordingStore},
};
