use crate::{CoreResult, StoreError};

use std::panic::Location;

use audioadapter_buffers::direct::InterleavedSlice;
use error_location::ErrorLocation;
use rubato::{Fft, FixedSync, Resampler as RubatoResampler};
use tracing::{debug, instrument};

const CHUNK_SIZE: usize = 1024;
const SUB_CHUNKS: usize = 2;

#[track_caller]
fn resampling_error(context: &str, e: impl std::fmt::Display) -> StoreError {
    StoreError::ResamplingError {
        reason: format!("{}: {}", context, e),
        location: ErrorLocation::from(Location::caller()),
    }
}

/// Mono FFT resampler from the device rate to the storage rate.
pub(crate) struct Resampler {
    inner: Fft<f32>,
    input_rate: u32,
    output_rate: u32,
}

impl Resampler {
    #[track_caller]
    #[instrument]
    pub(crate) fn new(input_rate: u32, output_rate: u32) -> CoreResult<Self> {
        let inner = Fft::<f32>::new(
            input_rate as usize,
            output_rate as usize,
            CHUNK_SIZE,
            SUB_CHUNKS,
            1,
            FixedSync::Input,
        )
        .map_err(|e| resampling_error("Failed to create resampler", e))?;

        debug!(input_rate, output_rate, "Resampler initialized");

        Ok(Self {
            inner,
            input_rate,
            output_rate,
        })
    }

    /// Converts `samples` to the output rate.
    ///
    /// The result is at most the input length scaled by the rate ratio. It
    /// can come up short by the resampler's internal delay.
    #[track_caller]
    #[instrument(skip(self, samples))]
    pub(crate) fn resample(&mut self, samples: &[f32]) -> CoreResult<Vec<f32>> {
        if samples.is_empty() {
            return Ok(Vec::new());
        }

        let target_len = (samples.len() as u64 * u64::from(self.output_rate)
            / u64::from(self.input_rate)) as usize;
        let mut output = Vec::with_capacity(target_len + CHUNK_SIZE);
        let mut padded = vec![0.0f32; CHUNK_SIZE];
        let mut out_chunk = vec![0.0f32; self.inner.output_frames_max()];

        for chunk in samples.chunks(CHUNK_SIZE) {
            // The final chunk is zero-padded up to the fixed input size.
            padded[..chunk.len()].copy_from_slice(chunk);
            padded[chunk.len()..].fill(0.0);

            let input = InterleavedSlice::new(&padded, 1, CHUNK_SIZE)
                .map_err(|e| resampling_error("Failed to create input adapter", e))?;

            let out_frames = out_chunk.len();
            let mut out = InterleavedSlice::new_mut(&mut out_chunk, 1, out_frames)
                .map_err(|e| resampling_error("Failed to create output adapter", e))?;

            let (_consumed, written) = self
                .inner
                .process_into_buffer(&input, &mut out, None)
                .map_err(|e| resampling_error("Resampling failed", e))?;

            output.extend_from_slice(&out_chunk[..written]);
        }

        output.truncate(target_len);

        debug!(
            input_len = samples.len(),
            output_len = output.len(),
            input_rate = self.input_rate,
            output_rate = self.output_rate,
            "Resampled audio"
        );

        Ok(output)
    }
}
