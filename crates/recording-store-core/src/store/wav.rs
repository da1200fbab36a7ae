//! 16-bit PCM WAV encoding for stored recordings.

use crate::{CoreResult, StoreError, audio::RECORDING_CHANNELS};

use std::{
    io::{Cursor, Seek, Write},
    panic::Location,
};

use error_location::ErrorLocation;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tracing::{debug, instrument};

#[track_caller]
fn encoding_error(e: impl std::fmt::Display) -> StoreError {
    StoreError::EncodingError {
        reason: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

/// Audio decoded from a stored WAV payload.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedWav {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
    /// Interleaved samples scaled to [-1.0, 1.0].
    pub samples: Vec<f32>,
}

impl DecodedWav {
    /// Playback length in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / f64::from(self.channels) / f64::from(self.sample_rate)
    }
}

/// Writes `samples` as a mono 16-bit WAV stream into `writer`.
///
/// Samples are clamped to [-1.0, 1.0]. Empty or non-finite input is rejected
/// before anything is written.
#[track_caller]
#[instrument(skip(samples, writer), fields(sample_count = samples.len()))]
pub fn encode_wav<W: Write + Seek>(samples: &[f32], sample_rate: u32, writer: W) -> CoreResult<()> {
    if samples.is_empty() {
        return Err(encoding_error("Cannot encode empty samples"));
    }
    if samples.iter().any(|s| !s.is_finite()) {
        return Err(encoding_error("Samples contain NaN or infinity values"));
    }

    let spec = WavSpec {
        channels: RECORDING_CHANNELS,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut wav = WavWriter::new(writer, spec).map_err(encoding_error)?;
    for &sample in samples {
        let pcm = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
        wav.write_sample(pcm).map_err(encoding_error)?;
    }
    wav.finalize().map_err(encoding_error)?;

    debug!(sample_rate, "WAV encoded");

    Ok(())
}

/// Decodes a 16-bit integer WAV payload.
#[track_caller]
pub fn decode_wav(bytes: &[u8]) -> CoreResult<DecodedWav> {
    let mut reader = WavReader::new(Cursor::new(bytes)).map_err(encoding_error)?;
    let spec = reader.spec();

    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(encoding_error(format!(
            "Unsupported WAV format: {:?} {} bits",
            spec.sample_format, spec.bits_per_sample
        )));
    }

    let samples = reader
        .samples::<i16>()
        .map(|s| s.map(|v| f32::from(v) / f32::from(i16::MAX)))
        .collect::<Result<Vec<f32>, _>>()
        .map_err(encoding_error)?;

    Ok(DecodedWav {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        samples,
    })
}
