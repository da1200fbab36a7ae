use crate::{RECORDING_SAMPLE_RATE, StoreError, wav};

use std::io::Cursor;

fn encode(samples: &[f32]) -> Result<Vec<u8>, StoreError> {
    let mut cursor = Cursor::new(Vec::new());
    wav::encode_wav(samples, RECORDING_SAMPLE_RATE, &mut cursor)?;
    Ok(cursor.into_inner())
}

/// WHAT: Encoded samples decode to the same count, rate and channel layout
/// WHY: Stored duration must equal captured duration
#[test]
#[allow(clippy::unwrap_used)]
fn given_two_seconds_of_samples_when_encoding_then_decodes_to_two_seconds_mono() {
    // Given: Two seconds of a ramp signal
    let samples: Vec<f32> = (0..88_200).map(|i| (i % 100) as f32 / 100.0 - 0.5).collect();

    // When: Encoding then decoding
    let bytes = encode(&samples).unwrap();
    let decoded = wav::decode_wav(&bytes).unwrap();

    // Then: Same length at 44.1kHz mono, values within 16-bit quantization
    assert_eq!(decoded.sample_rate, RECORDING_SAMPLE_RATE);
    assert_eq!(decoded.channels, 1);
    assert_eq!(decoded.samples.len(), samples.len());
    assert!((decoded.duration_secs() - 2.0).abs() < 1e-9);
    assert!(
        decoded
            .samples
            .iter()
            .zip(&samples)
            .all(|(a, b)| (a - b).abs() < 1e-3)
    );
}

/// WHAT: Payload starts with a RIFF/WAVE header
/// WHY: Served bytes are labelled audio/wav
#[test]
#[allow(clippy::unwrap_used)]
fn given_samples_when_encoding_then_riff_wave_header() {
    let bytes = encode(&[0.0; 10]).unwrap();

    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(&bytes[8..12], b"WAVE");
    // 44-byte header plus two bytes per sample
    assert_eq!(bytes.len(), 44 + 20);
}

/// WHAT: Out-of-range samples are clamped to full scale
/// WHY: Overdriven input must saturate rather than wrap around
#[test]
#[allow(clippy::unwrap_used)]
fn given_out_of_range_samples_when_encoding_then_clamped() {
    let bytes = encode(&[2.0, -3.0]).unwrap();
    let decoded = wav::decode_wav(&bytes).unwrap();

    assert!((decoded.samples[0] - 1.0).abs() < 1e-6);
    assert!((decoded.samples[1] + 1.0).abs() < 1e-6);
}

/// WHAT: Empty input is rejected
/// WHY: A zero-length recording is never valid
#[test]
fn given_empty_samples_when_encoding_then_encoding_error() {
    assert!(matches!(encode(&[]), Err(StoreError::EncodingError { .. })));
}

/// WHAT: NaN and infinity are rejected before writing
/// WHY: Non-finite samples indicate a broken capture
#[test]
fn given_non_finite_samples_when_encoding_then_encoding_error() {
    assert!(matches!(
        encode(&[0.0, f32::NAN]),
        Err(StoreError::EncodingError { .. })
    ));
    assert!(matches!(
        encode(&[f32::INFINITY]),
        Err(StoreError::EncodingError { .. })
    ));
}

/// WHAT: Garbage bytes fail to decode
/// WHY: Decoding must report, not panic on, corrupt files
#[test]
fn given_garbage_bytes_when_decoding_then_encoding_error() {
    assert!(matches!(
        wav::decode_wav(b"definitely not a wav file"),
        Err(StoreError::EncodingError { .. })
    ));
}
