use crate::{RECORDING_SAMPLE_RATE, audio::Resampler};

// Test constants
const DEVICE_SAMPLE_RATE: u32 = 48_000;
const ONE_SECOND_INPUT_SAMPLES: usize = DEVICE_SAMPLE_RATE as usize;
const ONE_SECOND_OUTPUT_SAMPLES: usize = RECORDING_SAMPLE_RATE as usize;
const TEST_SIGNAL_AMPLITUDE: f32 = 0.5;
const TONE_FREQUENCY_FACTOR: f32 = 0.05;
const MAX_AMPLITUDE: f32 = 1.5;
const LENGTH_TOLERANCE: u64 = 1000;

/// WHAT: 48kHz device audio becomes 44.1kHz storage audio
/// WHY: Common USB and laptop mics run at 48kHz
#[test]
#[allow(clippy::unwrap_used)]
fn given_48khz_audio_when_resampling_to_44_1khz_then_output_length_approximately_correct() {
    // Given: Resampler configured for 48kHz -> 44.1kHz
    let mut resampler = Resampler::new(DEVICE_SAMPLE_RATE, RECORDING_SAMPLE_RATE).unwrap();
    let input = vec![TEST_SIGNAL_AMPLITUDE; ONE_SECOND_INPUT_SAMPLES];

    // When: Resampling one second
    let output = resampler.resample(&input).unwrap();

    // Then: About one second at 44.1kHz, never longer, with no NaN/Inf
    assert!(output.len() <= ONE_SECOND_OUTPUT_SAMPLES);
    assert!(
        (ONE_SECOND_OUTPUT_SAMPLES - output.len()) as u64 <= LENGTH_TOLERANCE,
        "Expected ~{} samples, got {}",
        ONE_SECOND_OUTPUT_SAMPLES,
        output.len()
    );
    assert!(output.iter().all(|&s| s.is_finite()));
}

/// WHAT: Empty samples return empty output
/// WHY: Edge case handling for zero-length input
#[test]
#[allow(clippy::unwrap_used)]
fn given_empty_samples_when_resampling_then_empty_output() {
    let mut resampler = Resampler::new(DEVICE_SAMPLE_RATE, RECORDING_SAMPLE_RATE).unwrap();

    let output = resampler.resample(&[]).unwrap();

    assert!(output.is_empty());
}

/// WHAT: Resampling a tone keeps it bounded
/// WHY: Resampler ringing must not push samples far out of range
#[test]
#[allow(clippy::unwrap_used)]
fn given_tone_signal_when_resampling_then_output_bounded() {
    // Given: A 4800-sample tone at 48kHz
    let mut resampler = Resampler::new(DEVICE_SAMPLE_RATE, RECORDING_SAMPLE_RATE).unwrap();
    let input: Vec<f32> = (0..4800)
        .map(|i| (i as f32 * TONE_FREQUENCY_FACTOR).sin())
        .collect();

    // When: Resampling
    let output = resampler.resample(&input).unwrap();

    // Then: About 4410 samples, all finite and bounded
    assert!(output.len() <= 4410);
    assert!((4410 - output.len()) as u64 <= LENGTH_TOLERANCE);
    assert!(
        output
            .iter()
            .all(|&s| s.is_finite() && s.abs() <= MAX_AMPLITUDE)
    );
}
