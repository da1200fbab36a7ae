use crate::{
    AudioSource, CaptureRequest, DURATION_CEILING_SECS, MicrophoneSource,
    audio::microphone::{buffer_limit, downmix_to_mono, fit_to_length},
};

use std::time::Duration;

/// WHAT: Stereo frames are averaged into one channel
/// WHY: Recordings are always stored mono
#[test]
fn given_stereo_frames_when_downmixing_then_channels_averaged() {
    // Given: Interleaved L/R frames
    let stereo = [1.0f32, 0.0, 0.5, 0.5, -1.0, 1.0];

    // When: Downmixing
    let mono = downmix_to_mono(&stereo, 2);

    // Then: One sample per frame holding the channel mean
    assert_eq!(mono, vec![0.5, 0.5, 0.0]);
}

/// WHAT: Mono input passes through unchanged
/// WHY: Avoid touching audio that is already in storage layout
#[test]
fn given_mono_input_when_downmixing_then_unchanged() {
    let mono = downmix_to_mono(&[0.1, 0.2, 0.3], 1);
    assert_eq!(mono, vec![0.1, 0.2, 0.3]);
}

/// WHAT: A trailing partial frame is dropped
/// WHY: A stream stopped mid-frame must not skew the last sample
#[test]
fn given_incomplete_trailing_frame_when_downmixing_then_dropped() {
    let mono = downmix_to_mono(&[0.2, 0.4, 0.9], 2);
    assert_eq!(mono.len(), 1);
    assert!((mono[0] - 0.3).abs() < 1e-6);
}

/// WHAT: Over-long captures are trimmed to the exact frame count
/// WHY: Stored duration must match the requested duration
#[test]
fn given_extra_samples_when_fitting_then_truncated() {
    let fitted = fit_to_length(vec![0.5; 1100], 1000, 10);
    assert_eq!(fitted.map(|s| s.len()), Some(1000));
}

/// WHAT: A small shortfall is padded with silence
/// WHY: Devices deliver whole blocks and may miss the final one
#[test]
fn given_small_shortfall_when_fitting_then_padded_with_silence() {
    // Given: 995 samples where 1000 are expected, 10 allowed padding
    let samples = vec![0.5; 995];

    // When: Fitting
    let fitted = fit_to_length(samples, 1000, 10);

    // Then: Exactly 1000 samples, tail is silence
    let fitted = fitted.unwrap_or_default();
    assert_eq!(fitted.len(), 1000);
    assert!(fitted[995..].iter().all(|&s| s == 0.0));
    assert!((fitted[994] - 0.5).abs() < f32::EPSILON);
}

/// WHAT: A large shortfall is rejected
/// WHY: A mostly silent file must not masquerade as a full capture
#[test]
fn given_large_shortfall_when_fitting_then_none() {
    assert!(fit_to_length(vec![0.5; 500], 1000, 10).is_none());
}

/// WHAT: The capture buffer holds the whole window for any device layout
/// WHY: High-rate or multichannel devices must not lose the start of long recordings
#[test]
fn given_long_window_on_wide_devices_when_sizing_buffer_then_every_frame_fits() {
    let window = Duration::from_secs_f64(DURATION_CEILING_SECS);

    for (rate, channels) in [(44_100, 1), (48_000, 2), (96_000, 2), (192_000, 8)] {
        // When: Sizing the buffer for the device
        let limit = buffer_limit(window, rate, channels);

        // Then: Every interleaved sample of the window fits
        let needed = DURATION_CEILING_SECS as usize * rate as usize * usize::from(channels);
        assert!(limit >= needed, "{rate} Hz x {channels} ch: {limit} < {needed}");
    }
}

/// WHAT: A device reporting zero channels is sized as mono
/// WHY: The buffer must never be sized to zero
#[test]
fn given_zero_channels_when_sizing_buffer_then_treated_as_mono() {
    assert_eq!(buffer_limit(Duration::from_secs(1), 48_000, 0), 48_000);
}

/// WHAT: Real microphone capture produces the exact frame count
/// WHY: End-to-end device check, needs audio hardware
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
#[allow(clippy::unwrap_used)]
fn given_default_device_when_capturing_half_second_then_exact_length() {
    // Given: The default input device
    let source = MicrophoneSource::default();
    let request = CaptureRequest::mono(Duration::from_millis(500));

    // When: Capturing
    let samples = source.capture(&request).unwrap();

    // Then: 0.5s at 44.1kHz
    assert_eq!(samples.len(), 22_050);
    assert!(samples.iter().all(|s| s.is_finite()));
}
