use crate::audio::capture::push_bounded;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// WHAT: Bounded push keeps only the newest samples once the limit is hit
/// WHY: A capture window must never grow past its own length
#[test]
fn given_full_buffer_when_pushing_samples_then_oldest_discarded() {
    // Given: A buffer already holding `limit` zero samples
    let limit = 4800;
    let mut buf: VecDeque<f32> = std::iter::repeat_n(0.0f32, limit).collect();

    // When: A 1024-sample callback block of 1.0 arrives
    push_bounded(&mut buf, &[1.0f32; 1024], limit);

    // Then: Length stays at the limit and the tail is the new block
    assert_eq!(buf.len(), limit);
    assert!(buf.iter().rev().take(1024).all(|&s| (s - 1.0).abs() < f32::EPSILON));
    assert!((buf[0] - 0.0).abs() < f32::EPSILON);
}

/// WHAT: Pushing below the limit appends everything
/// WHY: Normal capture must not lose audio
#[test]
fn given_buffer_under_limit_when_pushing_then_all_samples_kept() {
    // Given: An empty buffer with room to spare
    let mut buf = VecDeque::new();

    // When: Pushing two callback blocks
    push_bounded(&mut buf, &[0.25f32; 512], 2048);
    push_bounded(&mut buf, &[0.5f32; 512], 2048);

    // Then: Both blocks are present in order
    assert_eq!(buf.len(), 1024);
    assert!((buf[0] - 0.25).abs() < f32::EPSILON);
    assert!((buf[1023] - 0.5).abs() < f32::EPSILON);
}

/// WHAT: Lock poison recovery preserves buffer data
/// WHY: A panicking holder must not silently drop captured audio
#[test]
fn given_poisoned_mutex_when_recovering_then_data_preserved() {
    // Given: A mutex poisoned by a panic while holding the lock
    let buf = Arc::new(Mutex::new(VecDeque::from(vec![0.5f32; 100])));
    let buf_clone = Arc::clone(&buf);

    let _ = std::thread::spawn(move || {
        #[allow(clippy::unwrap_used)]
        let _guard = buf_clone.lock().unwrap();
        #[allow(clippy::panic)]
        {
            panic!("intentional panic to poison mutex");
        }
    })
    .join();

    // When: Recovering the way the stream callback does
    let mut recovered = buf.lock().unwrap_or_else(|e| e.into_inner());
    push_bounded(&mut recovered, &[0.5f32; 10], 4800);

    // Then: Original data is preserved and appends still work
    assert_eq!(recovered.len(), 110);
    assert!(recovered.iter().all(|&s| (s - 0.5).abs() < f32::EPSILON));
}
