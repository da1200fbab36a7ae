use crate::{CaptureGate, StoreError};

/// WHAT: A second acquire while the first permit is alive is rejected
/// WHY: Only one capture may use the device at a time
#[test]
#[allow(clippy::unwrap_used)]
fn given_held_permit_when_acquiring_again_then_capture_busy() {
    // Given: A gate with an outstanding permit
    let gate = CaptureGate::new();
    let _permit = gate.try_acquire().unwrap();

    // When: Acquiring again
    let second = gate.try_acquire();

    // Then: Busy, and the gate reports busy
    assert!(matches!(second, Err(StoreError::CaptureBusy { .. })));
    assert!(gate.is_busy());
}

/// WHAT: Dropping the permit reopens the gate
/// WHY: The next capture must be admitted once the first finishes
#[test]
#[allow(clippy::unwrap_used)]
fn given_dropped_permit_when_acquiring_then_succeeds() {
    let gate = CaptureGate::new();
    drop(gate.try_acquire().unwrap());

    assert!(!gate.is_busy());
    assert!(gate.try_acquire().is_ok());
}

/// WHAT: Clones share one slot
/// WHY: Handlers hold clones of the same gate
#[test]
#[allow(clippy::unwrap_used)]
fn given_cloned_gate_when_one_holds_permit_then_other_busy() {
    let gate = CaptureGate::new();
    let clone = gate.clone();
    let _permit = gate.try_acquire().unwrap();

    assert!(clone.try_acquire().is_err());
}

/// WHAT: A panic while holding the permit still releases it
/// WHY: A crashed capture thread must not wedge the device forever
#[test]
fn given_panic_while_holding_permit_then_gate_released() {
    let gate = CaptureGate::new();
    let clone = gate.clone();

    let _ = std::thread::spawn(move || {
        let _permit = clone.try_acquire();
        #[allow(clippy::panic)]
        {
            panic!("intentional panic while capturing");
        }
    })
    .join();

    assert!(!gate.is_busy());
}

/// WHAT: Racing threads get exactly one permit
/// WHY: Admission must be atomic under contention
#[test]
fn given_concurrent_acquirers_then_exactly_one_admitted() {
    let gate = CaptureGate::new();
    let barrier = std::sync::Arc::new(std::sync::Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let gate = gate.clone();
            let barrier = std::sync::Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                // Hold any permit until every thread has tried.
                let permit = gate.try_acquire();
                barrier.wait();
                permit.is_ok()
            })
        })
        .collect();

    let admitted = handles
        .into_iter()
        .filter_map(|h| h.join().ok())
        .filter(|ok| *ok)
        .count();

    assert_eq!(admitted, 1);
}
