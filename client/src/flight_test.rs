use super::*;

use std::sync::atomic::{AtomicUsize, Ordering};

// =============================================================================
// single-flight sharing
// =============================================================================

#[tokio::test]
async fn concurrent_callers_share_one_execution() {
    let flight = Singleflight::new(Duration::from_millis(10));
    let executions = Arc::new(AtomicUsize::new(0));

    let make = |value: u32| {
        let executions = Arc::clone(&executions);
        move || async move {
            executions.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            value
        }
    };

    let (a, b, c) = tokio::join!(
        flight.run(make(1)),
        flight.run(make(2)),
        flight.run(make(3)),
    );

    // All callers observe the first caller's execution.
    assert_eq!((a, b, c), (1, 1, 1));
    assert_eq!(executions.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn caller_within_linger_still_joins_resolved_flight() {
    let flight = Singleflight::new(Duration::from_millis(200));
    let executions = Arc::new(AtomicUsize::new(0));

    let make = || {
        let executions = Arc::clone(&executions);
        move || async move {
            executions.fetch_add(1, Ordering::SeqCst);
            7u32
        }
    };

    assert_eq!(flight.run(make()).await, 7);
    // The first flight resolved but lingers; this join makes no new call.
    assert_eq!(flight.run(make()).await, 7);
    assert_eq!(executions.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn slot_clears_after_linger() {
    let flight = Singleflight::new(Duration::from_millis(10));
    let executions = Arc::new(AtomicUsize::new(0));

    let make = || {
        let executions = Arc::clone(&executions);
        move || async move {
            executions.fetch_add(1, Ordering::SeqCst);
            true
        }
    };

    assert!(flight.run(make()).await);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(flight.run(make()).await);
    assert_eq!(executions.load(Ordering::SeqCst), 2);
}
