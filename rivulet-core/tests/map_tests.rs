// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{CancellationToken, Emitter, Multicast, Notification, RivuletError};
use std::sync::{Arc, Mutex};

type Parked = Arc<Mutex<Vec<(CancellationToken, Emitter<String>)>>>;

fn upstream() -> (Parked, Multicast<String>) {
    let parked: Parked = Arc::new(Mutex::new(Vec::new()));
    let slot = parked.clone();
    let source = Multicast::from_fn(move |token, emitter| {
        slot.lock().unwrap().push((token, emitter));
    });
    (parked, source)
}

fn record<T: Clone + Send + Sync + 'static>(
    source: &Multicast<T>,
) -> (Arc<Mutex<Vec<Notification<T>>>>, rivulet_core::Subscription) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    let subscription = source.subscribe(move |n| sink.lock().unwrap().push(n));
    (log, subscription)
}

#[test]
fn test_map_is_lazy() {
    let (parked, source) = upstream();

    let _lengths = source.map(|s| s.len());

    assert!(parked.lock().unwrap().is_empty());
    assert!(!source.is_active());
}

#[test]
fn test_map_transforms_values() {
    let (parked, source) = upstream();
    let lengths = source.map(|s| s.len());
    let (log, _s) = record(&lengths);

    let emitter = parked.lock().unwrap()[0].1.clone();
    emitter.next("ab".to_string()).unwrap();
    emitter.complete("abcd".to_string()).unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec![Notification::Next(2), Notification::Complete(4)]
    );
}

#[test]
fn test_try_map_failure_terminates_derived_window() {
    let (parked, source) = upstream();
    let numbers = source.try_map(|s| {
        s.parse::<i32>()
            .map_err(|e| RivuletError::parse_error(e.to_string()))
    });
    let (log, _s) = record(&numbers);

    let emitter = parked.lock().unwrap()[0].1.clone();
    emitter.next("nope".to_string()).unwrap();
    emitter.complete("3".to_string()).unwrap();

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1);
    assert!(matches!(log[0], Notification::Error(RivuletError::Parse { .. })));
}

#[test]
fn test_derived_teardown_releases_upstream() {
    let (parked, source) = upstream();
    let lengths = source.map(|s| s.len());

    let (_log, subscription) = record(&lengths);
    assert_eq!(source.subscriber_count(), 1);

    subscription.cancel();

    assert_eq!(source.subscriber_count(), 0);
    assert!(parked.lock().unwrap()[0].0.is_cancelled());
}

#[test]
fn test_derived_subscribers_share_one_upstream_subscription() {
    let (parked, source) = upstream();
    let lengths = source.map(|s| s.len());

    let (_a, _sa) = record(&lengths);
    let (_b, _sb) = record(&lengths);

    assert_eq!(source.subscriber_count(), 1);
    assert_eq!(parked.lock().unwrap().len(), 1);
}

#[test]
fn test_upstream_cancellation_is_forwarded() {
    let (parked, source) = upstream();
    let lengths = source.map(|s| s.len());
    let (log, _s) = record(&lengths);

    parked.lock().unwrap()[0].1.cancelled().unwrap();

    assert_eq!(*log.lock().unwrap(), vec![Notification::Cancelled]);
}
