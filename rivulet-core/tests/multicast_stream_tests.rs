// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use rivulet_core::{CancellationToken, Emitter, Multicast, RivuletError, StreamItem};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Parked = Arc<Mutex<Vec<(CancellationToken, Emitter<i32>)>>>;

fn parked() -> (Parked, Multicast<i32>) {
    let parked: Parked = Arc::new(Mutex::new(Vec::new()));
    let slot = parked.clone();
    let source = Multicast::from_fn(move |token, emitter| {
        slot.lock().unwrap().push((token, emitter));
    });
    (parked, source)
}

fn last_emitter(parked: &Parked) -> Emitter<i32> {
    parked.lock().unwrap().last().unwrap().1.clone()
}

#[tokio::test]
async fn test_stream_yields_values_then_ends() {
    let (parked, source) = parked();
    let mut stream = source.stream();

    let emitter = last_emitter(&parked);
    emitter.next(1).unwrap();
    emitter.complete(2).unwrap();

    assert_eq!(stream.next().await, Some(StreamItem::Value(1)));
    assert_eq!(stream.next().await, Some(StreamItem::Value(2)));
    assert_eq!(stream.next().await, None);
}

#[tokio::test]
async fn test_stream_ends_after_error() {
    let (parked, source) = parked();
    let mut stream = source.stream();

    last_emitter(&parked)
        .error(RivuletError::transport_error("offline"))
        .unwrap();

    let item = stream.next().await.expect("expected an error item");
    assert!(item.is_error());
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_stream_ends_silently_on_cancellation() {
    let (parked, source) = parked();
    let mut stream = source.stream();

    last_emitter(&parked).cancelled().unwrap();

    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_stream_releases_subscription_after_terminal() {
    let (parked, source) = parked();
    let mut stream = source.stream();

    last_emitter(&parked).complete(1).unwrap();
    let _ = stream.next().await;

    assert_eq!(source.subscriber_count(), 0);
    assert!(parked.lock().unwrap()[0].0.is_cancelled());
}

#[tokio::test]
async fn test_dropping_stream_tears_down_operation() {
    let (parked, source) = parked();
    let stream = source.stream();

    drop(stream);

    assert!(parked.lock().unwrap()[0].0.is_cancelled());
    assert!(!source.is_active());
}

#[tokio::test]
async fn test_streams_share_one_execution_across_tasks() {
    let (parked, source) = parked();
    let mut first = source.stream();
    let mut second = source.stream();

    let emitter = last_emitter(&parked);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        let _ = emitter.complete(9);
    });

    let (a, b) = tokio::join!(first.next(), second.next());

    assert_eq!(a, Some(StreamItem::Value(9)));
    assert_eq!(b, Some(StreamItem::Value(9)));
    assert_eq!(parked.lock().unwrap().len(), 1);
}
