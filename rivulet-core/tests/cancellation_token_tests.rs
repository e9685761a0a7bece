// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{CancelSignal, CancellationToken};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let clone = count.clone();
    (count, move || {
        clone.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn test_new_token_not_cancelled() {
    let token = CancellationToken::new();
    assert!(!token.is_cancelled());
    assert_eq!(token.listener_count(), 0);
}

#[test]
fn test_cancel_is_idempotent() {
    let token = CancellationToken::new();
    token.cancel();
    token.cancel();
    token.cancel();
    assert!(token.is_cancelled());
}

#[test]
fn test_clone_shares_state() {
    let token1 = CancellationToken::new();
    let token2 = token1.clone();

    token2.cancel();

    assert!(token1.is_cancelled());
}

#[test]
fn test_listener_runs_exactly_once() {
    let token = CancellationToken::new();
    let (count, listener) = counter();

    assert!(token.on_cancel(listener).is_some());
    assert_eq!(token.listener_count(), 1);

    token.cancel();
    token.cancel();

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(token.listener_count(), 0);
}

#[test]
fn test_every_listener_is_notified() {
    let token = CancellationToken::new();
    let count = Arc::new(AtomicUsize::new(0));

    for _ in 0..5 {
        let count = count.clone();
        token.on_cancel(move || {
            count.fetch_add(1, Ordering::SeqCst);
        });
    }

    token.cancel();

    assert_eq!(count.load(Ordering::SeqCst), 5);
}

#[test]
fn test_listener_on_cancelled_token_fires_immediately() {
    let token = CancellationToken::new();
    token.cancel();
    let (count, listener) = counter();

    let id = token.on_cancel(listener);

    assert!(id.is_none());
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_removed_listener_does_not_fire() {
    let token = CancellationToken::new();
    let (count, listener) = counter();

    let id = token.on_cancel(listener).expect("token is armed");
    token.remove_listener(id);
    token.cancel();

    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn test_listener_may_cancel_the_same_token() {
    let token = CancellationToken::new();
    let reentrant = token.clone();
    token.on_cancel(move || reentrant.cancel());

    token.cancel();

    assert!(token.is_cancelled());
}

#[test]
fn test_dispose_drops_listeners_without_running_them() {
    let token = CancellationToken::new();
    let (count, listener) = counter();
    token.on_cancel(listener);

    token.dispose();
    token.cancel();

    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert!(token.is_cancelled());
}

#[test]
fn test_link_propagates_external_cancellation() {
    let external = CancellationToken::new();
    let local = CancellationToken::new();
    local.link(&external);

    external.cancel();

    assert!(local.is_cancelled());
}

#[test]
fn test_link_is_one_directional() {
    let external = CancellationToken::new();
    let local = CancellationToken::new();
    local.link(&external);

    local.cancel();

    assert!(!external.is_cancelled());
    // The bridge listener is released once the local token fired.
    assert_eq!(external.listener_count(), 0);
}

#[test]
fn test_link_to_cancelled_external_cancels_immediately() {
    let external = CancellationToken::new();
    external.cancel();
    let local = CancellationToken::new();
    let (count, listener) = counter();
    local.on_cancel(listener);

    local.link(&external);

    assert!(local.is_cancelled());
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_dispose_detaches_from_external() {
    let external = CancellationToken::new();
    let local = CancellationToken::new();
    local.link(&external);
    assert_eq!(external.listener_count(), 1);

    local.dispose();
    external.cancel();

    assert_eq!(external.listener_count(), 0);
    assert!(!local.is_cancelled());
}

#[test]
fn test_link_accepts_shared_signal_objects() {
    let external: Arc<dyn CancelSignal> = Arc::new(CancellationToken::new());
    let local = CancellationToken::new();
    local.link(&external);

    assert!(!local.is_cancelled());
    assert!(!external.is_cancelled());
}

#[test]
fn test_child_token_follows_parent_but_not_reverse() {
    let parent = CancellationToken::new();
    let child = parent.child_token();
    let sibling = parent.child_token();

    child.cancel();
    assert!(!parent.is_cancelled());
    assert!(!sibling.is_cancelled());

    parent.cancel();
    assert!(sibling.is_cancelled());
}

#[test]
fn test_listeners_run_after_flag_is_visible() {
    let token = CancellationToken::new();
    let observed = Arc::new(Mutex::new(None));
    let probe = token.clone();
    let sink = observed.clone();
    token.on_cancel(move || {
        *sink.lock().unwrap() = Some(probe.is_cancelled());
    });

    token.cancel();

    assert_eq!(*observed.lock().unwrap(), Some(true));
}

#[tokio::test]
async fn test_cancelled_resolves_immediately_if_already_cancelled() {
    let token = CancellationToken::new();
    token.cancel();

    token.cancelled().await;
}

#[tokio::test]
async fn test_cancelled_waits_until_cancel() {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    let handle = tokio::spawn(async move {
        token_clone.cancelled().await;
        true
    });

    tokio::time::sleep(Duration::from_millis(10)).await;
    token.cancel();

    let result = tokio::time::timeout(Duration::from_millis(100), handle).await;
    assert!(result.unwrap().unwrap());
}

#[tokio::test]
async fn test_cancelled_wakes_on_linked_cancellation() {
    let external = CancellationToken::new();
    let local = CancellationToken::new();
    local.link(&external);
    let waiter = local.clone();

    let handle = tokio::spawn(async move { waiter.cancelled().await });

    tokio::time::sleep(Duration::from_millis(10)).await;
    external.cancel();

    let result = tokio::time::timeout(Duration::from_millis(100), handle).await;
    assert!(result.is_ok());
}
