// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use rivulet_core::{Multicast, Notification, Subscription};
use std::sync::Arc;

/// Records every notification handed to its callback.
pub struct Recorder<T> {
    log: Arc<Mutex<Vec<Notification<T>>>>,
}

impl<T: Clone + Send + Sync + 'static> Recorder<T> {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A subscriber callback appending to this recorder.
    pub fn callback(&self) -> impl Fn(Notification<T>) + Send + Sync + 'static {
        let log = Arc::clone(&self.log);
        move |notification| log.lock().push(notification)
    }

    pub fn notifications(&self) -> Vec<Notification<T>> {
        self.log.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.log.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.lock().is_empty()
    }

    /// Values carried by `Next` and `Complete` notifications.
    pub fn values(&self) -> Vec<T> {
        self.log
            .lock()
            .iter()
            .filter_map(|n| n.value().cloned())
            .collect()
    }

    pub fn error_count(&self) -> usize {
        self.log
            .lock()
            .iter()
            .filter(|n| matches!(n, Notification::Error(_)))
            .count()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for Recorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
        }
    }
}

/// Subscribe a fresh [`Recorder`] to `source`.
pub fn record<T: Clone + Send + Sync + 'static>(source: &Multicast<T>) -> (Recorder<T>, Subscription) {
    let recorder = Recorder::new();
    let subscription = source.subscribe(recorder.callback());
    (recorder, subscription)
}
