// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::{Emitter, Multicast, Operation};
use crate::{CancellationToken, Notification, Result};
use std::sync::Arc;

type MapFn<T, U> = Arc<dyn Fn(T) -> Result<U> + Send + Sync + 'static>;

/// Operation behind [`Multicast::try_map`]: subscribes upstream for the
/// lifetime of its own window.
pub(crate) struct MapOperation<T: Clone + Send + Sync + 'static, U> {
    upstream: Multicast<T>,
    f: MapFn<T, U>,
}

impl<T: Clone + Send + Sync + 'static, U> MapOperation<T, U> {
    pub(crate) fn new<F>(upstream: Multicast<T>, f: F) -> Self
    where
        F: Fn(T) -> Result<U> + Send + Sync + 'static,
    {
        Self {
            upstream,
            f: Arc::new(f),
        }
    }
}

impl<T, U> Operation<U> for MapOperation<T, U>
where
    T: Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
{
    fn start(&self, token: CancellationToken, emitter: Emitter<U>) {
        let f = Arc::clone(&self.f);
        let subscription = self.upstream.subscribe(move |notification| {
            // A failed mapping already terminated this window.
            if !emitter.is_open() {
                return;
            }
            let mapped = match notification {
                Notification::Next(value) => f(value).map_or_else(Notification::Error, Notification::Next),
                Notification::Complete(value) => {
                    f(value).map_or_else(Notification::Error, Notification::Complete)
                }
                Notification::Error(error) => Notification::Error(error),
                Notification::Cancelled => Notification::Cancelled,
            };
            if let Err(error) = emitter.emit(mapped) {
                trace!("mapped delivery for window {} dropped: {}", emitter.window(), error);
            }
        });
        token.on_cancel(move || subscription.cancel());
    }
}
