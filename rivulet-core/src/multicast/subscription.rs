// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub(crate) trait Unsubscribe: Send + Sync {
    fn unsubscribe(&self, id: u64);
}

/// Handle to one registered subscriber of a [`Multicast`](crate::Multicast).
///
/// Cancelling it (explicitly or by dropping it) removes the subscriber. When
/// it was the last one, the window closes and the underlying operation is
/// torn down.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    source: Arc<dyn Unsubscribe>,
    id: u64,
    cancelled: AtomicBool,
}

impl Subscription {
    pub(crate) fn new(source: Arc<dyn Unsubscribe>, id: u64) -> Self {
        Self {
            source,
            id,
            cancelled: AtomicBool::new(false),
        }
    }

    /// Remove the subscriber. Idempotent.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::AcqRel) {
            self.source.unsubscribe(self.id);
        }
    }

    /// Returns `true` once [`cancel`](Self::cancel) ran.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
