// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::Subscription;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// What a [`Binding`] does to its target when cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Teardown {
    /// Leave the last rendered content in place.
    #[default]
    Retain,
    /// Remove the last rendered content, unless a later rendering replaced it.
    Retract,
}

type OnCancel = Box<dyn Fn() + Send + Sync + 'static>;

/// Handle to a fetch result rendered into a target.
///
/// Cancelling stops future renderings and applies the binding's
/// [`Teardown`]. Dropping the binding cancels it.
#[must_use = "dropping a Binding unbinds it immediately"]
pub struct Binding {
    subscription: Subscription,
    cancelled: Arc<AtomicBool>,
    on_cancel: Option<OnCancel>,
}

impl Binding {
    pub(crate) fn new(
        subscription: Subscription,
        cancelled: Arc<AtomicBool>,
        on_cancel: Option<OnCancel>,
    ) -> Self {
        Self {
            subscription,
            cancelled,
            on_cancel,
        }
    }

    /// Unbind. Idempotent.
    pub fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        self.subscription.cancel();
        if let Some(on_cancel) = &self.on_cancel {
            on_cancel();
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for Binding {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("cancelled", &self.is_cancelled())
            .field("retracts", &self.on_cancel.is_some())
            .finish()
    }
}
