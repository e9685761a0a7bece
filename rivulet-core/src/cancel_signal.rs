// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Read-only view of a cancellation source owned by someone else.

use crate::ListenerId;
use std::sync::Arc;

/// One-shot listener invoked when a cancellation source fires.
pub type CancelListener = Box<dyn FnOnce() + Send + 'static>;

/// An externally owned cancellation source.
///
/// rivulet only ever observes these: it checks whether the signal already
/// fired and registers one-shot listeners for when it does. It never fires
/// a signal it does not own.
pub trait CancelSignal: Send + Sync {
    /// Returns `true` once the signal has fired.
    fn is_cancelled(&self) -> bool;

    /// Registers `listener` to run when the signal fires.
    ///
    /// If the signal already fired, `listener` runs synchronously before this
    /// returns and `None` is returned. Otherwise the returned id can be handed
    /// to [`remove_listener`](Self::remove_listener).
    fn on_cancel(&self, listener: CancelListener) -> Option<ListenerId>;

    /// Drops a listener that has not fired yet. Unknown ids are ignored.
    fn remove_listener(&self, _id: ListenerId) {}
}

impl<S: CancelSignal + ?Sized> CancelSignal for Arc<S> {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }

    fn on_cancel(&self, listener: CancelListener) -> Option<ListenerId> {
        (**self).on_cancel(listener)
    }

    fn remove_listener(&self, id: ListenerId) {
        (**self).remove_listener(id);
    }
}
