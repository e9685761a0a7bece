// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! One-shot, multicast cancellation.
//!
//! A [`CancellationToken`] fires at most once. Interested parties either
//! register a push-style listener with [`on_cancel`](CancellationToken::on_cancel),
//! which runs immediately when the token already fired, or await
//! [`cancelled`](CancellationToken::cancelled). Tokens can follow other
//! cancellation sources through [`link`](CancellationToken::link).

use crate::cancel_signal::{CancelListener, CancelSignal};
use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::sync::atomic::{AtomicBool, Ordering};
use core::task::{Context, Poll};
use event_listener::{Event, EventListener};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

/// Identifies a listener registered on a cancellation source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

type Detach = Box<dyn FnOnce() + Send + 'static>;

/// Cloneable handle to a shared one-shot cancellation state.
///
/// # Example
///
/// ```
/// use rivulet_core::CancellationToken;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let token = CancellationToken::new();
/// let fired = Arc::new(AtomicUsize::new(0));
///
/// let counter = fired.clone();
/// token.on_cancel(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// token.cancel();
/// token.cancel();
/// assert_eq!(fired.load(Ordering::SeqCst), 1);
/// ```
#[derive(Clone)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

struct Inner {
    cancelled: AtomicBool,
    event: Event,
    registry: Mutex<Registry>,
}

enum Registry {
    Armed {
        next_id: u64,
        listeners: BTreeMap<ListenerId, CancelListener>,
        links: Vec<Detach>,
    },
    // Cancelled or disposed; nothing is kept past this point.
    Released,
}

impl CancellationToken {
    /// Create a new cancellation token.
    ///
    /// The token is initially not cancelled.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                event: Event::new(),
                registry: Mutex::new(Registry::Armed {
                    next_id: 0,
                    listeners: BTreeMap::new(),
                    links: Vec::new(),
                }),
            }),
        }
    }

    /// Create a token that fires whenever `self` fires, but can also be
    /// cancelled on its own without affecting `self`.
    #[must_use]
    pub fn child_token(&self) -> Self {
        let child = Self::new();
        child.link(self);
        child
    }

    /// Cancel the token.
    ///
    /// The first call runs every registered listener exactly once, wakes all
    /// [`cancelled`](Self::cancelled) futures and releases links to other
    /// sources. Later calls are no-ops.
    pub fn cancel(&self) {
        let released = {
            let mut registry = self.inner.registry.lock();
            if self.inner.cancelled.swap(true, Ordering::AcqRel) {
                return;
            }
            core::mem::replace(&mut *registry, Registry::Released)
        };

        self.inner.event.notify(usize::MAX);

        if let Registry::Armed {
            listeners, links, ..
        } = released
        {
            for detach in links {
                detach();
            }
            for listener in listeners.into_values() {
                listener();
            }
        }
    }

    /// Check if the token has been cancelled (non-blocking).
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Register a listener that runs once when the token is cancelled.
    ///
    /// If the token is already cancelled the listener runs synchronously
    /// before this returns, so there is no window between checking and
    /// registering in which a cancellation could be missed. Returns `None` in
    /// that case, and also when the token was disposed (the listener is
    /// dropped without running).
    pub fn on_cancel<F>(&self, listener: F) -> Option<ListenerId>
    where
        F: FnOnce() + Send + 'static,
    {
        self.register(Box::new(listener))
    }

    fn register(&self, listener: CancelListener) -> Option<ListenerId> {
        let mut registry = self.inner.registry.lock();
        if self.inner.cancelled.load(Ordering::Acquire) {
            drop(registry);
            listener();
            return None;
        }

        match &mut *registry {
            Registry::Armed {
                next_id, listeners, ..
            } => {
                let id = ListenerId(*next_id);
                *next_id += 1;
                listeners.insert(id, listener);
                Some(id)
            }
            Registry::Released => None,
        }
    }

    /// Remove a listener that has not run yet.
    pub fn remove_listener(&self, id: ListenerId) {
        let removed = match &mut *self.inner.registry.lock() {
            Registry::Armed { listeners, .. } => listeners.remove(&id),
            Registry::Released => None,
        };
        // Dropped outside the lock: the closure may own handles whose drop
        // re-enters this token.
        drop(removed);
    }

    /// Cancel this token when `external` fires.
    ///
    /// The bridge is one-directional: cancelling `self` never cancels
    /// `external`. If `external` already fired, `self` is cancelled before
    /// this returns. The listener placed on `external` is removed once `self`
    /// is cancelled or disposed.
    pub fn link<S>(&self, external: &S)
    where
        S: CancelSignal + Clone + 'static,
    {
        if self.is_cancelled() {
            return;
        }

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let Some(id) = external.on_cancel(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                CancellationToken { inner }.cancel();
            }
        })) else {
            return;
        };

        let source = external.clone();
        let detach: Detach = Box::new(move || source.remove_listener(id));

        let mut registry = self.inner.registry.lock();
        match &mut *registry {
            Registry::Armed { links, .. } => links.push(detach),
            Registry::Released => {
                drop(registry);
                detach();
            }
        }
    }

    /// Release every listener and link without firing.
    ///
    /// After disposal the token can still be cancelled, but nothing is
    /// notified except [`cancelled`](Self::cancelled) futures.
    pub fn dispose(&self) {
        let released = core::mem::replace(&mut *self.inner.registry.lock(), Registry::Released);
        if let Registry::Armed { links, .. } = released {
            for detach in links {
                detach();
            }
        }
    }

    /// Number of listeners still waiting for cancellation.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        match &*self.inner.registry.lock() {
            Registry::Armed { listeners, .. } => listeners.len(),
            Registry::Released => 0,
        }
    }

    /// Wait asynchronously until the token is cancelled.
    ///
    /// If the token is already cancelled, this returns immediately.
    pub fn cancelled(&self) -> Cancelled<'_> {
        Cancelled {
            token: self,
            listener: None,
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl CancelSignal for CancellationToken {
    fn is_cancelled(&self) -> bool {
        CancellationToken::is_cancelled(self)
    }

    fn on_cancel(&self, listener: CancelListener) -> Option<ListenerId> {
        self.register(listener)
    }

    fn remove_listener(&self, id: ListenerId) {
        CancellationToken::remove_listener(self, id);
    }
}

/// Future returned by [`CancellationToken::cancelled()`].
pub struct Cancelled<'a> {
    token: &'a CancellationToken,
    listener: Option<EventListener>,
}

impl Future for Cancelled<'_> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();
        loop {
            if this.token.is_cancelled() {
                return Poll::Ready(());
            }

            match this.listener.as_mut() {
                Some(listener) => {
                    if Pin::new(listener).poll(cx).is_pending() {
                        return Poll::Pending;
                    }
                    this.listener = None;
                }
                // Re-checked at the top of the loop so a cancel between the
                // first check and listen() is not missed.
                None => this.listener = Some(this.token.inner.event.listen()),
            }
        }
    }
}
