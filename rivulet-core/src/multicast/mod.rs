// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Lazy, reference-counted multicast.
//!
//! A [`Multicast`] wraps an [`Operation`] and shares one execution of it
//! among every subscriber of an *active window*: the interval during which
//! at least one subscriber is attached.
//!
//! ## Characteristics
//!
//! - **Lazy**: nothing runs until the first [`subscribe`](Multicast::subscribe).
//! - **Shared**: subscribers that join while a window is open observe the
//!   same execution; they never trigger a second one.
//! - **Reference counted**: when the last subscription is cancelled, the
//!   window's [`CancellationToken`] fires and [`Operation::stop`] runs.
//! - **Restartable**: subscribing again after the window closed starts a
//!   fresh execution with a fresh token.
//! - **Single terminal**: each window delivers at most one terminal
//!   [`Notification`]. Late joiners of a window that already terminated
//!   receive that terminal notification on subscribe.
//!
//! ## Example
//!
//! ```
//! use rivulet_core::{Multicast, Notification};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::{Arc, Mutex};
//!
//! let starts = Arc::new(AtomicUsize::new(0));
//! let counter = starts.clone();
//! let source = Multicast::from_fn(move |_token, emitter| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//!     let _ = emitter.complete(42);
//! });
//!
//! assert_eq!(starts.load(Ordering::SeqCst), 0);
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = seen.clone();
//! let subscription = source.subscribe(move |n| sink.lock().unwrap().push(n));
//!
//! assert_eq!(starts.load(Ordering::SeqCst), 1);
//! assert_eq!(*seen.lock().unwrap(), vec![Notification::Complete(42)]);
//! subscription.cancel();
//! ```

mod emitter;
mod map;
mod stream;
mod subscription;

pub use self::emitter::{EmitError, Emitter};
pub use self::stream::MulticastStream;
pub use self::subscription::Subscription;

use crate::{CancellationToken, Notification, Result};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

use self::map::MapOperation;
use self::subscription::Unsubscribe;

/// Subscriber callback shared between the registry and in-flight broadcasts.
pub(crate) type Callback<T> = Arc<dyn Fn(Notification<T>) + Send + Sync + 'static>;

/// The work a [`Multicast`] shares among its subscribers.
pub trait Operation<T>: Send + Sync + 'static {
    /// Begin one execution.
    ///
    /// Called when the first subscriber of a window attaches. `token` fires
    /// when the window closes; `emitter` forwards results to every subscriber
    /// registered at the time of each delivery.
    fn start(&self, token: CancellationToken, emitter: Emitter<T>);

    /// Tear down after the last subscriber left.
    ///
    /// Runs after `token` fired.
    fn stop(&self) {}
}

struct FnOperation<F>(F);

impl<T, F> Operation<T> for FnOperation<F>
where
    F: Fn(CancellationToken, Emitter<T>) + Send + Sync + 'static,
{
    fn start(&self, token: CancellationToken, emitter: Emitter<T>) {
        (self.0)(token, emitter);
    }
}

pub(crate) struct Shared<T> {
    pub(crate) state: Mutex<State<T>>,
    operation: Box<dyn Operation<T>>,
}

pub(crate) struct State<T> {
    pub(crate) subscribers: BTreeMap<u64, Callback<T>>,
    next_subscriber: u64,
    pub(crate) window: Option<Window<T>>,
    windows_started: u64,
}

pub(crate) struct Window<T> {
    pub(crate) id: u64,
    token: CancellationToken,
    pub(crate) terminal: Option<Notification<T>>,
}

/// A lazy multicast over one shared [`Operation`].
///
/// Cheap to clone; all clones share the same subscriber registry and window.
/// See the [module documentation](self) for the lifecycle.
pub struct Multicast<T: Clone + Send + Sync + 'static> {
    shared: Arc<Shared<T>>,
}

impl<T: Clone + Send + Sync + 'static> Multicast<T> {
    /// Creates a multicast over `operation`. Nothing runs yet.
    pub fn new<O>(operation: O) -> Self
    where
        O: Operation<T>,
    {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    subscribers: BTreeMap::new(),
                    next_subscriber: 0,
                    window: None,
                    windows_started: 0,
                }),
                operation: Box::new(operation),
            }),
        }
    }

    /// Creates a multicast whose operation is the `start` closure.
    pub fn from_fn<F>(start: F) -> Self
    where
        F: Fn(CancellationToken, Emitter<T>) + Send + Sync + 'static,
    {
        Self::new(FnOperation(start))
    }

    /// Register `callback` for every notification of the current window.
    ///
    /// Starts the operation if no window is open. If the open window already
    /// delivered its terminal notification, `callback` receives it before
    /// this returns. Dropping or cancelling the returned [`Subscription`]
    /// detaches `callback`.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Notification<T>) + Send + Sync + 'static,
    {
        let callback: Callback<T> = Arc::new(callback);

        let (id, start, replay) = {
            let mut state = self.shared.state.lock();
            let id = state.next_subscriber;
            state.next_subscriber += 1;
            state.subscribers.insert(id, Arc::clone(&callback));

            match state.window.as_ref().map(|window| window.terminal.clone()) {
                Some(replay) => (id, None, replay),
                None => {
                    state.windows_started += 1;
                    let window = Window {
                        id: state.windows_started,
                        token: CancellationToken::new(),
                        terminal: None,
                    };
                    let start = (
                        window.token.clone(),
                        Emitter::new(Arc::downgrade(&self.shared), window.id),
                    );
                    state.window = Some(window);
                    (id, Some(start), None)
                }
            }
        };

        let subscription = Subscription::new(Arc::clone(&self.shared) as Arc<dyn Unsubscribe>, id);

        if let Some((token, emitter)) = start {
            debug!("multicast window {} started", emitter.window());
            self.shared.operation.start(token, emitter);
        }

        if let Some(terminal) = replay {
            callback(terminal);
        }

        subscription
    }

    /// Subscribe and consume the window as an async stream.
    ///
    /// The stream yields every value and error of the window and ends after
    /// the terminal notification. Dropping it unsubscribes.
    pub fn stream(&self) -> MulticastStream<T> {
        MulticastStream::new(self)
    }

    /// Derive a multicast that transforms every value with `f`.
    pub fn map<U, F>(&self, f: F) -> Multicast<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        self.try_map(move |value| Ok(f(value)))
    }

    /// Derive a multicast that transforms every value with the fallible `f`.
    ///
    /// A failure of `f` becomes the terminal error of the derived window.
    /// The derived multicast is itself lazy: its first subscriber subscribes
    /// upstream, its last departure unsubscribes.
    pub fn try_map<U, F>(&self, f: F) -> Multicast<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(T) -> Result<U> + Send + Sync + 'static,
    {
        Multicast::new(MapOperation::new(self.clone(), f))
    }

    /// Returns the number of currently attached subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.shared.state.lock().subscribers.len()
    }

    /// Returns `true` while an active window is open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.shared.state.lock().window.is_some()
    }

    /// Returns how many times the operation has been started.
    #[must_use]
    pub fn windows_started(&self) -> u64 {
        self.shared.state.lock().windows_started
    }
}

impl<T: Clone + Send + Sync + 'static> Clone for Multicast<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Unsubscribe for Shared<T> {
    fn unsubscribe(&self, id: u64) {
        let (removed, closed) = {
            let mut state = self.state.lock();
            let removed = state.subscribers.remove(&id);
            let closed = if removed.is_some() && state.subscribers.is_empty() {
                state.window.take()
            } else {
                None
            };
            (removed, closed)
        };
        // The callback may own handles whose drop re-enters this multicast.
        drop(removed);

        if let Some(window) = closed {
            debug!("multicast window {} closed", window.id);
            window.token.cancel();
            self.operation.stop();
        }
    }
}
