// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::{Callback, Shared};
use crate::{Notification, RivuletError};
use std::sync::Weak;

/// Errors returned to the emitting side of a [`Multicast`](crate::Multicast).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    /// The window this emitter belongs to has closed (all subscribers left)
    /// or the multicast was dropped.
    #[error("the active window of this emitter has closed")]
    Inactive,

    /// The window already delivered its terminal notification.
    #[error("the active window already delivered a terminal notification")]
    AlreadyTerminated,
}

/// Delivery sink handed to [`Operation::start`](crate::Operation::start).
///
/// An emitter is bound to the window it was created for. Once that window
/// closes every call returns [`EmitError::Inactive`] and nothing is
/// delivered, so a late result of a torn-down execution can never reach the
/// subscribers of a newer window.
pub struct Emitter<T> {
    shared: Weak<Shared<T>>,
    window: u64,
}

impl<T: Clone + Send + Sync + 'static> Emitter<T> {
    pub(crate) fn new(shared: Weak<Shared<T>>, window: u64) -> Self {
        Self { shared, window }
    }

    pub(crate) fn window(&self) -> u64 {
        self.window
    }

    /// Deliver a non-terminal value.
    ///
    /// # Errors
    /// See [`emit`](Self::emit).
    pub fn next(&self, value: T) -> Result<(), EmitError> {
        self.emit(Notification::Next(value))
    }

    /// Deliver the final value of the window.
    ///
    /// # Errors
    /// See [`emit`](Self::emit).
    pub fn complete(&self, value: T) -> Result<(), EmitError> {
        self.emit(Notification::Complete(value))
    }

    /// Deliver a terminal failure.
    ///
    /// # Errors
    /// See [`emit`](Self::emit).
    pub fn error(&self, error: RivuletError) -> Result<(), EmitError> {
        self.emit(Notification::Error(error))
    }

    /// End the window silently after a self-induced cancellation.
    ///
    /// # Errors
    /// See [`emit`](Self::emit).
    pub fn cancelled(&self) -> Result<(), EmitError> {
        self.emit(Notification::Cancelled)
    }

    /// Forward `notification` to every subscriber registered right now.
    ///
    /// The subscriber set is snapshotted before the first callback runs, so
    /// subscribers cancelling (or joining) from inside a callback do not
    /// change who receives this delivery.
    ///
    /// # Errors
    /// - [`EmitError::Inactive`] if the window closed.
    /// - [`EmitError::AlreadyTerminated`] if a terminal notification was
    ///   already delivered in this window.
    pub fn emit(&self, notification: Notification<T>) -> Result<(), EmitError> {
        let Some(shared) = self.shared.upgrade() else {
            return Err(EmitError::Inactive);
        };

        let subscribers: Vec<Callback<T>> = {
            let mut guard = shared.state.lock();
            let state = &mut *guard;
            let window = match state.window.as_mut() {
                Some(window) if window.id == self.window => window,
                _ => return Err(EmitError::Inactive),
            };

            if window.terminal.is_some() {
                warn!(
                    "multicast window {} received a delivery after its terminal notification",
                    self.window
                );
                return Err(EmitError::AlreadyTerminated);
            }

            if notification.is_terminal() {
                trace!("multicast window {} terminated", self.window);
                window.terminal = Some(notification.clone());
            }

            state.subscribers.values().cloned().collect()
        };

        for subscriber in subscribers {
            subscriber(notification.clone());
        }
        Ok(())
    }

    /// Returns `true` while the window is open and has not terminated.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.shared.upgrade().is_some_and(|shared| {
            shared
                .state
                .lock()
                .window
                .as_ref()
                .is_some_and(|window| window.id == self.window && window.terminal.is_none())
        })
    }
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Weak::clone(&self.shared),
            window: self.window,
        }
    }
}
