// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{RivuletError, StreamItem};

/// What a [`Multicast`](crate::Multicast) subscriber is told.
///
/// Every active window ends with at most one terminal notification
/// (`Complete`, `Error` or `Cancelled`). `Next` carries intermediate progress
/// and may appear any number of times before it.
#[derive(Debug, Clone)]
pub enum Notification<T> {
    /// A non-terminal value.
    Next(T),
    /// The final value of the window.
    Complete(T),
    /// The operation failed.
    Error(RivuletError),
    /// The operation was stopped by its own cancellation token.
    ///
    /// This is clean termination, not a failure: it carries neither a value
    /// nor an error.
    Cancelled,
}

impl<T> Notification<T> {
    /// Returns `true` for the notifications that end a window.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Next(_))
    }

    /// Returns the carried value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Next(v) | Self::Complete(v) => Some(v),
            Self::Error(_) | Self::Cancelled => None,
        }
    }

    /// Converts into the item an async consumer would observe.
    ///
    /// `Cancelled` has no item representation and yields `None`.
    pub fn into_stream_item(self) -> Option<StreamItem<T>> {
        match self {
            Self::Next(v) | Self::Complete(v) => Some(StreamItem::Value(v)),
            Self::Error(e) => Some(StreamItem::Error(e)),
            Self::Cancelled => None,
        }
    }
}

impl<T: PartialEq> PartialEq for Notification<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Next(a), Self::Next(b)) | (Self::Complete(a), Self::Complete(b)) => a == b,
            (Self::Cancelled, Self::Cancelled) => true,
            _ => false, // Errors are never equal
        }
    }
}
