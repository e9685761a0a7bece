// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core primitives for rivulet: one-shot cancellation tokens and lazy,
//! reference-counted multicast streams.
//!
//! A [`Multicast`] defers its underlying operation until the first
//! subscriber attaches, shares that single execution with every subscriber
//! of the same active window and tears it down through a
//! [`CancellationToken`] when the last subscriber leaves.

#[macro_use]
mod logging;

pub mod cancel_signal;
pub mod cancellation_token;
pub mod error;
pub mod multicast;
pub mod notification;
pub mod stream_item;
pub mod task;

pub use self::cancel_signal::{CancelListener, CancelSignal};
pub use self::cancellation_token::{Cancelled, CancellationToken, ListenerId};
pub use self::error::{IntoRivuletError, Result, ResultExt, RivuletError};
pub use self::multicast::{
    EmitError, Emitter, Multicast, MulticastStream, Operation, Subscription,
};
pub use self::notification::Notification;
pub use self::stream_item::StreamItem;
