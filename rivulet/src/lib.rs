// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Rivulet
//!
//! Lazy, cancellable, multicast network fetches and the rendering of their
//! parsed results into document locations.
//!
//! ## Overview
//!
//! - A [`CancellationToken`] is a one-shot, multicast "stop" trigger. Tokens
//!   bridge external cancellation signals into local work with
//!   [`link`](CancellationToken::link).
//! - A [`Multicast`] runs its operation only once it has a subscriber, shares
//!   that single execution among everyone subscribed, tears it down when the
//!   last subscriber leaves and restarts it for the next one.
//! - A [`Fetcher`] turns each request into such a multicast: one transport
//!   call per active window, aborted natively when nobody is listening
//!   anymore. Deliberate cancellation ends the window silently; real failures
//!   are delivered once, as a terminal error.
//! - A [`FetchResult`] parses the response into content units and renders
//!   them into an [`InsertionTarget`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # #[cfg(feature = "reqwest")]
//! # async fn demo() {
//! use rivulet::prelude::*;
//!
//! let fetcher = Fetcher::new(ReqwestTransport::new());
//! let fragment = fetcher.fetch_result("https://example.com/fragment", FetchOptions::new());
//!
//! let sidebar: Region<Node> = Region::new();
//! let binding = fragment.render_into(sidebar.clone());
//!
//! // ... later, stop updating the sidebar; its content stays.
//! binding.cancel();
//! # }
//! ```

pub use rivulet_core::{
    CancelSignal, CancellationToken, EmitError, Emitter, Multicast, MulticastStream, Notification,
    Operation, Result, RivuletError, StreamItem, Subscription,
};
pub use rivulet_dom::{
    Binding, Element, FetchResult, FetchResultExt, InsertionTarget, MarkupParser, Node, Parser,
    Placement, Region, Teardown, TextParser,
};
#[cfg(feature = "reqwest")]
pub use rivulet_fetch::ReqwestTransport;
pub use rivulet_fetch::{
    FetchOperation, FetchOptions, Fetcher, Method, Request, Response, Transport, TransportError,
    TransportFuture,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use rivulet_core::{CancellationToken, Multicast, Notification, StreamItem};
    pub use rivulet_dom::{FetchResult, FetchResultExt, Node, Region, Teardown};
    #[cfg(feature = "reqwest")]
    pub use rivulet_fetch::ReqwestTransport;
    pub use rivulet_fetch::{FetchOptions, Fetcher, Response};
}
