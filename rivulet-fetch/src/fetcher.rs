// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{FetchOperation, FetchOptions, Response, Transport};
use rivulet_core::Multicast;
use std::sync::Arc;

/// Entry point for creating fetches over one transport.
///
/// ```no_run
/// # #[cfg(feature = "reqwest")]
/// # async fn demo() {
/// use futures::StreamExt;
/// use rivulet_fetch::{FetchOptions, Fetcher, ReqwestTransport};
///
/// let fetcher = Fetcher::new(ReqwestTransport::new());
/// let page = fetcher.fetch("https://example.com/", FetchOptions::new());
///
/// // Nothing has been sent yet; the first subscriber issues the request.
/// let mut first = page.stream();
/// let mut second = page.stream();
/// let (a, b) = futures::join!(first.next(), second.next());
/// # let _ = (a, b);
/// # }
/// ```
pub struct Fetcher<X> {
    transport: Arc<X>,
}

impl<X: Transport> Fetcher<X> {
    pub fn new(transport: X) -> Self {
        Self::from_shared(Arc::new(transport))
    }

    pub fn from_shared(transport: Arc<X>) -> Self {
        Self { transport }
    }

    /// A lazy fetch of `url`.
    ///
    /// The request is issued when the first subscriber attaches, shared by
    /// every subscriber of that window, and issued again by the first
    /// subscriber after the window closed.
    pub fn fetch(&self, url: impl Into<String>, options: FetchOptions) -> Multicast<Response> {
        Multicast::new(FetchOperation::new(
            Arc::clone(&self.transport),
            url,
            options,
        ))
    }

    #[must_use]
    pub fn transport(&self) -> &Arc<X> {
        &self.transport
    }
}

impl<X> Clone for Fetcher<X> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}
