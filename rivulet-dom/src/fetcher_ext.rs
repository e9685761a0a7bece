// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{FetchResult, MarkupParser, Node, Parser};
use rivulet_fetch::{FetchOptions, Fetcher, Transport};

/// Fetch results straight from a [`Fetcher`].
pub trait FetchResultExt {
    /// A lazy fetch of `url` parsed as a markup fragment.
    fn fetch_result(&self, url: impl Into<String>, options: FetchOptions) -> FetchResult<Node>;

    /// A lazy fetch of `url` parsed with `parser`.
    fn fetch_result_with<U, P>(
        &self,
        url: impl Into<String>,
        options: FetchOptions,
        parser: P,
    ) -> FetchResult<U>
    where
        U: Clone + Send + Sync + 'static,
        P: Parser<U>;
}

impl<X: Transport> FetchResultExt for Fetcher<X> {
    fn fetch_result(&self, url: impl Into<String>, options: FetchOptions) -> FetchResult<Node> {
        self.fetch_result_with(url, options, MarkupParser)
    }

    fn fetch_result_with<U, P>(
        &self,
        url: impl Into<String>,
        options: FetchOptions,
        parser: P,
    ) -> FetchResult<U>
    where
        U: Clone + Send + Sync + 'static,
        P: Parser<U>,
    {
        FetchResult::from_source(&self.fetch(url, options), parser)
    }
}
