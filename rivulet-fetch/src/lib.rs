// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Network fetches exposed as lazy multicast streams.
//!
//! [`Fetcher::fetch`] returns a [`Multicast<Response>`](rivulet_core::Multicast):
//! no request is issued until something subscribes, every subscriber of the
//! same active window shares one request, and the request is aborted when
//! the last subscriber leaves or the caller's cancellation signal fires.
//! Deliberate cancellation never surfaces as an error.

#[macro_use]
mod logging;

pub mod fetcher;
pub mod operation;
pub mod request;
pub mod response;
pub mod transport;

#[cfg(feature = "reqwest")]
pub mod reqwest_transport;

pub use self::fetcher::Fetcher;
pub use self::operation::FetchOperation;
pub use self::request::{FetchOptions, Method, Request};
pub use self::response::Response;
pub use self::transport::{Transport, TransportError, TransportFuture};

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;
