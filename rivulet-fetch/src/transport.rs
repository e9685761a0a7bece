// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The transport primitive rivulet drives.

use crate::{Request, Response};
use futures::future::BoxFuture;
use rivulet_core::RivuletError;
use std::sync::Arc;

/// Eventual outcome of one transport call.
pub type TransportFuture = BoxFuture<'static, Result<Response, TransportError>>;

/// Why a transport call did not produce a response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The call was interrupted on purpose.
    ///
    /// rivulet treats every aborted call as clean termination and never
    /// reports it to subscribers.
    #[error("request aborted")]
    Aborted,

    /// The request could not be completed.
    #[error("network failure: {0}")]
    Network(String),

    /// The request could not even be formed (bad address, bad header, ...).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}

impl From<TransportError> for RivuletError {
    fn from(error: TransportError) -> Self {
        RivuletError::transport_error(error.to_string())
    }
}

/// Issues a request and resolves to a terminal response or failure.
///
/// The returned future is the call: rivulet may drop it before completion to
/// abort the request, so implementations should release their resources on
/// drop.
pub trait Transport: Send + Sync + 'static {
    fn send(&self, request: Request) -> TransportFuture;
}

impl<X: Transport + ?Sized> Transport for Arc<X> {
    fn send(&self, request: Request) -> TransportFuture {
        (**self).send(request)
    }
}
