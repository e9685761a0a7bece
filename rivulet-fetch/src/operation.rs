// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The [`Operation`] behind every fetch.

use crate::{FetchOptions, Request, Response, Transport, TransportError};
use futures::future::{AbortHandle, Abortable, Aborted};
use rivulet_core::task::spawn_detached;
use rivulet_core::{CancellationToken, Emitter, Operation, RivuletError};
use std::sync::Arc;

/// One network request bound to a transport.
///
/// Each start issues the request once with a native abort handle wired to the
/// window's token: the request is aborted when the last subscriber leaves or
/// when the caller's signal from [`FetchOptions::signal`] fires, whichever
/// comes first. A signal that already fired aborts the call before it can
/// produce anything.
///
/// Settlement policy:
/// - a response is delivered as the terminal value (or as
///   [`RivuletError::Status`] with `error_for_status`);
/// - an aborted call, whether aborted through the native handle or reported
///   by the transport as [`TransportError::Aborted`], ends the window
///   silently;
/// - any other failure is delivered as the terminal error.
pub struct FetchOperation<X> {
    transport: Arc<X>,
    request: Request,
    options: FetchOptions,
}

impl<X: Transport> FetchOperation<X> {
    pub fn new(transport: Arc<X>, url: impl Into<String>, options: FetchOptions) -> Self {
        Self {
            transport,
            request: options.to_request(url.into()),
            options,
        }
    }

    #[must_use]
    pub fn request(&self) -> &Request {
        &self.request
    }
}

impl<X: Transport> Operation<Response> for FetchOperation<X> {
    fn start(&self, token: CancellationToken, emitter: Emitter<Response>) {
        let (abort, registration) = AbortHandle::new_pair();

        token.on_cancel(move || abort.abort());
        if let Some(signal) = self.options.cancel_signal() {
            token.link(signal);
        }

        debug!("fetch {} {} issued", self.request.method, self.request.url);
        let call = Abortable::new(self.transport.send(self.request.clone()), registration);
        let url = self.request.url.clone();
        let rejects_status = self.options.rejects_status();

        spawn_detached(async move {
            let outcome = call.await;
            settle(outcome, &url, rejects_status, &emitter);
        });
    }
}

fn settle(
    outcome: Result<Result<Response, TransportError>, Aborted>,
    url: &str,
    rejects_status: bool,
    emitter: &Emitter<Response>,
) {
    let delivered = match outcome {
        Err(Aborted) | Ok(Err(TransportError::Aborted)) => {
            debug!("fetch {} aborted, ending quietly", url);
            emitter.cancelled()
        }
        Ok(Err(error)) => {
            debug!("fetch {} failed: {}", url, error);
            emitter.error(error.into())
        }
        Ok(Ok(response)) if rejects_status && !response.is_success() => {
            emitter.error(RivuletError::status_error(response.status(), url))
        }
        Ok(Ok(response)) => emitter.complete(response),
    };

    if delivered.is_err() {
        trace!("fetch {} settled after its window closed", url);
    }
}
