// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;
use rivulet_core::CancelSignal;
use std::sync::Arc;

/// Request method. Passed through to the transport untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    #[default]
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the transport is asked to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

/// Per-fetch configuration.
///
/// Method, headers and body are opaque to rivulet and handed to the
/// transport as-is. `signal` is an externally owned cancellation source that
/// aborts the request when it fires; `error_for_status` turns non-2xx
/// responses into terminal failures.
///
/// ```
/// use rivulet_core::CancellationToken;
/// use rivulet_fetch::{FetchOptions, Method};
/// use std::sync::Arc;
///
/// let abort = CancellationToken::new();
/// let options = FetchOptions::new()
///     .method(Method::Post)
///     .header("content-type", "application/json")
///     .body(br#"{"q":1}"#.to_vec())
///     .signal(Arc::new(abort.clone()))
///     .error_for_status(true);
/// assert_eq!(options.get_method(), Method::Post);
/// ```
#[derive(Clone, Default)]
pub struct FetchOptions {
    method: Method,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    signal: Option<Arc<dyn CancelSignal>>,
    error_for_status: bool,
}

impl FetchOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Abort the request whenever `signal` fires. rivulet never fires it.
    #[must_use]
    pub fn signal(mut self, signal: Arc<dyn CancelSignal>) -> Self {
        self.signal = Some(signal);
        self
    }

    /// Deliver non-2xx responses as [`RivuletError::Status`](rivulet_core::RivuletError::Status).
    #[must_use]
    pub fn error_for_status(mut self, enabled: bool) -> Self {
        self.error_for_status = enabled;
        self
    }

    #[must_use]
    pub fn get_method(&self) -> Method {
        self.method
    }

    pub(crate) fn cancel_signal(&self) -> Option<&Arc<dyn CancelSignal>> {
        self.signal.as_ref()
    }

    pub(crate) fn rejects_status(&self) -> bool {
        self.error_for_status
    }

    pub(crate) fn to_request(&self, url: String) -> Request {
        Request {
            url,
            method: self.method,
            headers: self.headers.clone(),
            body: self.body.clone(),
        }
    }
}

impl fmt::Debug for FetchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchOptions")
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("body", &self.body.as_ref().map(Vec::len))
            .field("signal", &self.signal.as_ref().map(|s| s.is_cancelled()))
            .field("error_for_status", &self.error_for_status)
            .finish()
    }
}
