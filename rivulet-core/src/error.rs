// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for rivulet.
//!
//! [`RivuletError`] is the value carried by a terminal failure notification.
//! Failures are never thrown out of `subscribe`; they travel through the
//! same channel as successful deliveries.
//!
//! # Examples
//!
//! ```
//! use rivulet_core::{Result, RivuletError};
//!
//! fn parse_body() -> Result<()> {
//!     Err(RivuletError::parse_error("unexpected end of input"))
//! }
//! ```

/// Root error type for all rivulet operations.
#[derive(Debug, thiserror::Error)]
pub enum RivuletError {
    /// The transport could not complete the request.
    ///
    /// Deliberate cancellation never produces this variant.
    #[error("Transport error: {context}")]
    Transport {
        /// Description of the transport failure
        context: String,
    },

    /// The response carried a non-success status and the caller asked for
    /// such responses to be treated as failures.
    #[error("Request to {url} failed with status {status}")]
    Status {
        /// HTTP status code of the response
        status: u16,
        /// Address the request was issued against
        url: String,
    },

    /// The payload could not be parsed into content units.
    #[error("Parse error: {context}")]
    Parse {
        /// Description of what the parser rejected
        context: String,
    },

    /// Stream processing encountered an error
    ///
    /// General error for operations that don't fit other categories.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong during stream processing
        context: String,
    },

    /// Custom error from user code
    ///
    /// Wraps errors produced by user-provided operations, parsers and callbacks.
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RivuletError {
    /// Create a transport error with the given context
    pub fn transport_error(context: impl Into<String>) -> Self {
        Self::Transport {
            context: context.into(),
        }
    }

    /// Create a status error for `url`
    pub fn status_error(status: u16, url: impl Into<String>) -> Self {
        Self::Status {
            status,
            url: url.into(),
        }
    }

    /// Create a parse error with the given context
    pub fn parse_error(context: impl Into<String>) -> Self {
        Self::Parse {
            context: context.into(),
        }
    }

    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Returns `true` if the failure originated in the transport layer,
    /// including rejected status codes.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Status { .. })
    }

    /// Returns `true` if the failure happened while parsing a payload.
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Specialized Result type for rivulet operations
pub type Result<T> = std::result::Result<T, RivuletError>;

/// Extension trait for converting errors into `RivuletError`
///
/// Implemented for every `std::error::Error + Send + Sync + 'static`.
pub trait IntoRivuletError {
    /// Convert this error into a `RivuletError`
    fn into_rivulet(self) -> RivuletError;
}

impl<E: std::error::Error + Send + Sync + 'static> IntoRivuletError for E {
    fn into_rivulet(self) -> RivuletError {
        RivuletError::user_error(self)
    }
}

/// Helper trait for adding context to `Result`s
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// # Errors
    /// Returns `Err(RivuletError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure (lazy evaluation)
    ///
    /// # Errors
    /// Returns `Err(RivuletError)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<RivuletError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        let context = context.into();
        self.with_context(|| context)
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| match e.into() {
            RivuletError::UserError(inner) => RivuletError::StreamProcessingError {
                context: format!("{}: {inner}", f()),
            },
            other => other,
        })
    }
}

impl Clone for RivuletError {
    fn clone(&self) -> Self {
        match self {
            Self::Transport { context } => Self::Transport {
                context: context.clone(),
            },
            Self::Status { status, url } => Self::Status {
                status: *status,
                url: url.clone(),
            },
            Self::Parse { context } => Self::Parse {
                context: context.clone(),
            },
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
            // Boxed user errors can't be cloned, keep the message
            Self::UserError(e) => Self::StreamProcessingError {
                context: format!("User error: {e}"),
            },
        }
    }
}
