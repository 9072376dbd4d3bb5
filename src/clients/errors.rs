//! HTTP-level error types.
//!
//! - [`HttpResponseError`]: a non-2xx response that was not retried
//! - [`MaxHttpRetriesExceededError`]: retryable failures outlasted the configured tries
//! - [`InvalidHttpRequestError`]: a request failed validation before it was sent
//! - [`HttpError`]: the union of the above plus network failures
//!
//! These errors carry no knowledge of which SDK operation issued the request;
//! the resource engine wraps them with the operation's context tag.

use thiserror::Error;

/// Error returned when a request receives a non-successful response.
///
/// `message` is the remote `errorMessage` when the body carries one, or the
/// raw body otherwise.
#[derive(Debug, Error)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Error message extracted from the response body.
    pub message: String,
    /// Value of the `X-Mashery-Error-Code` header, if present.
    pub error_code: Option<String>,
}

/// Error returned when maximum retry attempts have been exhausted.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last status {code}: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Error message from the last response.
    pub message: String,
    /// Value of the `X-Mashery-Error-Code` header of the last response.
    pub error_code: Option<String>,
}

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request path is not absolute.
    #[error("Request path '{path}' must start with '/'.")]
    RelativePath {
        /// The offending path.
        path: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code of the failed response, if one was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            Self::InvalidRequest(_) | Self::Network(_) => None,
        }
    }
}

// Verify HttpError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
};
