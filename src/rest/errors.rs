//! Error type for resource engine and SDK method failures.
//!
//! Every variant produced by the engine carries the descriptor's context tag
//! (e.g. `"package"`, `"all package keys"`), so callers can tell which logical
//! operation failed without looking at resource paths or status codes.
//!
//! HTTP status codes map to variants as follows:
//!
//! - **404**: [`V3Error::NotFound`]
//! - **any other non-2xx**: [`V3Error::Remote`]
//! - **2xx with an unexpected body**: [`V3Error::Decode`]
//!
//! # Example
//!
//! ```rust,ignore
//! use mashery_v3::V3Error;
//!
//! match client.get_package(&ctx, &PackageId::new("abc")).await {
//!     Ok(package) => println!("Found: {:?}", package.name),
//!     Err(V3Error::NotFound { context, .. }) => println!("{context} does not exist"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::HttpError;

/// Classification of a [`V3Error`], independent of the context it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The remote reported the resource absent.
    NotFound,
    /// The remote answered with a non-success status other than 404.
    RemoteFault,
    /// A 2xx body did not match the expected shape.
    DecodeFault,
    /// The registry slot for the method is empty.
    NotImplemented,
    /// The SDK was used incorrectly; no request was sent.
    UsageFault,
    /// The exchange failed below HTTP (connection, TLS, ...).
    Transport,
    /// The caller cancelled the operation.
    Cancelled,
}

/// Error type for V3 SDK operations.
#[derive(Debug, Error)]
pub enum V3Error {
    /// The remote reports the resource absent (HTTP 404).
    #[error("{context}: resource {resource} not found")]
    NotFound {
        /// Context tag of the failed operation.
        context: String,
        /// Resource path that was requested.
        resource: String,
    },

    /// The remote answered with any other non-success status.
    #[error("{context}: remote fault (HTTP {status}): {message}")]
    Remote {
        /// Context tag of the failed operation.
        context: String,
        /// HTTP status code of the last response.
        status: u16,
        /// Error message reported by the remote.
        message: String,
        /// Value of the `X-Mashery-Error-Code` header, if present.
        error_code: Option<String>,
    },

    /// A 2xx response body did not match the expected shape.
    #[error("{context}: unexpected response body: {source}")]
    Decode {
        /// Context tag of the failed operation.
        context: String,
        /// The underlying decoding failure.
        #[source]
        source: serde_json::Error,
    },

    /// No implementation is wired for the method.
    #[error("method {method} is not implemented by this client")]
    NotImplemented {
        /// Name of the SDK method whose slot is empty.
        method: &'static str,
    },

    /// The SDK was used incorrectly. Raised before any request is sent.
    #[error("{context}: illegal usage: {reason}")]
    Usage {
        /// Context tag of the operation that was misused.
        context: String,
        /// What was wrong.
        reason: String,
    },

    /// The HTTP exchange failed without a usable response.
    #[error("{context}: transport failure: {source}")]
    Transport {
        /// Context tag of the failed operation.
        context: String,
        /// The underlying HTTP error.
        #[source]
        source: HttpError,
    },

    /// The caller's cancellation token fired before the operation completed.
    #[error("{context}: operation cancelled")]
    Cancelled {
        /// Context tag of the cancelled operation.
        context: String,
    },

    /// A collection sweep failed part-way. Already fetched batches are discarded.
    #[error("{context}: collection fetch failed after {completed_batches} batch(es): {source}")]
    Pagination {
        /// Context tag of the collection operation.
        context: String,
        /// Number of batches that had been fetched successfully.
        completed_batches: usize,
        /// The failure that aborted the sweep.
        #[source]
        source: Box<V3Error>,
    },
}

impl V3Error {
    /// Creates a [`V3Error::NotImplemented`] for the named method.
    #[must_use]
    pub const fn not_implemented(method: &'static str) -> Self {
        Self::NotImplemented { method }
    }

    /// Creates a [`V3Error::Usage`].
    #[must_use]
    pub fn usage(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Usage {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Creates a [`V3Error::Cancelled`].
    #[must_use]
    pub fn cancelled(context: impl Into<String>) -> Self {
        Self::Cancelled {
            context: context.into(),
        }
    }

    /// Creates a [`V3Error::Decode`].
    #[must_use]
    pub fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            context: context.into(),
            source,
        }
    }

    /// Wraps the failure of a collection sweep.
    #[must_use]
    pub fn pagination(context: impl Into<String>, completed_batches: usize, source: Self) -> Self {
        Self::Pagination {
            context: context.into(),
            completed_batches,
            source: Box::new(source),
        }
    }

    /// Classifies an HTTP failure for the given operation.
    ///
    /// - 404 responses become [`V3Error::NotFound`]
    /// - other responses, including exhausted retries, become [`V3Error::Remote`]
    /// - request validation failures become [`V3Error::Usage`]
    /// - network failures become [`V3Error::Transport`]
    #[must_use]
    pub fn from_http(context: &str, resource: &str, error: HttpError) -> Self {
        match error {
            HttpError::Response(e) if e.code == 404 => Self::NotFound {
                context: context.to_string(),
                resource: resource.to_string(),
            },
            HttpError::Response(e) => Self::Remote {
                context: context.to_string(),
                status: e.code,
                message: e.message,
                error_code: e.error_code,
            },
            HttpError::MaxRetries(e) => Self::Remote {
                context: context.to_string(),
                status: e.code,
                message: format!("gave up after {} tries: {}", e.tries, e.message),
                error_code: e.error_code,
            },
            HttpError::InvalidRequest(e) => Self::usage(context, e.to_string()),
            HttpError::Network(_) => Self::Transport {
                context: context.to_string(),
                source: error,
            },
        }
    }

    /// Returns the classification of this error.
    ///
    /// A [`V3Error::Pagination`] reports the kind of the failure that aborted it.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Remote { .. } => ErrorKind::RemoteFault,
            Self::Decode { .. } => ErrorKind::DecodeFault,
            Self::NotImplemented { .. } => ErrorKind::NotImplemented,
            Self::Usage { .. } => ErrorKind::UsageFault,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Cancelled { .. } => ErrorKind::Cancelled,
            Self::Pagination { source, .. } => source.kind(),
        }
    }

    /// Returns the context tag of the failed operation.
    ///
    /// For [`V3Error::NotImplemented`] this is the method name.
    #[must_use]
    pub fn context(&self) -> &str {
        match self {
            Self::NotFound { context, .. }
            | Self::Remote { context, .. }
            | Self::Decode { context, .. }
            | Self::Usage { context, .. }
            | Self::Transport { context, .. }
            | Self::Cancelled { context }
            | Self::Pagination { context, .. } => context,
            Self::NotImplemented { method } => method,
        }
    }

    /// Returns the HTTP status of the remote failure, if there was one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Remote { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status(),
            Self::Pagination { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Returns `true` if this error reports a missing remote resource.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

// Verify V3Error is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<V3Error>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError};

    fn response_error(code: u16) -> HttpError {
        HttpError::Response(HttpResponseError {
            code,
            message: "boom".to_string(),
            error_code: Some("ERR_X".to_string()),
        })
    }

    #[test]
    fn test_404_maps_to_not_found_with_context() {
        let error = V3Error::from_http("package key", "/packageKeys/k1", response_error(404));

        assert!(matches!(
            &error,
            V3Error::NotFound { context, resource }
                if context == "package key" && resource == "/packageKeys/k1"
        ));
        assert!(error.is_not_found());
        assert_eq!(error.status(), Some(404));
        assert!(error.to_string().starts_with("package key:"));
    }

    #[test]
    fn test_other_status_maps_to_remote_fault() {
        let error = V3Error::from_http("package", "/packages/p1", response_error(400));

        assert_eq!(error.kind(), ErrorKind::RemoteFault);
        assert_eq!(error.status(), Some(400));
        assert_eq!(error.context(), "package");
        assert!(matches!(
            error,
            V3Error::Remote { error_code: Some(ref c), .. } if c == "ERR_X"
        ));
    }

    #[test]
    fn test_exhausted_retries_map_to_remote_fault() {
        let error = V3Error::from_http(
            "service",
            "/services/s1",
            HttpError::MaxRetries(MaxHttpRetriesExceededError {
                code: 503,
                tries: 3,
                message: "unavailable".to_string(),
                error_code: None,
            }),
        );

        assert_eq!(error.kind(), ErrorKind::RemoteFault);
        assert_eq!(error.status(), Some(503));
        assert!(error.to_string().contains("gave up after 3 tries"));
    }

    #[test]
    fn test_invalid_request_maps_to_usage_fault() {
        let error = V3Error::from_http(
            "package",
            "/packages",
            HttpError::InvalidRequest(InvalidHttpRequestError::MissingBody {
                method: "post".to_string(),
            }),
        );
        assert_eq!(error.kind(), ErrorKind::UsageFault);
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_not_implemented_names_method() {
        let error = V3Error::not_implemented("GetPackage");
        assert_eq!(error.kind(), ErrorKind::NotImplemented);
        assert_eq!(error.context(), "GetPackage");
        assert!(error.to_string().contains("GetPackage"));
    }

    #[test]
    fn test_pagination_error_reports_cause_kind() {
        let cause = V3Error::from_http("all package keys", "/packageKeys", response_error(500));
        let error = V3Error::pagination("all package keys", 2, cause);

        assert_eq!(error.kind(), ErrorKind::RemoteFault);
        assert_eq!(error.status(), Some(500));
        assert!(error.to_string().contains("after 2 batch(es)"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_cancelled_error() {
        let error = V3Error::cancelled("all members");
        assert_eq!(error.kind(), ErrorKind::Cancelled);
        assert_eq!(error.to_string(), "all members: operation cancelled");
    }
}
