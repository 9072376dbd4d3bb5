//! Configuration error types for the Mashery V3 SDK.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that an
//! invalid client setup fails before the first request is sent.
//!
//! # Example
//!
//! ```rust
//! use mashery_v3::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`V3Config`](crate::V3Config).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid Mashery V3 access token.")]
    EmptyAccessToken,

    /// Endpoint URL is invalid.
    #[error("Invalid endpoint URL '{url}'. Expected format: 'https://api.mashery.com/v3/rest'.")]
    InvalidEndpoint {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Page size is outside the range accepted by the remote API.
    #[error("Invalid page size {size}. Page size must be between 1 and 1000.")]
    InvalidPageSize {
        /// The rejected page size.
        size: u32,
    },

    /// Number of tries must allow at least one attempt.
    #[error("Invalid number of tries. At least one attempt is required.")]
    InvalidTries,

    /// Concurrency for per-item fetches must be positive.
    #[error("Invalid per-item concurrency. At least one concurrent fetch is required.")]
    InvalidConcurrency,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_access_token_error_message() {
        let message = ConfigError::EmptyAccessToken.to_string();
        assert!(message.contains("Access token cannot be empty"));
    }

    #[test]
    fn test_invalid_endpoint_error_message() {
        let error = ConfigError::InvalidEndpoint {
            url: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("Expected format"));
    }

    #[test]
    fn test_invalid_page_size_error_message() {
        let message = ConfigError::InvalidPageSize { size: 0 }.to_string();
        assert!(message.contains("Invalid page size 0"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField {
            field: "access_token",
        };
        let message = error.to_string();
        assert!(message.contains("access_token"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::InvalidTries;
        let _: &dyn std::error::Error = &error;
    }
}
