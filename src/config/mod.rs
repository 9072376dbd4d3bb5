//! Configuration types for the Mashery V3 SDK.
//!
//! - [`V3Config`]: immutable settings shared by the transport
//! - [`V3ConfigBuilder`]: builder for [`V3Config`]
//! - [`AccessToken`]: validated bearer token with masked debug output
//! - [`Endpoint`]: validated base URL of the V3 REST API
//!
//! # Example
//!
//! ```rust
//! use mashery_v3::{V3Config, AccessToken};
//!
//! let config = V3Config::builder()
//!     .access_token(AccessToken::new("token").unwrap())
//!     .page_size(200)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.page_size(), 200);
//! ```

mod newtypes;

pub use newtypes::{AccessToken, Endpoint};

use std::time::Duration;

use crate::error::ConfigError;

/// Default number of attempts per HTTP exchange.
pub const DEFAULT_TRIES: u32 = 3;

/// Default page size for per-page collection sweeps.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Largest `limit` the V3 API accepts.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Default number of per-item units fetched concurrently.
pub const DEFAULT_PER_ITEM_CONCURRENCY: usize = 4;

/// Configuration for the Mashery V3 SDK.
///
/// `V3Config` is `Clone + Send + Sync` and never changes after it is built.
#[derive(Clone, Debug)]
pub struct V3Config {
    access_token: AccessToken,
    endpoint: Endpoint,
    tries: u32,
    retry_wait: Duration,
    page_size: u32,
    per_item_concurrency: usize,
    user_agent_prefix: Option<String>,
}

impl V3Config {
    /// Creates a new builder for constructing a `V3Config`.
    #[must_use]
    pub fn builder() -> V3ConfigBuilder {
        V3ConfigBuilder::new()
    }

    /// Returns the access token.
    #[must_use]
    pub const fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the API endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the number of attempts made for each HTTP exchange.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    /// Returns the fixed wait between retried attempts.
    #[must_use]
    pub const fn retry_wait(&self) -> Duration {
        self.retry_wait
    }

    /// Returns the default page size for per-page sweeps.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns how many per-item units may be fetched at once.
    #[must_use]
    pub const fn per_item_concurrency(&self) -> usize {
        self.per_item_concurrency
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify V3Config is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<V3Config>();
};

/// Builder for constructing [`V3Config`] instances.
///
/// Only `access_token` is required.
///
/// # Defaults
///
/// - `endpoint`: [`Endpoint::DEFAULT`]
/// - `tries`: [`DEFAULT_TRIES`]
/// - `retry_wait`: 1 second
/// - `page_size`: [`DEFAULT_PAGE_SIZE`]
/// - `per_item_concurrency`: [`DEFAULT_PER_ITEM_CONCURRENCY`]
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct V3ConfigBuilder {
    access_token: Option<AccessToken>,
    endpoint: Option<Endpoint>,
    tries: Option<u32>,
    retry_wait: Option<Duration>,
    page_size: Option<u32>,
    per_item_concurrency: Option<usize>,
    user_agent_prefix: Option<String>,
}

impl V3ConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the access token (required).
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the API endpoint.
    #[must_use]
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the number of attempts made for each HTTP exchange.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Sets the wait between retried attempts.
    #[must_use]
    pub const fn retry_wait(mut self, wait: Duration) -> Self {
        self.retry_wait = Some(wait);
        self
    }

    /// Sets the default page size for per-page sweeps.
    #[must_use]
    pub const fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Sets how many per-item units may be fetched concurrently.
    #[must_use]
    pub const fn per_item_concurrency(mut self, concurrency: usize) -> Self {
        self.per_item_concurrency = Some(concurrency);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`V3Config`], validating every field.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingRequiredField`] if `access_token` is not set
    /// - [`ConfigError::InvalidTries`] if `tries` is zero
    /// - [`ConfigError::InvalidPageSize`] if `page_size` is outside `1..=1000`
    /// - [`ConfigError::InvalidConcurrency`] if `per_item_concurrency` is zero
    pub fn build(self) -> Result<V3Config, ConfigError> {
        let access_token = self.access_token.ok_or(ConfigError::MissingRequiredField {
            field: "access_token",
        })?;

        let tries = self.tries.unwrap_or(DEFAULT_TRIES);
        if tries == 0 {
            return Err(ConfigError::InvalidTries);
        }

        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(ConfigError::InvalidPageSize { size: page_size });
        }

        let per_item_concurrency = self
            .per_item_concurrency
            .unwrap_or(DEFAULT_PER_ITEM_CONCURRENCY);
        if per_item_concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency);
        }

        Ok(V3Config {
            access_token,
            endpoint: self.endpoint.unwrap_or_default(),
            tries,
            retry_wait: self.retry_wait.unwrap_or(Duration::from_secs(1)),
            page_size,
            per_item_concurrency,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
