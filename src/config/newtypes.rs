//! Validated newtype wrappers for configuration values.
//!
//! Invalid values are rejected on construction with a [`ConfigError`].

use crate::error::ConfigError;
use std::fmt;

/// A validated Mashery V3 access token.
///
/// The `Debug` implementation masks the token so it never ends up in logs.
///
/// # Example
///
/// ```rust
/// use mashery_v3::AccessToken;
///
/// let token = AccessToken::new("abc123").unwrap();
/// assert_eq!(token.as_ref(), "abc123");
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty or blank.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// A validated base URL of the V3 REST API.
///
/// Accepts `scheme://host[:port][/path]`. A trailing `/` is trimmed so that
/// resource paths (which always start with `/`) can be appended directly.
///
/// # Example
///
/// ```rust
/// use mashery_v3::Endpoint;
///
/// let endpoint = Endpoint::new("https://api.mashery.com/v3/rest/").unwrap();
/// assert_eq!(endpoint.as_ref(), "https://api.mashery.com/v3/rest");
/// assert_eq!(endpoint.host_name(), "api.mashery.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    url: String,
    host_start: usize,
    host_end: usize,
}

impl Endpoint {
    /// The public Mashery V3 REST endpoint.
    pub const DEFAULT: &'static str = "https://api.mashery.com/v3/rest";

    /// Creates a new validated endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if the URL has no scheme or host,
    /// or carries a query string or fragment.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidEndpoint { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        if url.contains(['?', '#']) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(invalid());
        }

        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            host_start,
            host_end,
        })
    }

    /// Returns the host name portion of the endpoint.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            url: Self::DEFAULT.to_string(),
            host_start: "https://".len(),
            host_end: "https://api.mashery.com".len(),
        }
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
