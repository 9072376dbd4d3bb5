//! HTTP client for V3 API communication.
//!
//! [`HttpClient`] sends authenticated requests and retries throttled and
//! transient server failures. It knows nothing about resources; the
//! [`V3Transport`](crate::rest::V3Transport) builds on top of it.

use std::collections::HashMap;
use std::time::Duration;

use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::V3Config;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound on a server-requested `Retry-After` wait.
const MAX_RETRY_AFTER: Duration = Duration::from_secs(300);

/// HTTP client for making requests to the V3 API.
///
/// The client handles:
/// - URL construction from the configured endpoint
/// - Default headers including User-Agent and the bearer token
/// - Retries for throttling (429, 403 over-QPS) and 500/502/503/504 responses
///
/// `HttpClient` is `Send + Sync` and safe to share across tasks.
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_uri: String,
    default_headers: HashMap<String, String>,
    retry_wait: Duration,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: &V3Config) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}Mashery V3 Rust Client v{SDK_VERSION}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", config.access_token().as_ref()),
        );

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_uri: config.endpoint().as_ref().to_string(),
            default_headers,
            retry_wait: config.retry_wait(),
        }
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request to the V3 API.
    ///
    /// Only 2xx responses are returned as `Ok`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - A non-retryable non-2xx response is received (`Response`)
    /// - Retryable failures outlast `request.tries` (`MaxRetries`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!("{}{}", self.base_uri, request.path);

        let mut headers = self.default_headers.clone();
        if request.body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let mut req_builder = match request.http_method {
                HttpMethod::Get => self.client.get(&url),
                HttpMethod::Post => self.client.post(&url),
                HttpMethod::Put => self.client.put(&url),
                HttpMethod::Delete => self.client.delete(&url),
            };

            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }

            if !request.query.is_empty() {
                req_builder = req_builder.query(&request.query);
            }

            if let Some(body) = &request.body {
                req_builder = req_builder.body(body.to_string());
            }

            tracing::debug!(
                method = %request.http_method,
                path = %request.path,
                attempt = tries,
                "sending V3 request"
            );

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await.unwrap_or_default();

            let body = if body_text.trim().is_empty() {
                serde_json::Value::Null
            } else {
                serde_json::from_str(&body_text)
                    .unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }))
            };

            let response = HttpResponse::new(code, res_headers, body);

            if response.is_ok() {
                return Ok(response);
            }

            let message = response.error_message();
            let error_code = response.error_code().map(String::from);

            if !Self::is_retryable(&response) {
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message,
                    error_code,
                }));
            }

            if tries >= request.tries {
                if request.tries == 1 {
                    return Err(HttpError::Response(HttpResponseError {
                        code,
                        message,
                        error_code,
                    }));
                }
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: request.tries,
                    message,
                    error_code,
                }));
            }

            let delay = self.calculate_retry_delay(&response);
            tracing::warn!(
                "V3 request to {} failed with status {} (attempt {}/{}), retrying in {:?}",
                request.path,
                code,
                tries,
                request.tries,
                delay
            );
            tokio::time::sleep(delay).await;
        }
    }

    fn is_retryable(response: &HttpResponse) -> bool {
        response.is_throttled() || matches!(response.code, 500 | 502 | 503 | 504)
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Throttled responses honour `Retry-After` up to [`MAX_RETRY_AFTER`];
    /// everything else waits the configured time.
    fn calculate_retry_delay(&self, response: &HttpResponse) -> Duration {
        if response.is_throttled() {
            if let Some(delay) = response
                .retry_request_after
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
            {
                return delay.min(MAX_RETRY_AFTER);
            }
        }
        self.retry_wait
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, Endpoint};
    use serde_json::json;

    fn create_test_config() -> V3Config {
        V3Config::builder()
            .access_token(AccessToken::new("test-access-token").unwrap())
            .endpoint(Endpoint::new("http://localhost:8080/v3/rest").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_construction_uses_endpoint() {
        let client = HttpClient::new(&create_test_config());
        assert_eq!(client.base_uri(), "http://localhost:8080/v3/rest");
    }

    #[test]
    fn test_authorization_header_injection() {
        let client = HttpClient::new(&create_test_config());
        assert_eq!(
            client.default_headers().get("Authorization"),
            Some(&"Bearer test-access-token".to_string())
        );
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&create_test_config());
        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("Mashery V3 Rust Client v"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = V3Config::builder()
            .access_token(AccessToken::new("t").unwrap())
            .user_agent_prefix("Terraform/1.6")
            .build()
            .unwrap();
        let client = HttpClient::new(&config);
        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("Terraform/1.6 | "));
    }

    #[test]
    fn test_accept_header_is_json() {
        let client = HttpClient::new(&create_test_config());
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_retryable_statuses() {
        for code in [429, 500, 502, 503, 504] {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(HttpClient::is_retryable(&response), "{code} should retry");
        }
        for code in [400, 401, 403, 404, 409, 422] {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(!HttpClient::is_retryable(&response), "{code} should not retry");
        }
    }

    #[test]
    fn test_retry_delay_honours_retry_after_for_throttling_only() {
        let client = HttpClient::new(&create_test_config());
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec!["2".to_string()]);

        let throttled = HttpResponse::new(429, headers.clone(), json!({}));
        assert_eq!(client.calculate_retry_delay(&throttled), Duration::from_secs(2));

        let server_error = HttpResponse::new(500, headers, json!({}));
        assert_eq!(
            client.calculate_retry_delay(&server_error),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn test_retry_delay_clamps_oversized_retry_after() {
        let client = HttpClient::new(&create_test_config());
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec!["1e30".to_string()]);

        let throttled = HttpResponse::new(429, headers, json!({}));
        assert_eq!(client.calculate_retry_delay(&throttled), MAX_RETRY_AFTER);
    }
}
