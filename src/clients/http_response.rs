//! HTTP response types.
//!
//! [`HttpResponse`] holds the status, the lower-cased headers and the decoded
//! JSON body of one exchange, and exposes the Mashery-specific headers the
//! transport relies on for retries and counting.

use std::collections::HashMap;

/// Error code the platform reports when the caller exceeds its queries-per-second
/// allowance. Requests failing with it are safe to retry.
pub const OVER_QPS_ERROR_CODE: &str = "ERR_403_DEVELOPER_OVER_QPS";

/// An HTTP response from the V3 API.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers keyed by lower-cased name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The decoded response body; `null` when the body was empty.
    pub body: serde_json::Value,
    /// Seconds to wait before retrying (from the `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing `Retry-After` eagerly.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|secs| secs.is_finite() && *secs >= 0.0);

        Self {
            code,
            headers,
            body,
            retry_request_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the collection size reported in `X-Total-Count`, if present and numeric.
    #[must_use]
    pub fn total_count(&self) -> Option<u64> {
        self.header("x-total-count")
            .and_then(|value| value.trim().parse().ok())
    }

    /// Returns the `X-Mashery-Error-Code` header value, if present.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.header("x-mashery-error-code")
    }

    /// Returns the `X-Mashery-Responder` header value, if present.
    ///
    /// Identifies the platform node that answered; useful when reporting errors.
    #[must_use]
    pub fn responder(&self) -> Option<&str> {
        self.header("x-mashery-responder")
    }

    /// Returns `true` if the platform rejected the call for exceeding its QPS allowance.
    #[must_use]
    pub fn is_throttled(&self) -> bool {
        self.code == 429 || (self.code == 403 && self.error_code() == Some(OVER_QPS_ERROR_CODE))
    }

    /// Extracts a human-readable error message from the body.
    ///
    /// The platform reports failures as `{"errorCode": .., "errorMessage": ".."}`;
    /// validation failures may also carry an `errors` array. Falls back to the
    /// serialized body.
    #[must_use]
    pub fn error_message(&self) -> String {
        if let Some(message) = self.body.get("errorMessage").and_then(|m| m.as_str()) {
            return message.to_string();
        }

        if let Some(errors) = self.body.get("errors").and_then(|e| e.as_array()) {
            let messages: Vec<String> = errors
                .iter()
                .map(|e| {
                    e.get("message")
                        .and_then(|m| m.as_str())
                        .map_or_else(|| e.to_string(), ToString::to_string)
                })
                .collect();
            if !messages.is_empty() {
                return messages.join("; ");
            }
        }

        if let Some(raw) = self.body.get("raw_body").and_then(|m| m.as_str()) {
            return raw.to_string();
        }

        if self.body.is_null() {
            String::new()
        } else {
            self.body.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), vec![(*v).to_string()]))
            .collect()
    }

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in 200..=299 {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(response.is_ok(), "Expected is_ok() to be true for code {code}");
        }
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        for code in [400, 403, 404, 429, 500, 503] {
            assert!(!HttpResponse::new(code, HashMap::new(), json!({})).is_ok());
        }
    }

    #[test]
    fn test_total_count_parsing() {
        let response = HttpResponse::new(200, headers(&[("x-total-count", "120")]), json!([]));
        assert_eq!(response.total_count(), Some(120));

        let response = HttpResponse::new(200, headers(&[("x-total-count", "many")]), json!([]));
        assert_eq!(response.total_count(), None);

        let response = HttpResponse::new(200, HashMap::new(), json!([]));
        assert_eq!(response.total_count(), None);
    }

    #[test]
    fn test_retry_after_parsing() {
        let response = HttpResponse::new(429, headers(&[("retry-after", "2.5")]), json!({}));
        assert!((response.retry_request_after.unwrap() - 2.5).abs() < f64::EPSILON);

        let response = HttpResponse::new(429, headers(&[("retry-after", "-1")]), json!({}));
        assert!(response.retry_request_after.is_none());
    }

    #[test]
    fn test_throttling_detection() {
        let over_qps = HttpResponse::new(
            403,
            headers(&[("x-mashery-error-code", OVER_QPS_ERROR_CODE)]),
            json!({}),
        );
        assert!(over_qps.is_throttled());

        let over_rate = HttpResponse::new(
            403,
            headers(&[("x-mashery-error-code", "ERR_403_DEVELOPER_OVER_RATE")]),
            json!({}),
        );
        assert!(!over_rate.is_throttled());

        assert!(HttpResponse::new(429, HashMap::new(), json!({})).is_throttled());
    }

    #[test]
    fn test_error_message_prefers_error_message_field() {
        let response = HttpResponse::new(
            400,
            HashMap::new(),
            json!({"errorCode": 400, "errorMessage": "Invalid field: nme"}),
        );
        assert_eq!(response.error_message(), "Invalid field: nme");
    }

    #[test]
    fn test_error_message_joins_errors_array() {
        let response = HttpResponse::new(
            400,
            HashMap::new(),
            json!({"errors": [{"property": "name", "message": "required"}, {"message": "bad"}]}),
        );
        assert_eq!(response.error_message(), "required; bad");
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        let response = HttpResponse::new(502, HashMap::new(), json!({"raw_body": "Bad Gateway"}));
        assert_eq!(response.error_message(), "Bad Gateway");

        let response = HttpResponse::new(500, HashMap::new(), serde_json::Value::Null);
        assert_eq!(response.error_message(), "");
    }

    #[test]
    fn test_responder_extraction() {
        let response = HttpResponse::new(
            500,
            headers(&[("x-mashery-responder", "prod-j-worker-us-west-1b-63.mashery.com")]),
            json!({}),
        );
        assert_eq!(
            response.responder(),
            Some("prod-j-worker-us-west-1b-63.mashery.com")
        );
    }
}
