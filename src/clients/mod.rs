//! HTTP client layer for V3 API communication.
//!
//! - [`HttpClient`]: async HTTP client with bearer authentication and retries
//! - [`HttpRequest`]: a request to be sent to the API
//! - [`HttpResponse`]: a decoded response from the API
//! - [`HttpMethod`]: GET, POST, PUT and DELETE
//! - [`HttpError`]: failures of a single exchange
//!
//! # Retry Behavior
//!
//! - **429** and **403 with `ERR_403_DEVELOPER_OVER_QPS`**: retried using
//!   `Retry-After` when present, otherwise the configured wait
//! - **500, 502, 503, 504**: retried with the configured wait
//! - **Other statuses**: returned immediately
//!
//! The number of attempts comes from [`HttpRequest::tries`], which the
//! transport fills from [`V3Config::tries`](crate::V3Config::tries).

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, OVER_QPS_ERROR_CODE};
