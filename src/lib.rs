//! # Mashery V3 SDK
//!
//! A Rust SDK for the Mashery V3 administrative REST API, providing typed
//! objects, a descriptor-driven resource engine and pluggable facade clients.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`V3Config`] and [`V3ConfigBuilder`]
//! - Async HTTP client with bearer authentication, retries and over-QPS handling
//! - Fetch descriptors ([`rest::FetchSpec`]) describing one remote operation each
//! - Single-object access and paginated collection sweeps via [`rest::V3Transport`]
//! - A method registry ([`MethodSchema`]) with one trait per method group
//! - Facade clients ([`PluggableClient`], [`FixedSchemaClient`]) exposing the
//!   full method surface
//!
//! ## Quick Start
//!
//! ```rust
//! use mashery_v3::{AccessToken, FixedSchemaClient, V3Config};
//!
//! let config = V3Config::builder()
//!     .access_token(AccessToken::new("your-access-token").unwrap())
//!     .page_size(200)
//!     .build()
//!     .unwrap();
//!
//! let client = FixedSchemaClient::new(config);
//! ```
//!
//! ## Calling the API
//!
//! Every call takes a [`CancellationToken`](tokio_util::sync::CancellationToken).
//! Cancelling it aborts the in-flight request and stops collection sweeps
//! between pages.
//!
//! ```rust,ignore
//! use mashery_v3::types::{Package, PackageId};
//! use tokio_util::sync::CancellationToken;
//!
//! let ctx = CancellationToken::new();
//! let package = client.get_package(&ctx, &PackageId::new("p1")).await?;
//! let all: Vec<Package> = client.list_packages(&ctx).await?;
//! ```
//!
//! ## Substituting Methods
//!
//! Tests replace individual method groups without a mock framework:
//!
//! ```rust,ignore
//! use mashery_v3::{MethodSchema, PluggableClient};
//!
//! let schema = MethodSchema::unimplemented().with_packages(FakePackages::default());
//! let client = PluggableClient::with_schema(config, schema);
//! // Every method outside the package group fails with V3Error::NotImplemented.
//! ```
//!
//! ## Errors
//!
//! All operations return [`V3Error`]. [`V3Error::kind`] classifies a failure
//! as NotFound, RemoteFault, DecodeFault, NotImplemented, UsageFault,
//! Transport or Cancelled, and [`V3Error::context`] names the operation that
//! failed.

pub mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod methods;
pub mod rest;
pub mod types;

// Re-export public types at crate root for convenience
pub use client::{FixedSchemaClient, PluggableClient};
pub use config::{AccessToken, Endpoint, V3Config, V3ConfigBuilder};
pub use error::ConfigError;
pub use methods::MethodSchema;
pub use rest::{ErrorKind, V3Error};

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
