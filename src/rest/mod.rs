//! Resource engine for the V3 API.
//!
//! This module contains the pieces every SDK method is built from:
//!
//! - [`FetchSpec`]: immutable description of one remote operation
//! - [`QueryParams`] and [`Pagination`]: the descriptor's query and traversal strategy
//! - [`V3Transport`]: executes descriptors (object access and collection sweeps)
//! - [`V3Error`]: the error type of every engine and SDK operation
//! - [`build_path`], [`ensure_resolved`], [`ensure_identified`]: resource path helpers
//! - [`filtering_params`]: `filter`/`fields` query construction
//!
//! # Example
//!
//! ```rust,ignore
//! use mashery_v3::rest::{FetchSpec, Pagination, V3Transport};
//! use mashery_v3::types::Member;
//! use tokio_util::sync::CancellationToken;
//!
//! let transport = V3Transport::new(config);
//! let spec: FetchSpec<Vec<Member>> =
//!     FetchSpec::new("/members", "all members").paginate(Pagination::per_page());
//!
//! let batches = transport.fetch_all(&CancellationToken::new(), &spec).await?;
//! let members: Vec<Member> = batches.into_iter().flatten().collect();
//! ```

mod errors;
mod fetch_spec;
mod filter;
mod pagination;
mod path;
mod transport;

pub use errors::{ErrorKind, V3Error};
pub use fetch_spec::{FetchSpec, Pagination, QueryParams, ResponseParser};
pub use filter::{fields_params, filtering_params};
pub use pagination::PageWindow;
pub use path::{build_path, ensure_identified, ensure_resolved};
pub use transport::V3Transport;
