//! Fetch descriptors.
//!
//! A [`FetchSpec`] is the immutable, per-call description of a remote
//! operation: which resource to address, which query to send, how the
//! collection is paginated, how the operation is named in errors, and how the
//! response body becomes a typed value.
//!
//! Descriptors are built by the SDK methods and consumed by the
//! [`V3Transport`](crate::rest::V3Transport). They are cheap to clone and may
//! be reused; the engine never mutates them.
//!
//! # Example
//!
//! ```rust
//! use mashery_v3::rest::{FetchSpec, Pagination, QueryParams};
//! use mashery_v3::types::Package;
//!
//! let spec: FetchSpec<Vec<Package>> = FetchSpec::new("/packages", "all packages")
//!     .with_query(QueryParams::new().with("fields", "id,name"))
//!     .paginate(Pagination::per_page());
//!
//! assert_eq!(spec.resource(), "/packages");
//! assert_eq!(spec.app_context(), "all packages");
//! ```

use std::fmt;

use serde::de::DeserializeOwned;

use crate::rest::errors::V3Error;

/// Converts a decoded JSON body into the descriptor's result type.
pub type ResponseParser<T> = fn(serde_json::Value) -> Result<T, serde_json::Error>;

/// Ordered multimap of query parameters.
///
/// A name may carry several values; they are sent in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, Vec<String>)>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a value to `name`, keeping any existing values.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    /// Replaces all values of `name` with `value`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => *values = vec![value],
            None => self.entries.push((name, vec![value])),
        }
    }

    /// Builder form of [`QueryParams::add`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(name, value);
        self
    }

    /// Removes every value of `name`.
    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|(n, _)| n != name);
    }

    /// Returns the values registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Returns `true` if no parameter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copies every parameter of `other` into this set, appending values.
    pub fn extend(&mut self, other: &Self) {
        for (name, values) in &other.entries {
            for value in values {
                self.add(name.clone(), value.clone());
            }
        }
    }

    /// Flattens the parameters into `(name, value)` pairs in sending order.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .flat_map(|(name, values)| values.iter().map(move |v| (name.clone(), v.clone())))
            .collect()
    }
}

/// How a collection is split across requests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Pagination {
    /// A single object or a collection returned whole. Not accepted by
    /// [`V3Transport::fetch_all`](crate::rest::V3Transport::fetch_all).
    #[default]
    None,
    /// Page-at-a-time traversal using `limit` and `offset` query parameters.
    ///
    /// `page_size` falls back to [`V3Config::page_size`](crate::V3Config::page_size).
    PerPage {
        /// Items requested per page.
        page_size: Option<u32>,
    },
    /// One request per unit path; each unit yields one batch.
    ///
    /// Units are fully interpolated resource paths, fetched with bounded
    /// concurrency and returned in the order given here.
    PerItem {
        /// Resource paths, one per unit.
        units: Vec<String>,
    },
}

impl Pagination {
    /// Page-at-a-time traversal with the configured page size.
    #[must_use]
    pub const fn per_page() -> Self {
        Self::PerPage { page_size: None }
    }

    /// Page-at-a-time traversal with an explicit page size.
    #[must_use]
    pub const fn per_page_of(page_size: u32) -> Self {
        Self::PerPage {
            page_size: Some(page_size),
        }
    }

    /// One request per unit path.
    #[must_use]
    pub fn per_item<I, S>(units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::PerItem {
            units: units.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` unless this is [`Pagination::None`].
    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Immutable description of one remote operation yielding a `T`.
pub struct FetchSpec<T> {
    resource: String,
    query: QueryParams,
    pagination: Pagination,
    app_context: String,
    parser: Option<ResponseParser<T>>,
}

impl<T: DeserializeOwned> FetchSpec<T> {
    /// Creates a descriptor whose responses are deserialized into `T` with serde.
    #[must_use]
    pub fn new(resource: impl Into<String>, app_context: impl Into<String>) -> Self {
        Self::without_parser(resource, app_context).with_parser(serde_json::from_value::<T>)
    }
}

impl<T> FetchSpec<T> {
    /// Creates a descriptor without a response parser.
    ///
    /// Suitable for deletes, counts and existence checks, which never decode a body.
    #[must_use]
    pub fn without_parser(resource: impl Into<String>, app_context: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            query: QueryParams::new(),
            pagination: Pagination::None,
            app_context: app_context.into(),
            parser: None,
        }
    }

    /// Replaces the query parameters.
    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Appends one query parameter.
    #[must_use]
    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.add(name, value);
        self
    }

    /// Sets the pagination strategy.
    #[must_use]
    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// Replaces the response parser.
    #[must_use]
    pub fn with_parser(mut self, parser: ResponseParser<T>) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Returns the resource path.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Returns the query parameters.
    #[must_use]
    pub const fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Returns the pagination strategy.
    #[must_use]
    pub const fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Returns the context tag used in errors and logs.
    #[must_use]
    pub fn app_context(&self) -> &str {
        &self.app_context
    }

    /// Returns `true` if a response parser is set.
    #[must_use]
    pub const fn has_parser(&self) -> bool {
        self.parser.is_some()
    }

    /// Decodes a response body with the descriptor's parser.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Decode`] if the parser rejects the body, or
    /// [`V3Error::Usage`] if the descriptor has no parser.
    pub fn decode(&self, body: serde_json::Value) -> Result<T, V3Error> {
        let parser = self
            .parser
            .ok_or_else(|| V3Error::usage(&self.app_context, "descriptor has no response parser"))?;
        parser(body).map_err(|e| V3Error::decode(&self.app_context, e))
    }
}

impl<T> Clone for FetchSpec<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
            query: self.query.clone(),
            pagination: self.pagination.clone(),
            app_context: self.app_context.clone(),
            parser: self.parser,
        }
    }
}

impl<T> fmt::Debug for FetchSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchSpec")
            .field("resource", &self.resource)
            .field("query", &self.query)
            .field("pagination", &self.pagination)
            .field("app_context", &self.app_context)
            .field("has_parser", &self.parser.is_some())
            .finish()
    }
}

// Verify descriptor types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<QueryParams>();
    assert_send_sync::<Pagination>();
    assert_send_sync::<FetchSpec<Vec<String>>>();
};
