//! Paginated collection engine.
//!
//! [`V3Transport::fetch_all`] walks a collection and returns its batches in
//! traversal order. Two strategies are supported:
//!
//! - **Per page**: requests `limit`/`offset` windows of the descriptor's
//!   resource until a page comes back shorter than the page size. Empty pages
//!   are never returned as batches, so a collection of `N` items with page
//!   size `P` yields `ceil(N / P)` batches and `floor(N / P) + 1` requests.
//! - **Per item**: fetches every unit path of the descriptor with bounded
//!   concurrency. Each unit yields exactly one batch, even when empty, and
//!   batches keep the order of the units.
//!
//! Any failure aborts the sweep. Batches fetched so far are discarded and the
//! error is reported as [`V3Error::Pagination`] with the number of completed
//! batches. Cancellation is checked before every page or unit and races every
//! in-flight request.

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;

use crate::clients::HttpMethod;
use crate::config::MAX_PAGE_SIZE;
use crate::rest::errors::V3Error;
use crate::rest::fetch_spec::{FetchSpec, Pagination};
use crate::rest::path::ensure_resolved;
use crate::rest::transport::V3Transport;

/// The part of a collection a single request addresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageWindow<'a> {
    /// A `limit`/`offset` slice of the descriptor's resource.
    Page {
        /// Index of the first item in the window.
        offset: u64,
        /// Maximum items in the window.
        size: u32,
    },
    /// One unit path of a per-item sweep.
    Item {
        /// Position of the unit in the descriptor.
        index: usize,
        /// The unit's resource path.
        resource: &'a str,
    },
}

impl PageWindow<'_> {
    const fn first_page(size: u32) -> Self {
        PageWindow::Page { offset: 0, size }
    }

    /// Returns the window following this one.
    #[must_use]
    pub fn next(&self) -> Self {
        match *self {
            PageWindow::Page { offset, size } => PageWindow::Page {
                offset: offset + u64::from(size),
                size,
            },
            PageWindow::Item { index, resource } => PageWindow::Item {
                index: index + 1,
                resource,
            },
        }
    }
}

impl V3Transport {
    /// Fetches every batch of a paginated collection.
    ///
    /// The descriptor's query is sent with every request. Repeating the call
    /// with the same descriptor against an unchanged collection yields equal
    /// results.
    ///
    /// # Errors
    ///
    /// - [`V3Error::Usage`] if the descriptor is not paginated, the page size is
    ///   outside `1..=1000`, or a unit path is unresolved
    /// - [`V3Error::Pagination`] wrapping the first failure of the sweep,
    ///   including [`V3Error::Cancelled`]
    pub async fn fetch_all<I>(
        &self,
        ctx: &CancellationToken,
        spec: &FetchSpec<Vec<I>>,
    ) -> Result<Vec<Vec<I>>, V3Error>
    where
        I: Send,
    {
        let context = spec.app_context();
        match spec.pagination() {
            Pagination::None => Err(V3Error::usage(
                context,
                "descriptor is not paginated; use get_object instead",
            )),
            Pagination::PerPage { page_size } => {
                let size = page_size.unwrap_or_else(|| self.config().page_size());
                if size == 0 || size > MAX_PAGE_SIZE {
                    return Err(V3Error::usage(
                        context,
                        format!("page size {size} is outside 1..={MAX_PAGE_SIZE}"),
                    ));
                }
                ensure_resolved(context, spec.resource())?;
                self.fetch_per_page(ctx, spec, size).await
            }
            Pagination::PerItem { units } => {
                for unit in units {
                    ensure_resolved(context, unit)?;
                }
                self.fetch_per_item(ctx, spec, units).await
            }
        }
    }

    async fn fetch_per_page<I>(
        &self,
        ctx: &CancellationToken,
        spec: &FetchSpec<Vec<I>>,
        size: u32,
    ) -> Result<Vec<Vec<I>>, V3Error>
    where
        I: Send,
    {
        let context = spec.app_context();
        let mut batches: Vec<Vec<I>> = Vec::new();
        let mut window = PageWindow::first_page(size);

        loop {
            let page = self
                .fetch_window(ctx, spec, &window)
                .await
                .map_err(|e| V3Error::pagination(context, batches.len(), e))?;

            let received = page.len();
            tracing::debug!(context, ?window, received, "fetched collection page");

            if received > 0 {
                batches.push(page);
            }
            if received < size as usize {
                break;
            }
            window = window.next();
        }

        Ok(batches)
    }

    async fn fetch_per_item<I>(
        &self,
        ctx: &CancellationToken,
        spec: &FetchSpec<Vec<I>>,
        units: &[String],
    ) -> Result<Vec<Vec<I>>, V3Error>
    where
        I: Send,
    {
        let context = spec.app_context();
        let concurrency = self.config().per_item_concurrency();

        // Futures are built up front so the sweep stays `Send` across borrowed units.
        let fetches: Vec<_> = units
            .iter()
            .enumerate()
            .map(|(index, resource)| {
                let window = PageWindow::Item {
                    index,
                    resource: resource.as_str(),
                };
                async move { self.fetch_window(ctx, spec, &window).await }
            })
            .collect();
        let mut results = stream::iter(fetches).buffered(concurrency);

        let mut batches: Vec<Vec<I>> = Vec::with_capacity(units.len());
        while let Some(result) = results.next().await {
            let batch = result.map_err(|e| V3Error::pagination(context, batches.len(), e))?;
            tracing::debug!(
                context,
                unit = batches.len(),
                received = batch.len(),
                "fetched collection unit"
            );
            batches.push(batch);
        }

        Ok(batches)
    }

    async fn fetch_window<I>(
        &self,
        ctx: &CancellationToken,
        spec: &FetchSpec<Vec<I>>,
        window: &PageWindow<'_>,
    ) -> Result<Vec<I>, V3Error> {
        let context = spec.app_context();
        if ctx.is_cancelled() {
            return Err(V3Error::cancelled(context));
        }

        let (resource, query) = match *window {
            PageWindow::Page { offset, size } => {
                let mut query = spec.query().clone();
                query.set("limit", size.to_string());
                query.set("offset", offset.to_string());
                (spec.resource(), query)
            }
            PageWindow::Item { resource, .. } => (resource, spec.query().clone()),
        };

        let request = self.request(context, HttpMethod::Get, resource, &query, None)?;
        let response = self.exchange(ctx, context, resource, request).await?;
        spec.decode(response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, Endpoint, V3Config};
    use crate::rest::errors::ErrorKind;

    fn transport() -> V3Transport {
        let config = V3Config::builder()
            .access_token(AccessToken::new("token").unwrap())
            .endpoint(Endpoint::new("http://127.0.0.1:9/v3/rest").unwrap())
            .build()
            .unwrap();
        V3Transport::new(config)
    }

    #[test]
    fn test_page_window_advances_by_size() {
        let window = PageWindow::first_page(50);
        assert_eq!(window.next(), PageWindow::Page { offset: 50, size: 50 });
        assert_eq!(window.next().next(), PageWindow::Page { offset: 100, size: 50 });
    }

    #[test]
    fn test_item_window_advances_index() {
        let window = PageWindow::Item { index: 0, resource: "/a" };
        assert_eq!(window.next(), PageWindow::Item { index: 1, resource: "/a" });
    }

    #[tokio::test]
    async fn test_unpaginated_descriptor_is_usage_fault() {
        let spec: FetchSpec<Vec<String>> = FetchSpec::new("/packages", "all packages");
        let err = transport()
            .fetch_all(&CancellationToken::new(), &spec)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UsageFault);
        assert!(matches!(err, V3Error::Usage { .. }));
    }

    #[tokio::test]
    async fn test_invalid_page_size_is_usage_fault() {
        for size in [0, MAX_PAGE_SIZE + 1] {
            let spec: FetchSpec<Vec<String>> = FetchSpec::new("/packages", "all packages")
                .paginate(Pagination::per_page_of(size));
            let err = transport()
                .fetch_all(&CancellationToken::new(), &spec)
                .await
                .unwrap_err();
            assert!(matches!(err, V3Error::Usage { .. }), "size {size}");
        }
    }

    #[tokio::test]
    async fn test_unresolved_unit_is_usage_fault() {
        let spec: FetchSpec<Vec<String>> = FetchSpec::new("/packages", "plans")
            .paginate(Pagination::per_item(["/packages/a/plans", "/packages/{id}/plans"]));
        let err = transport()
            .fetch_all(&CancellationToken::new(), &spec)
            .await
            .unwrap_err();
        assert!(matches!(err, V3Error::Usage { .. }));
    }

    #[tokio::test]
    async fn test_empty_unit_list_yields_no_batches() {
        let spec: FetchSpec<Vec<String>> = FetchSpec::new("/packages", "plans")
            .paginate(Pagination::PerItem { units: Vec::new() });
        let batches = transport()
            .fetch_all(&CancellationToken::new(), &spec)
            .await
            .unwrap();
        assert!(batches.is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_before_first_page_reports_zero_batches() {
        let ctx = CancellationToken::new();
        ctx.cancel();
        let spec: FetchSpec<Vec<String>> =
            FetchSpec::new("/members", "all members").paginate(Pagination::per_page());

        let err = transport().fetch_all(&ctx, &spec).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
        assert!(matches!(
            err,
            V3Error::Pagination { completed_batches: 0, .. }
        ));
    }

    #[test]
    fn test_fetch_all_future_is_send() {
        fn assert_send<T: Send>(_: T) {}

        let transport = transport();
        let ctx = CancellationToken::new();
        let spec: FetchSpec<Vec<serde_json::Value>> = FetchSpec::new("/packages", "plans")
            .paginate(Pagination::per_item(["/packages/a/plans", "/packages/b/plans"]));
        assert_send(transport.fetch_all(&ctx, &spec));
    }
}
