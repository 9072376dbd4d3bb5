//! Object access engine.
//!
//! [`V3Transport`] executes single-object operations described by a
//! [`FetchSpec`]: get, create, update, delete, count and existence checks.
//! It also offers untyped `*_any` calls for resources the SDK does not model.
//!
//! Every exchange races the caller's [`CancellationToken`]; a cancelled token
//! aborts the in-flight request and yields [`V3Error::Cancelled`]. Invalid
//! usage (unresolved paths, updates without an identifier, missing parsers) is
//! detected before anything is sent.

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::clients::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::config::V3Config;
use crate::rest::errors::V3Error;
use crate::rest::fetch_spec::{FetchSpec, QueryParams};
use crate::rest::path::{ensure_identified, ensure_resolved};

/// Executes V3 resource operations over an authenticated [`HttpClient`].
///
/// `V3Transport` is `Send + Sync` and is shared between facade clients
/// behind an `Arc`.
#[derive(Debug)]
pub struct V3Transport {
    http: HttpClient,
    config: V3Config,
}

// Verify V3Transport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<V3Transport>();
};

impl V3Transport {
    /// Creates a transport for the given configuration.
    #[must_use]
    pub fn new(config: V3Config) -> Self {
        let http = HttpClient::new(&config);
        Self { http, config }
    }

    /// Returns the configuration this transport was built from.
    #[must_use]
    pub const fn config(&self) -> &V3Config {
        &self.config
    }

    /// Fetches one object.
    ///
    /// # Errors
    ///
    /// - [`V3Error::Usage`] before sending anything if the resource path does
    ///   not identify an object
    /// - [`V3Error::NotFound`] if the remote reports the object absent
    /// - [`V3Error::Decode`] if the body does not match `T`
    /// - [`V3Error::Remote`], [`V3Error::Transport`] or [`V3Error::Cancelled`]
    ///   if the exchange fails
    pub async fn get_object<T>(
        &self,
        ctx: &CancellationToken,
        spec: &FetchSpec<T>,
    ) -> Result<T, V3Error> {
        ensure_identified(spec.app_context(), spec.resource())?;
        let request = self.request(
            spec.app_context(),
            HttpMethod::Get,
            spec.resource(),
            spec.query(),
            None,
        )?;
        let response = self.exchange(ctx, spec.app_context(), spec.resource(), request).await?;
        spec.decode(response.body)
    }

    /// Creates an object by posting `body` to the descriptor's resource.
    ///
    /// The body is sent as given; the remote validates it.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Usage`] if the descriptor has no parser, plus the
    /// errors of [`V3Transport::get_object`].
    pub async fn create_object<T, B>(
        &self,
        ctx: &CancellationToken,
        spec: &FetchSpec<T>,
        body: &B,
    ) -> Result<T, V3Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.write_object(ctx, spec, HttpMethod::Post, body).await
    }

    /// Replaces an identified object with `body`.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Usage`] before sending anything if the resource path
    /// does not identify an object, plus the errors of
    /// [`V3Transport::create_object`].
    pub async fn update_object<T, B>(
        &self,
        ctx: &CancellationToken,
        spec: &FetchSpec<T>,
        body: &B,
    ) -> Result<T, V3Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        ensure_identified(spec.app_context(), spec.resource())?;
        self.write_object(ctx, spec, HttpMethod::Put, body).await
    }

    /// Deletes the descriptor's resource. The response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Usage`] before sending anything if the resource path
    /// does not identify an object, [`V3Error::NotFound`] if the object does
    /// not exist, plus the exchange errors of [`V3Transport::get_object`].
    pub async fn delete_object<T>(
        &self,
        ctx: &CancellationToken,
        spec: &FetchSpec<T>,
    ) -> Result<(), V3Error> {
        ensure_identified(spec.app_context(), spec.resource())?;
        let request = self.request(
            spec.app_context(),
            HttpMethod::Delete,
            spec.resource(),
            spec.query(),
            None,
        )?;
        self.exchange(ctx, spec.app_context(), spec.resource(), request).await?;
        Ok(())
    }

    /// Returns the size of a collection from its `X-Total-Count` header.
    ///
    /// Requests a single item so that the body stays small.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Decode`] if the header is missing or not numeric,
    /// plus the exchange errors of [`V3Transport::get_object`].
    pub async fn count<T>(
        &self,
        ctx: &CancellationToken,
        spec: &FetchSpec<T>,
    ) -> Result<u64, V3Error> {
        ensure_resolved(spec.app_context(), spec.resource())?;
        let mut query = spec.query().clone();
        query.set("limit", "1");
        let request = self.request(
            spec.app_context(),
            HttpMethod::Get,
            spec.resource(),
            &query,
            None,
        )?;
        let response = self.exchange(ctx, spec.app_context(), spec.resource(), request).await?;

        response.total_count().ok_or_else(|| {
            V3Error::decode(
                spec.app_context(),
                serde::de::Error::custom("response carries no numeric X-Total-Count header"),
            )
        })
    }

    /// Returns `true` if the descriptor's resource exists.
    ///
    /// # Errors
    ///
    /// Fails with anything but [`V3Error::NotFound`], which becomes `Ok(false)`.
    /// A path that does not identify an object is a [`V3Error::Usage`].
    pub async fn exists<T>(
        &self,
        ctx: &CancellationToken,
        spec: &FetchSpec<T>,
    ) -> Result<bool, V3Error> {
        ensure_identified(spec.app_context(), spec.resource())?;
        let request = self.request(
            spec.app_context(),
            HttpMethod::Get,
            spec.resource(),
            spec.query(),
            None,
        )?;
        match self.exchange(ctx, spec.app_context(), spec.resource(), request).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Sends a GET to an arbitrary resource and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns the exchange errors of [`V3Transport::get_object`].
    pub async fn fetch_any(
        &self,
        ctx: &CancellationToken,
        resource: &str,
        query: &QueryParams,
    ) -> Result<HttpResponse, V3Error> {
        self.any(ctx, HttpMethod::Get, resource, query, None).await
    }

    /// Sends a POST to an arbitrary resource and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns the exchange errors of [`V3Transport::get_object`].
    pub async fn post_any(
        &self,
        ctx: &CancellationToken,
        resource: &str,
        body: serde_json::Value,
    ) -> Result<HttpResponse, V3Error> {
        self.any(ctx, HttpMethod::Post, resource, &QueryParams::new(), Some(body)).await
    }

    /// Sends a PUT to an arbitrary resource and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns the exchange errors of [`V3Transport::get_object`].
    pub async fn put_any(
        &self,
        ctx: &CancellationToken,
        resource: &str,
        body: serde_json::Value,
    ) -> Result<HttpResponse, V3Error> {
        self.any(ctx, HttpMethod::Put, resource, &QueryParams::new(), Some(body)).await
    }

    /// Sends a DELETE to an arbitrary resource and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns the exchange errors of [`V3Transport::get_object`].
    pub async fn delete_any(
        &self,
        ctx: &CancellationToken,
        resource: &str,
    ) -> Result<HttpResponse, V3Error> {
        self.any(ctx, HttpMethod::Delete, resource, &QueryParams::new(), None).await
    }

    async fn any(
        &self,
        ctx: &CancellationToken,
        method: HttpMethod,
        resource: &str,
        query: &QueryParams,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse, V3Error> {
        let context = format!("{method} {resource}");
        ensure_resolved(&context, resource)?;
        let request = self.request(&context, method, resource, query, body)?;
        self.exchange(ctx, &context, resource, request).await
    }

    async fn write_object<T, B>(
        &self,
        ctx: &CancellationToken,
        spec: &FetchSpec<T>,
        method: HttpMethod,
        body: &B,
    ) -> Result<T, V3Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        let context = spec.app_context();
        ensure_resolved(context, spec.resource())?;
        if !spec.has_parser() {
            return Err(V3Error::usage(context, "descriptor has no response parser"));
        }

        let body = serde_json::to_value(body)
            .map_err(|e| {
                V3Error::usage(context, format!("request body cannot be serialized: {e}"))
            })?;
        let request = self.request(context, method, spec.resource(), spec.query(), Some(body))?;
        let response = self.exchange(ctx, context, spec.resource(), request).await?;
        spec.decode(response.body)
    }

    pub(crate) fn request(
        &self,
        context: &str,
        method: HttpMethod,
        resource: &str,
        query: &QueryParams,
        body: Option<serde_json::Value>,
    ) -> Result<HttpRequest, V3Error> {
        let mut builder = HttpRequest::builder(method, resource)
            .query(query.to_pairs())
            .tries(self.config.tries());
        if let Some(body) = body {
            builder = builder.body(body);
        }
        builder.build().map_err(|e| V3Error::usage(context, e.to_string()))
    }

    /// Performs one exchange unless `ctx` fires first.
    pub(crate) async fn exchange(
        &self,
        ctx: &CancellationToken,
        context: &str,
        resource: &str,
        request: HttpRequest,
    ) -> Result<HttpResponse, V3Error> {
        if ctx.is_cancelled() {
            return Err(V3Error::cancelled(context));
        }

        tokio::select! {
            biased;
            () = ctx.cancelled() => {
                tracing::debug!(context, resource, "V3 request cancelled");
                Err(V3Error::cancelled(context))
            }
            result = self.http.request(request) => {
                result.map_err(|e| {
                    tracing::debug!(context, resource, error = %e, "V3 request failed");
                    V3Error::from_http(context, resource, e)
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, Endpoint};
    use crate::rest::errors::ErrorKind;

    fn transport() -> V3Transport {
        let config = V3Config::builder()
            .access_token(AccessToken::new("token").unwrap())
            .endpoint(Endpoint::new("http://127.0.0.1:9/v3/rest").unwrap())
            .tries(2)
            .build()
            .unwrap();
        V3Transport::new(config)
    }

    #[test]
    fn test_request_uses_configured_tries_and_query() {
        let transport = transport();
        let query = QueryParams::new().with("fields", "id,name");
        let request = transport
            .request("package", HttpMethod::Get, "/packages/p1", &query, None)
            .unwrap();

        assert_eq!(request.tries, 2);
        assert_eq!(request.query, vec![("fields".to_string(), "id,name".to_string())]);
    }

    #[test]
    fn test_request_without_body_for_post_is_usage_fault() {
        let transport = transport();
        let err = transport
            .request("package", HttpMethod::Post, "/packages", &QueryParams::new(), None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UsageFault);
    }

    #[tokio::test]
    async fn test_cancelled_token_short_circuits_exchange() {
        let transport = transport();
        let ctx = CancellationToken::new();
        ctx.cancel();

        let spec: FetchSpec<serde_json::Value> = FetchSpec::new("/packages/p1", "package");
        let err = transport.get_object(&ctx, &spec).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
        assert_eq!(err.context(), "package");
    }

    #[tokio::test]
    async fn test_update_without_identifier_is_rejected() {
        let transport = transport();
        let ctx = CancellationToken::new();
        let spec: FetchSpec<serde_json::Value> = FetchSpec::new("/packages/", "package");

        let err = transport
            .update_object(&ctx, &spec, &serde_json::json!({"name": "x"}))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UsageFault);
    }

    #[tokio::test]
    async fn test_create_without_parser_is_rejected() {
        let transport = transport();
        let ctx = CancellationToken::new();
        let spec: FetchSpec<serde_json::Value> = FetchSpec::without_parser("/packages", "package");

        let err = transport
            .create_object(&ctx, &spec, &serde_json::json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UsageFault);
    }

    #[tokio::test]
    async fn test_delete_and_get_of_collection_path_are_rejected() {
        let transport = transport();
        let ctx = CancellationToken::new();
        let spec: FetchSpec<serde_json::Value> = FetchSpec::new("/services/", "service");

        let err = transport.delete_object(&ctx, &spec).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UsageFault);
        assert_eq!(err.context(), "service");

        let err = transport.get_object(&ctx, &spec).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UsageFault);

        let err = transport.exists(&ctx, &spec).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UsageFault);
    }
}
