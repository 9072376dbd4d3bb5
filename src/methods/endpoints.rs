use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{fields_of, flatten, require_id, single, V3Methods};
use crate::rest::{build_path, fields_params, FetchSpec, Pagination, V3Error, V3Transport};
use crate::types::{
    AddressableV3Object, Endpoint, EndpointIdent, ServiceId, V3Resource, ENDPOINT_FULL_FIELDS,
};

/// Endpoint operations. Endpoints always live under a service.
#[async_trait]
pub trait EndpointMethods: Send + Sync {
    /// Fetches an endpoint with its full configuration.
    async fn get_endpoint(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &EndpointIdent,
    ) -> Result<Endpoint, V3Error> {
        Err(V3Error::not_implemented("get_endpoint"))
    }

    /// Creates an endpoint in a service.
    async fn create_endpoint(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _service_id: &ServiceId,
        _endpoint: &Endpoint,
    ) -> Result<Endpoint, V3Error> {
        Err(V3Error::not_implemented("create_endpoint"))
    }

    /// Updates an endpoint. The endpoint must carry its identifier.
    async fn update_endpoint(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _service_id: &ServiceId,
        _endpoint: &Endpoint,
    ) -> Result<Endpoint, V3Error> {
        Err(V3Error::not_implemented("update_endpoint"))
    }

    /// Deletes an endpoint.
    async fn delete_endpoint(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &EndpointIdent,
    ) -> Result<(), V3Error> {
        Err(V3Error::not_implemented("delete_endpoint"))
    }

    /// Lists the endpoints of a service by identity only.
    async fn list_endpoints(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _service_id: &ServiceId,
    ) -> Result<Vec<AddressableV3Object>, V3Error> {
        Err(V3Error::not_implemented("list_endpoints"))
    }

    /// Lists the endpoints of a service with their full configuration.
    async fn list_endpoints_with_full_info(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _service_id: &ServiceId,
    ) -> Result<Vec<Endpoint>, V3Error> {
        Err(V3Error::not_implemented("list_endpoints_with_full_info"))
    }

    /// Counts the endpoints of a service.
    async fn count_endpoints(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _service_id: &ServiceId,
    ) -> Result<u64, V3Error> {
        Err(V3Error::not_implemented("count_endpoints"))
    }
}

fn endpoints_path(service_id: &ServiceId) -> String {
    build_path("/services/{id}/endpoints", &[("id", service_id)])
}

fn endpoint_path(service_id: &ServiceId, endpoint_id: &str) -> String {
    build_path(
        "/services/{serviceId}/endpoints/{endpointId}",
        &[("serviceId", service_id.as_str()), ("endpointId", endpoint_id)],
    )
}

#[async_trait]
impl EndpointMethods for V3Methods {
    async fn get_endpoint(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &EndpointIdent,
    ) -> Result<Endpoint, V3Error> {
        let spec = FetchSpec::new(
            endpoint_path(&ident.service_id, &ident.endpoint_id),
            Endpoint::NAME,
        )
        .with_query(fields_params(ENDPOINT_FULL_FIELDS));
        transport.get_object(ctx, &spec).await
    }

    async fn create_endpoint(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        service_id: &ServiceId,
        endpoint: &Endpoint,
    ) -> Result<Endpoint, V3Error> {
        let spec = FetchSpec::new(endpoints_path(service_id), Endpoint::NAME)
            .with_query(fields_params(ENDPOINT_FULL_FIELDS));
        transport.create_object(ctx, &spec, endpoint).await
    }

    async fn update_endpoint(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        service_id: &ServiceId,
        endpoint: &Endpoint,
    ) -> Result<Endpoint, V3Error> {
        let id = require_id(Endpoint::NAME, endpoint.id.as_ref())?;
        let spec = FetchSpec::new(endpoint_path(service_id, id), Endpoint::NAME)
            .with_query(fields_params(ENDPOINT_FULL_FIELDS));
        transport.update_object(ctx, &spec, endpoint).await
    }

    async fn delete_endpoint(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &EndpointIdent,
    ) -> Result<(), V3Error> {
        let spec = FetchSpec::<()>::without_parser(
            endpoint_path(&ident.service_id, &ident.endpoint_id),
            Endpoint::NAME,
        );
        transport.delete_object(ctx, &spec).await
    }

    async fn list_endpoints(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        service_id: &ServiceId,
    ) -> Result<Vec<AddressableV3Object>, V3Error> {
        let spec = FetchSpec::new(endpoints_path(service_id), Endpoint::PLURAL)
            .with_query(fields_of::<Endpoint>())
            .paginate(Pagination::per_page());
        transport.fetch_all(ctx, &spec).await.map(flatten)
    }

    async fn list_endpoints_with_full_info(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        service_id: &ServiceId,
    ) -> Result<Vec<Endpoint>, V3Error> {
        let listed = self.list_endpoints(ctx, transport, service_id).await?;
        let units = listed
            .iter()
            .filter_map(|e| e.id.as_deref())
            .map(|id| endpoint_path(service_id, id));

        let spec = FetchSpec::without_parser(endpoints_path(service_id), Endpoint::PLURAL)
            .with_parser(single::<Endpoint>)
            .with_query(fields_params(ENDPOINT_FULL_FIELDS))
            .paginate(Pagination::per_item(units));
        transport.fetch_all(ctx, &spec).await.map(flatten)
    }

    async fn count_endpoints(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        service_id: &ServiceId,
    ) -> Result<u64, V3Error> {
        let spec = FetchSpec::<()>::without_parser(endpoints_path(service_id), Endpoint::PLURAL);
        transport.count(ctx, &spec).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_path_encodes_both_segments() {
        assert_eq!(
            endpoint_path(&ServiceId::new("svc 1"), "e/1"),
            "/services/svc%201/endpoints/e%2F1"
        );
    }
}
