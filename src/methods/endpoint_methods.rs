use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{fields_of, flatten, require_id, single, V3Methods};
use crate::rest::{build_path, fields_params, FetchSpec, Pagination, V3Error, V3Transport};
use crate::types::{
    ApiMethod, EndpointIdent, EndpointMethodIdent, ResponseFilter, ResponseFilterIdent,
    V3Resource, API_METHOD_FULL_FIELDS, RESPONSE_FILTER_FULL_FIELDS,
};

/// Operations on the methods of an endpoint.
#[async_trait]
pub trait ApiMethodMethods: Send + Sync {
    /// Fetches a method with its sample responses.
    async fn get_endpoint_method(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &EndpointMethodIdent,
    ) -> Result<ApiMethod, V3Error> {
        Err(V3Error::not_implemented("get_endpoint_method"))
    }

    /// Creates a method on an endpoint.
    async fn create_endpoint_method(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _endpoint: &EndpointIdent,
        _method: &ApiMethod,
    ) -> Result<ApiMethod, V3Error> {
        Err(V3Error::not_implemented("create_endpoint_method"))
    }

    /// Updates a method. The method must carry its identifier.
    async fn update_endpoint_method(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _endpoint: &EndpointIdent,
        _method: &ApiMethod,
    ) -> Result<ApiMethod, V3Error> {
        Err(V3Error::not_implemented("update_endpoint_method"))
    }

    /// Deletes a method.
    async fn delete_endpoint_method(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &EndpointMethodIdent,
    ) -> Result<(), V3Error> {
        Err(V3Error::not_implemented("delete_endpoint_method"))
    }

    /// Lists the methods of an endpoint.
    async fn list_endpoint_methods(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _endpoint: &EndpointIdent,
    ) -> Result<Vec<ApiMethod>, V3Error> {
        Err(V3Error::not_implemented("list_endpoint_methods"))
    }

    /// Lists the methods of an endpoint with their sample responses.
    async fn list_endpoint_methods_with_full_info(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _endpoint: &EndpointIdent,
    ) -> Result<Vec<ApiMethod>, V3Error> {
        Err(V3Error::not_implemented("list_endpoint_methods_with_full_info"))
    }

    /// Counts the methods of an endpoint.
    async fn count_endpoint_methods(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _endpoint: &EndpointIdent,
    ) -> Result<u64, V3Error> {
        Err(V3Error::not_implemented("count_endpoint_methods"))
    }
}

/// Operations on the response filters of an endpoint method.
#[async_trait]
pub trait ResponseFilterMethods: Send + Sync {
    /// Fetches a response filter with its field lists.
    async fn get_response_filter(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &ResponseFilterIdent,
    ) -> Result<ResponseFilter, V3Error> {
        Err(V3Error::not_implemented("get_response_filter"))
    }

    /// Creates a response filter on a method.
    async fn create_response_filter(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _method: &EndpointMethodIdent,
        _filter: &ResponseFilter,
    ) -> Result<ResponseFilter, V3Error> {
        Err(V3Error::not_implemented("create_response_filter"))
    }

    /// Updates a response filter. The filter must carry its identifier.
    async fn update_response_filter(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _method: &EndpointMethodIdent,
        _filter: &ResponseFilter,
    ) -> Result<ResponseFilter, V3Error> {
        Err(V3Error::not_implemented("update_response_filter"))
    }

    /// Deletes a response filter.
    async fn delete_response_filter(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &ResponseFilterIdent,
    ) -> Result<(), V3Error> {
        Err(V3Error::not_implemented("delete_response_filter"))
    }

    /// Lists the response filters of a method.
    async fn list_response_filters(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _method: &EndpointMethodIdent,
    ) -> Result<Vec<ResponseFilter>, V3Error> {
        Err(V3Error::not_implemented("list_response_filters"))
    }

    /// Lists the response filters of a method with their field lists.
    async fn list_response_filters_with_full_info(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _method: &EndpointMethodIdent,
    ) -> Result<Vec<ResponseFilter>, V3Error> {
        Err(V3Error::not_implemented("list_response_filters_with_full_info"))
    }

    /// Counts the response filters of a method.
    async fn count_response_filters(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _method: &EndpointMethodIdent,
    ) -> Result<u64, V3Error> {
        Err(V3Error::not_implemented("count_response_filters"))
    }
}

fn methods_path(endpoint: &EndpointIdent) -> String {
    build_path(
        "/services/{serviceId}/endpoints/{endpointId}/methods",
        &[
            ("serviceId", endpoint.service_id.as_str()),
            ("endpointId", endpoint.endpoint_id.as_str()),
        ],
    )
}

fn method_path(endpoint: &EndpointIdent, method_id: &str) -> String {
    build_path(
        &format!("{}/{{methodId}}", methods_path(endpoint)),
        &[("methodId", method_id)],
    )
}

fn filters_path(method: &EndpointMethodIdent) -> String {
    format!("{}/responseFilters", method_path(&method.endpoint, &method.method_id))
}

fn filter_path(method: &EndpointMethodIdent, filter_id: &str) -> String {
    build_path(
        &format!("{}/{{filterId}}", filters_path(method)),
        &[("filterId", filter_id)],
    )
}

#[async_trait]
impl ApiMethodMethods for V3Methods {
    async fn get_endpoint_method(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &EndpointMethodIdent,
    ) -> Result<ApiMethod, V3Error> {
        let spec = FetchSpec::new(method_path(&ident.endpoint, &ident.method_id), ApiMethod::NAME)
            .with_query(fields_params(API_METHOD_FULL_FIELDS));
        transport.get_object(ctx, &spec).await
    }

    async fn create_endpoint_method(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        endpoint: &EndpointIdent,
        method: &ApiMethod,
    ) -> Result<ApiMethod, V3Error> {
        let spec = FetchSpec::new(methods_path(endpoint), ApiMethod::NAME)
            .with_query(fields_params(API_METHOD_FULL_FIELDS));
        transport.create_object(ctx, &spec, method).await
    }

    async fn update_endpoint_method(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        endpoint: &EndpointIdent,
        method: &ApiMethod,
    ) -> Result<ApiMethod, V3Error> {
        let id = require_id(ApiMethod::NAME, method.id.as_ref())?;
        let spec = FetchSpec::new(method_path(endpoint, id), ApiMethod::NAME)
            .with_query(fields_params(API_METHOD_FULL_FIELDS));
        transport.update_object(ctx, &spec, method).await
    }

    async fn delete_endpoint_method(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &EndpointMethodIdent,
    ) -> Result<(), V3Error> {
        let spec = FetchSpec::<()>::without_parser(
            method_path(&ident.endpoint, &ident.method_id),
            ApiMethod::NAME,
        );
        transport.delete_object(ctx, &spec).await
    }

    async fn list_endpoint_methods(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        endpoint: &EndpointIdent,
    ) -> Result<Vec<ApiMethod>, V3Error> {
        let spec = FetchSpec::new(methods_path(endpoint), ApiMethod::PLURAL)
            .with_query(fields_of::<ApiMethod>())
            .paginate(Pagination::per_page());
        transport.fetch_all(ctx, &spec).await.map(flatten)
    }

    async fn list_endpoint_methods_with_full_info(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        endpoint: &EndpointIdent,
    ) -> Result<Vec<ApiMethod>, V3Error> {
        let listed = self.list_endpoint_methods(ctx, transport, endpoint).await?;
        let units = listed
            .iter()
            .filter_map(|m| m.id.as_deref())
            .map(|id| method_path(endpoint, id));

        let spec = FetchSpec::without_parser(methods_path(endpoint), ApiMethod::PLURAL)
            .with_parser(single::<ApiMethod>)
            .with_query(fields_params(API_METHOD_FULL_FIELDS))
            .paginate(Pagination::per_item(units));
        transport.fetch_all(ctx, &spec).await.map(flatten)
    }

    async fn count_endpoint_methods(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        endpoint: &EndpointIdent,
    ) -> Result<u64, V3Error> {
        let spec = FetchSpec::<()>::without_parser(methods_path(endpoint), ApiMethod::PLURAL);
        transport.count(ctx, &spec).await
    }
}

#[async_trait]
impl ResponseFilterMethods for V3Methods {
    async fn get_response_filter(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &ResponseFilterIdent,
    ) -> Result<ResponseFilter, V3Error> {
        let spec = FetchSpec::new(
            filter_path(&ident.method, &ident.filter_id),
            ResponseFilter::NAME,
        )
        .with_query(fields_params(RESPONSE_FILTER_FULL_FIELDS));
        transport.get_object(ctx, &spec).await
    }

    async fn create_response_filter(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        method: &EndpointMethodIdent,
        filter: &ResponseFilter,
    ) -> Result<ResponseFilter, V3Error> {
        let spec = FetchSpec::new(filters_path(method), ResponseFilter::NAME)
            .with_query(fields_params(RESPONSE_FILTER_FULL_FIELDS));
        transport.create_object(ctx, &spec, filter).await
    }

    async fn update_response_filter(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        method: &EndpointMethodIdent,
        filter: &ResponseFilter,
    ) -> Result<ResponseFilter, V3Error> {
        let id = require_id(ResponseFilter::NAME, filter.id.as_ref())?;
        let spec = FetchSpec::new(filter_path(method, id), ResponseFilter::NAME)
            .with_query(fields_params(RESPONSE_FILTER_FULL_FIELDS));
        transport.update_object(ctx, &spec, filter).await
    }

    async fn delete_response_filter(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &ResponseFilterIdent,
    ) -> Result<(), V3Error> {
        let spec = FetchSpec::<()>::without_parser(
            filter_path(&ident.method, &ident.filter_id),
            ResponseFilter::NAME,
        );
        transport.delete_object(ctx, &spec).await
    }

    async fn list_response_filters(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        method: &EndpointMethodIdent,
    ) -> Result<Vec<ResponseFilter>, V3Error> {
        let spec = FetchSpec::new(filters_path(method), ResponseFilter::PLURAL)
            .with_query(fields_of::<ResponseFilter>())
            .paginate(Pagination::per_page());
        transport.fetch_all(ctx, &spec).await.map(flatten)
    }

    async fn list_response_filters_with_full_info(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        method: &EndpointMethodIdent,
    ) -> Result<Vec<ResponseFilter>, V3Error> {
        let listed = self.list_response_filters(ctx, transport, method).await?;
        let units = listed
            .iter()
            .filter_map(|f| f.id.as_deref())
            .map(|id| filter_path(method, id));

        let spec = FetchSpec::without_parser(filters_path(method), ResponseFilter::PLURAL)
            .with_parser(single::<ResponseFilter>)
            .with_query(fields_params(RESPONSE_FILTER_FULL_FIELDS))
            .paginate(Pagination::per_item(units));
        transport.fetch_all(ctx, &spec).await.map(flatten)
    }

    async fn count_response_filters(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        method: &EndpointMethodIdent,
    ) -> Result<u64, V3Error> {
        let spec = FetchSpec::<()>::without_parser(filters_path(method), ResponseFilter::PLURAL);
        transport.count(ctx, &spec).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_path_nests_under_method() {
        let method = EndpointMethodIdent::new(EndpointIdent::new("s1", "e1"), "m 1");
        assert_eq!(
            filter_path(&method, "f1"),
            "/services/s1/endpoints/e1/methods/m%201/responseFilters/f1"
        );
    }

    #[test]
    fn test_empty_method_id_leaves_an_empty_segment() {
        let path = method_path(&EndpointIdent::new("s1", "e1"), "");
        assert!(crate::rest::ensure_identified("endpoint method", &path).is_err());
    }
}
