use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{fields_of, flatten, require_id, V3Methods};
use crate::rest::{build_path, FetchSpec, Pagination, QueryParams, V3Error, V3Transport};
use crate::types::{ErrorMessage, ErrorSet, ErrorSetIdent, ServiceId, V3Resource};

/// Error set operations. Error sets live under a service.
#[async_trait]
pub trait ErrorSetMethods: Send + Sync {
    /// Lists the error sets of a service. `query` is sent on top of the
    /// default attribute selection.
    async fn list_error_sets(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _service_id: &ServiceId,
        _query: &QueryParams,
    ) -> Result<Vec<ErrorSet>, V3Error> {
        Err(V3Error::not_implemented("list_error_sets"))
    }

    /// Fetches an error set with its messages.
    async fn get_error_set(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &ErrorSetIdent,
    ) -> Result<ErrorSet, V3Error> {
        Err(V3Error::not_implemented("get_error_set"))
    }

    /// Creates an error set in a service.
    async fn create_error_set(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _service_id: &ServiceId,
        _set: &ErrorSet,
    ) -> Result<ErrorSet, V3Error> {
        Err(V3Error::not_implemented("create_error_set"))
    }

    /// Updates an error set. The set must carry its identifier.
    async fn update_error_set(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _service_id: &ServiceId,
        _set: &ErrorSet,
    ) -> Result<ErrorSet, V3Error> {
        Err(V3Error::not_implemented("update_error_set"))
    }

    /// Deletes an error set.
    async fn delete_error_set(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &ErrorSetIdent,
    ) -> Result<(), V3Error> {
        Err(V3Error::not_implemented("delete_error_set"))
    }

    /// Replaces one message of an error set. The message must carry its
    /// identifier.
    async fn update_error_set_message(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &ErrorSetIdent,
        _message: &ErrorMessage,
    ) -> Result<ErrorMessage, V3Error> {
        Err(V3Error::not_implemented("update_error_set_message"))
    }
}

fn error_sets_path(service_id: &ServiceId) -> String {
    build_path("/services/{id}/errorSets", &[("id", service_id)])
}

fn error_set_path(service_id: &ServiceId, error_set_id: &str) -> String {
    build_path(
        &format!("{}/{{errorSetId}}", error_sets_path(service_id)),
        &[("errorSetId", error_set_id)],
    )
}

fn error_message_path(ident: &ErrorSetIdent, message_id: &str) -> String {
    build_path(
        &format!(
            "{}/errorMessages/{{messageId}}",
            error_set_path(&ident.service_id, &ident.error_set_id)
        ),
        &[("messageId", message_id)],
    )
}

#[async_trait]
impl ErrorSetMethods for V3Methods {
    async fn list_error_sets(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        service_id: &ServiceId,
        query: &QueryParams,
    ) -> Result<Vec<ErrorSet>, V3Error> {
        let mut params = fields_of::<ErrorSet>();
        params.extend(query);
        let spec = FetchSpec::new(error_sets_path(service_id), ErrorSet::PLURAL)
            .with_query(params)
            .paginate(Pagination::per_page());
        transport.fetch_all(ctx, &spec).await.map(flatten)
    }

    async fn get_error_set(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &ErrorSetIdent,
    ) -> Result<ErrorSet, V3Error> {
        let spec = FetchSpec::new(
            error_set_path(&ident.service_id, &ident.error_set_id),
            ErrorSet::NAME,
        )
        .with_query(fields_of::<ErrorSet>());
        transport.get_object(ctx, &spec).await
    }

    async fn create_error_set(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        service_id: &ServiceId,
        set: &ErrorSet,
    ) -> Result<ErrorSet, V3Error> {
        let spec = FetchSpec::new(error_sets_path(service_id), ErrorSet::NAME)
            .with_query(fields_of::<ErrorSet>());
        transport.create_object(ctx, &spec, set).await
    }

    async fn update_error_set(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        service_id: &ServiceId,
        set: &ErrorSet,
    ) -> Result<ErrorSet, V3Error> {
        let id = require_id(ErrorSet::NAME, set.id.as_ref())?;
        let spec = FetchSpec::new(error_set_path(service_id, id), ErrorSet::NAME)
            .with_query(fields_of::<ErrorSet>());
        transport.update_object(ctx, &spec, set).await
    }

    async fn delete_error_set(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &ErrorSetIdent,
    ) -> Result<(), V3Error> {
        let spec = FetchSpec::<()>::without_parser(
            error_set_path(&ident.service_id, &ident.error_set_id),
            ErrorSet::NAME,
        );
        transport.delete_object(ctx, &spec).await
    }

    async fn update_error_set_message(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &ErrorSetIdent,
        message: &ErrorMessage,
    ) -> Result<ErrorMessage, V3Error> {
        let id = require_id(ErrorMessage::NAME, message.id.as_ref())?;
        let spec = FetchSpec::new(error_message_path(ident, id), ErrorMessage::NAME);
        transport.update_object(ctx, &spec, message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_path() {
        let ident = ErrorSetIdent::new("s1", "es1");
        assert_eq!(
            error_message_path(&ident, "ERR_403_NOT_AUTHORIZED"),
            "/services/s1/errorSets/es1/errorMessages/ERR_403_NOT_AUTHORIZED"
        );
    }
}
