use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::V3Methods;
use crate::rest::{fields_params, FetchSpec, V3Error, V3Transport};
use crate::types::Domain;

/// Host names known to the area.
#[async_trait]
pub trait DomainMethods: Send + Sync {
    /// Returns the public host names endpoints can be exposed on.
    async fn get_public_domains(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
    ) -> Result<Vec<String>, V3Error> {
        Err(V3Error::not_implemented("get_public_domains"))
    }

    /// Returns the host names of backend systems.
    async fn get_system_domains(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
    ) -> Result<Vec<String>, V3Error> {
        Err(V3Error::not_implemented("get_system_domains"))
    }
}

async fn host_names(
    ctx: &CancellationToken,
    transport: &V3Transport,
    resource: &str,
    context: &str,
) -> Result<Vec<String>, V3Error> {
    let spec: FetchSpec<Vec<Domain>> =
        FetchSpec::new(resource, context).with_query(fields_params(&["address"]));
    let domains = transport.get_object(ctx, &spec).await?;
    Ok(domains.into_iter().map(|d| d.address).collect())
}

#[async_trait]
impl DomainMethods for V3Methods {
    async fn get_public_domains(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
    ) -> Result<Vec<String>, V3Error> {
        host_names(ctx, transport, "/domains/public/hostnames", "public domains").await
    }

    async fn get_system_domains(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
    ) -> Result<Vec<String>, V3Error> {
        host_names(ctx, transport, "/domains/system/hostnames", "system domains").await
    }
}
