use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{fields_of, flatten, V3Methods};
use crate::rest::{build_path, filtering_params, FetchSpec, Pagination, V3Error, V3Transport};
use crate::types::{Role, RoleId, V3Resource};

/// Role operations. Roles are managed in the portal; the API only reads them.
#[async_trait]
pub trait RoleMethods: Send + Sync {
    /// Fetches a role.
    async fn get_role(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &RoleId,
    ) -> Result<Role, V3Error> {
        Err(V3Error::not_implemented("get_role"))
    }

    /// Lists all roles.
    async fn list_roles(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
    ) -> Result<Vec<Role>, V3Error> {
        Err(V3Error::not_implemented("list_roles"))
    }

    /// Lists roles matching `filters`, returning only `fields`.
    async fn list_roles_filtered(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _filters: &[(&str, &str)],
        _fields: &[&str],
    ) -> Result<Vec<Role>, V3Error> {
        Err(V3Error::not_implemented("list_roles_filtered"))
    }
}

#[async_trait]
impl RoleMethods for V3Methods {
    async fn get_role(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &RoleId,
    ) -> Result<Role, V3Error> {
        let resource = build_path("/roles/{id}", &[("id", id)]);
        let spec = FetchSpec::new(resource, Role::NAME).with_query(fields_of::<Role>());
        transport.get_object(ctx, &spec).await
    }

    async fn list_roles(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
    ) -> Result<Vec<Role>, V3Error> {
        self.list_roles_filtered(ctx, transport, &[], Role::FIELDS).await
    }

    async fn list_roles_filtered(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        filters: &[(&str, &str)],
        fields: &[&str],
    ) -> Result<Vec<Role>, V3Error> {
        let spec = FetchSpec::new("/roles", Role::PLURAL)
            .with_query(filtering_params(filters.iter().copied(), fields))
            .paginate(Pagination::per_page());
        transport.fetch_all(ctx, &spec).await.map(flatten)
    }
}
