use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{fields_of, flatten, require_id, V3Methods};
use crate::rest::{build_path, filtering_params, FetchSpec, Pagination, V3Error, V3Transport};
use crate::types::{ApplicationId, PackageKey, PackageKeyId, V3Resource};

/// Package key operations.
#[async_trait]
pub trait PackageKeyMethods: Send + Sync {
    /// Fetches a package key.
    async fn get_package_key(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &PackageKeyId,
    ) -> Result<PackageKey, V3Error> {
        Err(V3Error::not_implemented("get_package_key"))
    }

    /// Issues a package key to an application.
    ///
    /// The key must reference both the package and the plan it grants.
    async fn create_package_key(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _application_id: &ApplicationId,
        _key: &PackageKey,
    ) -> Result<PackageKey, V3Error> {
        Err(V3Error::not_implemented("create_package_key"))
    }

    /// Updates a package key. The key must carry its identifier.
    async fn update_package_key(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _key: &PackageKey,
    ) -> Result<PackageKey, V3Error> {
        Err(V3Error::not_implemented("update_package_key"))
    }

    /// Deletes a package key.
    async fn delete_package_key(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &PackageKeyId,
    ) -> Result<(), V3Error> {
        Err(V3Error::not_implemented("delete_package_key"))
    }

    /// Lists all package keys.
    async fn list_package_keys(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
    ) -> Result<Vec<PackageKey>, V3Error> {
        Err(V3Error::not_implemented("list_package_keys"))
    }

    /// Lists package keys matching `filters`, returning only `fields`.
    async fn list_package_keys_filtered(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _filters: &[(&str, &str)],
        _fields: &[&str],
    ) -> Result<Vec<PackageKey>, V3Error> {
        Err(V3Error::not_implemented("list_package_keys_filtered"))
    }
}

fn package_key_path(id: &str) -> String {
    build_path("/packageKeys/{id}", &[("id", id)])
}

#[async_trait]
impl PackageKeyMethods for V3Methods {
    async fn get_package_key(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &PackageKeyId,
    ) -> Result<PackageKey, V3Error> {
        let spec = FetchSpec::new(package_key_path(id.as_str()), PackageKey::NAME)
            .with_query(fields_of::<PackageKey>());
        transport.get_object(ctx, &spec).await
    }

    async fn create_package_key(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        application_id: &ApplicationId,
        key: &PackageKey,
    ) -> Result<PackageKey, V3Error> {
        if !key.links_package_and_plan() {
            return Err(V3Error::usage(
                PackageKey::NAME,
                "package key must reference both a package and a plan",
            ));
        }

        let resource = build_path("/applications/{id}/packageKeys", &[("id", application_id)]);
        let spec = FetchSpec::new(resource, PackageKey::NAME).with_query(fields_of::<PackageKey>());
        transport.create_object(ctx, &spec, key).await
    }

    async fn update_package_key(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        key: &PackageKey,
    ) -> Result<PackageKey, V3Error> {
        let id = require_id(PackageKey::NAME, key.id.as_ref())?;
        let spec = FetchSpec::new(package_key_path(id), PackageKey::NAME)
            .with_query(fields_of::<PackageKey>());
        transport.update_object(ctx, &spec, key).await
    }

    async fn delete_package_key(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &PackageKeyId,
    ) -> Result<(), V3Error> {
        let spec = FetchSpec::<()>::without_parser(package_key_path(id.as_str()), PackageKey::NAME);
        transport.delete_object(ctx, &spec).await
    }

    async fn list_package_keys(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
    ) -> Result<Vec<PackageKey>, V3Error> {
        self.list_package_keys_filtered(ctx, transport, &[], PackageKey::FIELDS)
            .await
    }

    async fn list_package_keys_filtered(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        filters: &[(&str, &str)],
        fields: &[&str],
    ) -> Result<Vec<PackageKey>, V3Error> {
        let spec = FetchSpec::new("/packageKeys", PackageKey::PLURAL)
            .with_query(filtering_params(filters.iter().copied(), fields))
            .paginate(Pagination::per_page());
        transport.fetch_all(ctx, &spec).await.map(flatten)
    }
}
