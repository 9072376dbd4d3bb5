use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{fields_of, flatten, require_id, V3Methods};
use crate::rest::{build_path, filtering_params, FetchSpec, Pagination, V3Error, V3Transport};
use crate::types::{Package, PackageId, V3Resource};

/// Package operations.
#[async_trait]
pub trait PackageMethods: Send + Sync {
    /// Fetches a package.
    async fn get_package(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &PackageId,
    ) -> Result<Package, V3Error> {
        Err(V3Error::not_implemented("get_package"))
    }

    /// Creates a package.
    async fn create_package(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _package: &Package,
    ) -> Result<Package, V3Error> {
        Err(V3Error::not_implemented("create_package"))
    }

    /// Updates a package. The package must carry its identifier.
    async fn update_package(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _package: &Package,
    ) -> Result<Package, V3Error> {
        Err(V3Error::not_implemented("update_package"))
    }

    /// Deletes a package.
    async fn delete_package(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &PackageId,
    ) -> Result<(), V3Error> {
        Err(V3Error::not_implemented("delete_package"))
    }

    /// Lists all packages.
    async fn list_packages(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
    ) -> Result<Vec<Package>, V3Error> {
        Err(V3Error::not_implemented("list_packages"))
    }

    /// Lists packages matching `filters`, returning only `fields`.
    async fn list_packages_filtered(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _filters: &[(&str, &str)],
        _fields: &[&str],
    ) -> Result<Vec<Package>, V3Error> {
        Err(V3Error::not_implemented("list_packages_filtered"))
    }
}

fn package_path(id: &str) -> String {
    build_path("/packages/{id}", &[("id", id)])
}

#[async_trait]
impl PackageMethods for V3Methods {
    async fn get_package(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &PackageId,
    ) -> Result<Package, V3Error> {
        let spec = FetchSpec::new(package_path(id.as_str()), Package::NAME)
            .with_query(fields_of::<Package>());
        transport.get_object(ctx, &spec).await
    }

    async fn create_package(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        package: &Package,
    ) -> Result<Package, V3Error> {
        let spec = FetchSpec::new("/packages", Package::NAME).with_query(fields_of::<Package>());
        transport.create_object(ctx, &spec, package).await
    }

    async fn update_package(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        package: &Package,
    ) -> Result<Package, V3Error> {
        let id = require_id(Package::NAME, package.id.as_ref())?;
        let spec =
            FetchSpec::new(package_path(id), Package::NAME).with_query(fields_of::<Package>());
        transport.update_object(ctx, &spec, package).await
    }

    async fn delete_package(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &PackageId,
    ) -> Result<(), V3Error> {
        let spec = FetchSpec::<()>::without_parser(package_path(id.as_str()), Package::NAME);
        transport.delete_object(ctx, &spec).await
    }

    async fn list_packages(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
    ) -> Result<Vec<Package>, V3Error> {
        self.list_packages_filtered(ctx, transport, &[], Package::FIELDS)
            .await
    }

    async fn list_packages_filtered(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        filters: &[(&str, &str)],
        fields: &[&str],
    ) -> Result<Vec<Package>, V3Error> {
        let spec = FetchSpec::new("/packages", Package::PLURAL)
            .with_query(filtering_params(filters.iter().copied(), fields))
            .paginate(Pagination::per_page());
        transport.fetch_all(ctx, &spec).await.map(flatten)
    }
}
