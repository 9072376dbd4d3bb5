use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{fields_of, flatten, require_id, V3Methods};
use crate::rest::{build_path, fields_params, FetchSpec, Pagination, V3Error, V3Transport};
use crate::types::{
    Application, ApplicationId, MemberId, PackageKey, V3Resource, APPLICATION_DEEP_FIELDS,
};

/// Application operations.
#[async_trait]
pub trait ApplicationMethods: Send + Sync {
    /// Fetches an application.
    async fn get_application(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &ApplicationId,
    ) -> Result<Application, V3Error> {
        Err(V3Error::not_implemented("get_application"))
    }

    /// Fetches an application together with its package keys.
    async fn get_full_application(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &ApplicationId,
    ) -> Result<Application, V3Error> {
        Err(V3Error::not_implemented("get_full_application"))
    }

    /// Creates an application owned by a member.
    async fn create_application(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _member_id: &MemberId,
        _application: &Application,
    ) -> Result<Application, V3Error> {
        Err(V3Error::not_implemented("create_application"))
    }

    /// Updates an application. The application must carry its identifier.
    async fn update_application(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _application: &Application,
    ) -> Result<Application, V3Error> {
        Err(V3Error::not_implemented("update_application"))
    }

    /// Deletes an application.
    async fn delete_application(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &ApplicationId,
    ) -> Result<(), V3Error> {
        Err(V3Error::not_implemented("delete_application"))
    }

    /// Lists all applications.
    async fn list_applications(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
    ) -> Result<Vec<Application>, V3Error> {
        Err(V3Error::not_implemented("list_applications"))
    }

    /// Lists the applications of a member.
    async fn list_applications_of_member(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _member_id: &MemberId,
    ) -> Result<Vec<Application>, V3Error> {
        Err(V3Error::not_implemented("list_applications_of_member"))
    }

    /// Counts the applications of a member.
    async fn count_applications_of_member(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _member_id: &MemberId,
    ) -> Result<u64, V3Error> {
        Err(V3Error::not_implemented("count_applications_of_member"))
    }

    /// Lists the package keys issued to an application.
    async fn list_application_package_keys(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &ApplicationId,
    ) -> Result<Vec<PackageKey>, V3Error> {
        Err(V3Error::not_implemented("list_application_package_keys"))
    }

    /// Counts the package keys issued to an application.
    async fn count_application_package_keys(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &ApplicationId,
    ) -> Result<u64, V3Error> {
        Err(V3Error::not_implemented("count_application_package_keys"))
    }
}

fn application_path(id: &str) -> String {
    build_path("/applications/{id}", &[("id", id)])
}

fn member_applications_path(member_id: &MemberId) -> String {
    build_path("/members/{id}/applications", &[("id", member_id)])
}

fn application_keys_path(id: &ApplicationId) -> String {
    build_path("/applications/{id}/packageKeys", &[("id", id)])
}

#[async_trait]
impl ApplicationMethods for V3Methods {
    async fn get_application(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &ApplicationId,
    ) -> Result<Application, V3Error> {
        let spec = FetchSpec::new(application_path(id.as_str()), Application::NAME)
            .with_query(fields_of::<Application>());
        transport.get_object(ctx, &spec).await
    }

    async fn get_full_application(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &ApplicationId,
    ) -> Result<Application, V3Error> {
        let spec = FetchSpec::new(application_path(id.as_str()), Application::NAME)
            .with_query(fields_params(APPLICATION_DEEP_FIELDS));
        transport.get_object(ctx, &spec).await
    }

    async fn create_application(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        member_id: &MemberId,
        application: &Application,
    ) -> Result<Application, V3Error> {
        let spec = FetchSpec::new(member_applications_path(member_id), Application::NAME)
            .with_query(fields_of::<Application>());
        transport.create_object(ctx, &spec, application).await
    }

    async fn update_application(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        application: &Application,
    ) -> Result<Application, V3Error> {
        let id = require_id(Application::NAME, application.id.as_ref())?;
        let spec = FetchSpec::new(application_path(id), Application::NAME)
            .with_query(fields_of::<Application>());
        transport.update_object(ctx, &spec, application).await
    }

    async fn delete_application(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &ApplicationId,
    ) -> Result<(), V3Error> {
        let spec =
            FetchSpec::<()>::without_parser(application_path(id.as_str()), Application::NAME);
        transport.delete_object(ctx, &spec).await
    }

    async fn list_applications(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
    ) -> Result<Vec<Application>, V3Error> {
        let spec = FetchSpec::new("/applications", Application::PLURAL)
            .with_query(fields_of::<Application>())
            .paginate(Pagination::per_page());
        transport.fetch_all(ctx, &spec).await.map(flatten)
    }

    async fn list_applications_of_member(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        member_id: &MemberId,
    ) -> Result<Vec<Application>, V3Error> {
        let spec = FetchSpec::new(member_applications_path(member_id), "member applications")
            .with_query(fields_of::<Application>())
            .paginate(Pagination::per_page());
        transport.fetch_all(ctx, &spec).await.map(flatten)
    }

    async fn count_applications_of_member(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        member_id: &MemberId,
    ) -> Result<u64, V3Error> {
        let spec = FetchSpec::<()>::without_parser(
            member_applications_path(member_id),
            "member applications",
        );
        transport.count(ctx, &spec).await
    }

    async fn list_application_package_keys(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &ApplicationId,
    ) -> Result<Vec<PackageKey>, V3Error> {
        let spec = FetchSpec::new(application_keys_path(id), "application package keys")
            .with_query(fields_of::<PackageKey>())
            .paginate(Pagination::per_page());
        transport.fetch_all(ctx, &spec).await.map(flatten)
    }

    async fn count_application_package_keys(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &ApplicationId,
    ) -> Result<u64, V3Error> {
        let spec =
            FetchSpec::<()>::without_parser(application_keys_path(id), "application package keys");
        transport.count(ctx, &spec).await
    }
}
