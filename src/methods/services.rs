use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{fields_of, flatten, require_id, V3Methods};
use crate::rest::{build_path, filtering_params, FetchSpec, Pagination, V3Error, V3Transport};
use crate::types::{
    OAuthSecurityProfile, RolePermission, Service, ServiceCache, ServiceId, V3Resource,
};

/// Service operations, including the roles granted on a service.
#[async_trait]
pub trait ServiceMethods: Send + Sync {
    /// Fetches a service.
    async fn get_service(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &ServiceId,
    ) -> Result<Service, V3Error> {
        Err(V3Error::not_implemented("get_service"))
    }

    /// Creates a service.
    async fn create_service(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _service: &Service,
    ) -> Result<Service, V3Error> {
        Err(V3Error::not_implemented("create_service"))
    }

    /// Updates a service. The service must carry its identifier.
    async fn update_service(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _service: &Service,
    ) -> Result<Service, V3Error> {
        Err(V3Error::not_implemented("update_service"))
    }

    /// Deletes a service.
    async fn delete_service(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &ServiceId,
    ) -> Result<(), V3Error> {
        Err(V3Error::not_implemented("delete_service"))
    }

    /// Lists all services.
    async fn list_services(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
    ) -> Result<Vec<Service>, V3Error> {
        Err(V3Error::not_implemented("list_services"))
    }

    /// Lists services matching `filters`, returning only `fields`.
    async fn list_services_filtered(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _filters: &[(&str, &str)],
        _fields: &[&str],
    ) -> Result<Vec<Service>, V3Error> {
        Err(V3Error::not_implemented("list_services_filtered"))
    }

    /// Counts services matching `filters`.
    async fn count_services(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _filters: &[(&str, &str)],
    ) -> Result<u64, V3Error> {
        Err(V3Error::not_implemented("count_services"))
    }

    /// Returns the roles granted on a service.
    async fn get_service_roles(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &ServiceId,
    ) -> Result<Vec<RolePermission>, V3Error> {
        Err(V3Error::not_implemented("get_service_roles"))
    }

    /// Replaces the roles granted on a service.
    async fn set_service_roles(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &ServiceId,
        _roles: &[RolePermission],
    ) -> Result<Vec<RolePermission>, V3Error> {
        Err(V3Error::not_implemented("set_service_roles"))
    }

    /// Revokes every role granted on a service.
    async fn delete_service_roles(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &ServiceId,
    ) -> Result<(), V3Error> {
        Err(V3Error::not_implemented("delete_service_roles"))
    }
}

/// Response cache settings of a service.
#[async_trait]
pub trait ServiceCacheMethods: Send + Sync {
    /// Fetches the cache settings of a service.
    async fn get_service_cache(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &ServiceId,
    ) -> Result<ServiceCache, V3Error> {
        Err(V3Error::not_implemented("get_service_cache"))
    }

    /// Enables caching for a service.
    async fn create_service_cache(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &ServiceId,
        _cache: &ServiceCache,
    ) -> Result<ServiceCache, V3Error> {
        Err(V3Error::not_implemented("create_service_cache"))
    }

    /// Changes the cache settings of a service.
    async fn update_service_cache(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &ServiceId,
        _cache: &ServiceCache,
    ) -> Result<ServiceCache, V3Error> {
        Err(V3Error::not_implemented("update_service_cache"))
    }

    /// Disables caching for a service.
    async fn delete_service_cache(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &ServiceId,
    ) -> Result<(), V3Error> {
        Err(V3Error::not_implemented("delete_service_cache"))
    }
}

/// OAuth security profile of a service.
#[async_trait]
pub trait SecurityProfileMethods: Send + Sync {
    /// Fetches the OAuth profile of a service.
    async fn get_oauth_security_profile(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &ServiceId,
    ) -> Result<OAuthSecurityProfile, V3Error> {
        Err(V3Error::not_implemented("get_oauth_security_profile"))
    }

    /// Enables OAuth for a service.
    async fn create_oauth_security_profile(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &ServiceId,
        _profile: &OAuthSecurityProfile,
    ) -> Result<OAuthSecurityProfile, V3Error> {
        Err(V3Error::not_implemented("create_oauth_security_profile"))
    }

    /// Changes the OAuth profile of a service.
    async fn update_oauth_security_profile(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &ServiceId,
        _profile: &OAuthSecurityProfile,
    ) -> Result<OAuthSecurityProfile, V3Error> {
        Err(V3Error::not_implemented("update_oauth_security_profile"))
    }

    /// Disables OAuth for a service.
    async fn delete_oauth_security_profile(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _id: &ServiceId,
    ) -> Result<(), V3Error> {
        Err(V3Error::not_implemented("delete_oauth_security_profile"))
    }
}

fn service_path(id: &str) -> String {
    build_path("/services/{id}", &[("id", id)])
}

fn service_roles_path(id: &ServiceId) -> String {
    format!("{}/roles", service_path(id.as_str()))
}

fn service_cache_path(id: &ServiceId) -> String {
    format!("{}/cache", service_path(id.as_str()))
}

fn oauth_profile_path(id: &ServiceId) -> String {
    format!("{}/securityProfile/oauth", service_path(id.as_str()))
}

#[async_trait]
impl ServiceMethods for V3Methods {
    async fn get_service(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &ServiceId,
    ) -> Result<Service, V3Error> {
        let spec = FetchSpec::new(service_path(id.as_str()), Service::NAME)
            .with_query(fields_of::<Service>());
        transport.get_object(ctx, &spec).await
    }

    async fn create_service(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        service: &Service,
    ) -> Result<Service, V3Error> {
        let spec = FetchSpec::new("/services", Service::NAME).with_query(fields_of::<Service>());
        transport.create_object(ctx, &spec, service).await
    }

    async fn update_service(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        service: &Service,
    ) -> Result<Service, V3Error> {
        let id = require_id(Service::NAME, service.id.as_ref())?;
        let spec =
            FetchSpec::new(service_path(id), Service::NAME).with_query(fields_of::<Service>());
        transport.update_object(ctx, &spec, service).await
    }

    async fn delete_service(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &ServiceId,
    ) -> Result<(), V3Error> {
        let spec = FetchSpec::<()>::without_parser(service_path(id.as_str()), Service::NAME);
        transport.delete_object(ctx, &spec).await
    }

    async fn list_services(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
    ) -> Result<Vec<Service>, V3Error> {
        self.list_services_filtered(ctx, transport, &[], Service::FIELDS)
            .await
    }

    async fn list_services_filtered(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        filters: &[(&str, &str)],
        fields: &[&str],
    ) -> Result<Vec<Service>, V3Error> {
        let spec = FetchSpec::new("/services", Service::PLURAL)
            .with_query(filtering_params(filters.iter().copied(), fields))
            .paginate(Pagination::per_page());
        transport.fetch_all(ctx, &spec).await.map(flatten)
    }

    async fn count_services(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        filters: &[(&str, &str)],
    ) -> Result<u64, V3Error> {
        let spec = FetchSpec::<()>::without_parser("/services", Service::PLURAL)
            .with_query(filtering_params(filters.iter().copied(), &[]));
        transport.count(ctx, &spec).await
    }

    async fn get_service_roles(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &ServiceId,
    ) -> Result<Vec<RolePermission>, V3Error> {
        let spec = FetchSpec::new(service_roles_path(id), RolePermission::NAME)
            .with_query(fields_of::<RolePermission>());
        transport.get_object(ctx, &spec).await
    }

    async fn set_service_roles(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &ServiceId,
        roles: &[RolePermission],
    ) -> Result<Vec<RolePermission>, V3Error> {
        let spec = FetchSpec::new(service_roles_path(id), RolePermission::NAME);
        transport.update_object(ctx, &spec, roles).await
    }

    async fn delete_service_roles(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &ServiceId,
    ) -> Result<(), V3Error> {
        let spec = FetchSpec::<()>::without_parser(service_roles_path(id), RolePermission::NAME);
        transport.delete_object(ctx, &spec).await
    }
}

#[async_trait]
impl ServiceCacheMethods for V3Methods {
    async fn get_service_cache(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &ServiceId,
    ) -> Result<ServiceCache, V3Error> {
        let spec = FetchSpec::new(service_cache_path(id), ServiceCache::NAME);
        transport.get_object(ctx, &spec).await
    }

    async fn create_service_cache(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &ServiceId,
        cache: &ServiceCache,
    ) -> Result<ServiceCache, V3Error> {
        let spec = FetchSpec::new(service_cache_path(id), ServiceCache::NAME);
        transport.create_object(ctx, &spec, cache).await
    }

    async fn update_service_cache(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &ServiceId,
        cache: &ServiceCache,
    ) -> Result<ServiceCache, V3Error> {
        let spec = FetchSpec::new(service_cache_path(id), ServiceCache::NAME);
        transport.update_object(ctx, &spec, cache).await
    }

    async fn delete_service_cache(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &ServiceId,
    ) -> Result<(), V3Error> {
        let spec = FetchSpec::<()>::without_parser(service_cache_path(id), ServiceCache::NAME);
        transport.delete_object(ctx, &spec).await
    }
}

#[async_trait]
impl SecurityProfileMethods for V3Methods {
    async fn get_oauth_security_profile(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &ServiceId,
    ) -> Result<OAuthSecurityProfile, V3Error> {
        let spec = FetchSpec::new(oauth_profile_path(id), OAuthSecurityProfile::NAME);
        transport.get_object(ctx, &spec).await
    }

    async fn create_oauth_security_profile(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &ServiceId,
        profile: &OAuthSecurityProfile,
    ) -> Result<OAuthSecurityProfile, V3Error> {
        let spec = FetchSpec::new(oauth_profile_path(id), OAuthSecurityProfile::NAME);
        transport.create_object(ctx, &spec, profile).await
    }

    async fn update_oauth_security_profile(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &ServiceId,
        profile: &OAuthSecurityProfile,
    ) -> Result<OAuthSecurityProfile, V3Error> {
        let spec = FetchSpec::new(oauth_profile_path(id), OAuthSecurityProfile::NAME);
        transport.update_object(ctx, &spec, profile).await
    }

    async fn delete_oauth_security_profile(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        id: &ServiceId,
    ) -> Result<(), V3Error> {
        let spec =
            FetchSpec::<()>::without_parser(oauth_profile_path(id), OAuthSecurityProfile::NAME);
        transport.delete_object(ctx, &spec).await
    }
}
