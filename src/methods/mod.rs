//! Method registry.
//!
//! The SDK's method surface is split into groups, one trait per group
//! ([`PackageMethods`], [`ServiceMethods`], ...). Every trait method has a
//! default body that fails with [`V3Error::NotImplemented`] naming the
//! method, so an implementation only overrides what it supports.
//!
//! A [`MethodSchema`] holds one implementation per group. The facade clients
//! ([`PluggableClient`](crate::PluggableClient),
//! [`FixedSchemaClient`](crate::FixedSchemaClient)) dispatch every call to
//! the matching slot together with the shared [`V3Transport`].
//!
//! - [`V3Methods`]: the standard implementation, talking to the V3 API
//! - [`Unimplemented`]: fails every call; the starting point for test doubles
//!
//! # Example
//!
//! Replacing one method with a test double:
//!
//! ```rust
//! use async_trait::async_trait;
//! use mashery_v3::methods::{MethodSchema, PackageMethods};
//! use mashery_v3::rest::{V3Error, V3Transport};
//! use mashery_v3::types::{Package, PackageId};
//! use tokio_util::sync::CancellationToken;
//!
//! struct FixedPackage;
//!
//! #[async_trait]
//! impl PackageMethods for FixedPackage {
//!     async fn get_package(
//!         &self,
//!         _ctx: &CancellationToken,
//!         _transport: &V3Transport,
//!         id: &PackageId,
//!     ) -> Result<Package, V3Error> {
//!         Ok(Package { id: Some(id.clone()), ..Package::default() })
//!     }
//! }
//!
//! let schema = MethodSchema::unimplemented().with_packages(FixedPackage);
//! ```

mod applications;
mod domains;
mod email_templates;
mod endpoint_methods;
mod endpoints;
mod error_sets;
mod members;
mod package_keys;
mod packages;
mod plans;
mod roles;
mod services;

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;

pub use applications::ApplicationMethods;
pub use domains::DomainMethods;
pub use email_templates::EmailTemplateSetMethods;
pub use endpoint_methods::{ApiMethodMethods, ResponseFilterMethods};
pub use endpoints::EndpointMethods;
pub use error_sets::ErrorSetMethods;
pub use members::MemberMethods;
pub use package_keys::PackageKeyMethods;
pub use packages::PackageMethods;
pub use plans::PlanMethods;
pub use roles::RoleMethods;
pub use services::{SecurityProfileMethods, ServiceCacheMethods, ServiceMethods};

use crate::rest::{fields_params, QueryParams, V3Error};
use crate::types::V3Resource;

/// The standard implementation of every method group.
#[derive(Debug, Clone, Copy, Default)]
pub struct V3Methods;

/// Implements every method group with the failing defaults only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unimplemented;

impl ApplicationMethods for Unimplemented {}
impl PackageMethods for Unimplemented {}
impl PlanMethods for Unimplemented {}
impl PackageKeyMethods for Unimplemented {}
impl MemberMethods for Unimplemented {}
impl RoleMethods for Unimplemented {}
impl ServiceMethods for Unimplemented {}
impl EndpointMethods for Unimplemented {}
impl ServiceCacheMethods for Unimplemented {}
impl SecurityProfileMethods for Unimplemented {}
impl ApiMethodMethods for Unimplemented {}
impl ResponseFilterMethods for Unimplemented {}
impl ErrorSetMethods for Unimplemented {}
impl EmailTemplateSetMethods for Unimplemented {}
impl DomainMethods for Unimplemented {}

/// One implementation per method group.
///
/// Cloning a schema shares the implementations.
#[derive(Clone)]
pub struct MethodSchema {
    applications: Arc<dyn ApplicationMethods>,
    packages: Arc<dyn PackageMethods>,
    plans: Arc<dyn PlanMethods>,
    package_keys: Arc<dyn PackageKeyMethods>,
    members: Arc<dyn MemberMethods>,
    roles: Arc<dyn RoleMethods>,
    services: Arc<dyn ServiceMethods>,
    endpoints: Arc<dyn EndpointMethods>,
    service_cache: Arc<dyn ServiceCacheMethods>,
    security_profiles: Arc<dyn SecurityProfileMethods>,
    endpoint_methods: Arc<dyn ApiMethodMethods>,
    response_filters: Arc<dyn ResponseFilterMethods>,
    error_sets: Arc<dyn ErrorSetMethods>,
    email_templates: Arc<dyn EmailTemplateSetMethods>,
    domains: Arc<dyn DomainMethods>,
}

// Verify MethodSchema is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MethodSchema>();
};

impl MethodSchema {
    /// A schema whose every slot fails with [`V3Error::NotImplemented`].
    #[must_use]
    pub fn unimplemented() -> Self {
        Self::uniform(Arc::new(Unimplemented))
    }

    /// A schema wired to the standard V3 API implementation.
    #[must_use]
    pub fn standard() -> Self {
        Self::uniform(Arc::new(V3Methods))
    }

    fn uniform<M>(methods: Arc<M>) -> Self
    where
        M: ApplicationMethods
            + PackageMethods
            + PlanMethods
            + PackageKeyMethods
            + MemberMethods
            + RoleMethods
            + ServiceMethods
            + EndpointMethods
            + ServiceCacheMethods
            + SecurityProfileMethods
            + ApiMethodMethods
            + ResponseFilterMethods
            + ErrorSetMethods
            + EmailTemplateSetMethods
            + DomainMethods
            + 'static,
    {
        Self {
            applications: methods.clone(),
            packages: methods.clone(),
            plans: methods.clone(),
            package_keys: methods.clone(),
            members: methods.clone(),
            roles: methods.clone(),
            services: methods.clone(),
            endpoints: methods.clone(),
            service_cache: methods.clone(),
            security_profiles: methods.clone(),
            endpoint_methods: methods.clone(),
            response_filters: methods.clone(),
            error_sets: methods.clone(),
            email_templates: methods.clone(),
            domains: methods,
        }
    }

    /// Replaces the application methods.
    #[must_use]
    pub fn with_applications(mut self, methods: impl ApplicationMethods + 'static) -> Self {
        self.applications = Arc::new(methods);
        self
    }

    /// Replaces the package methods.
    #[must_use]
    pub fn with_packages(mut self, methods: impl PackageMethods + 'static) -> Self {
        self.packages = Arc::new(methods);
        self
    }

    /// Replaces the plan methods.
    #[must_use]
    pub fn with_plans(mut self, methods: impl PlanMethods + 'static) -> Self {
        self.plans = Arc::new(methods);
        self
    }

    /// Replaces the package key methods.
    #[must_use]
    pub fn with_package_keys(mut self, methods: impl PackageKeyMethods + 'static) -> Self {
        self.package_keys = Arc::new(methods);
        self
    }

    /// Replaces the member methods.
    #[must_use]
    pub fn with_members(mut self, methods: impl MemberMethods + 'static) -> Self {
        self.members = Arc::new(methods);
        self
    }

    /// Replaces the role methods.
    #[must_use]
    pub fn with_roles(mut self, methods: impl RoleMethods + 'static) -> Self {
        self.roles = Arc::new(methods);
        self
    }

    /// Replaces the service methods.
    #[must_use]
    pub fn with_services(mut self, methods: impl ServiceMethods + 'static) -> Self {
        self.services = Arc::new(methods);
        self
    }

    /// Replaces the endpoint methods.
    #[must_use]
    pub fn with_endpoints(mut self, methods: impl EndpointMethods + 'static) -> Self {
        self.endpoints = Arc::new(methods);
        self
    }

    /// Replaces the service cache methods.
    #[must_use]
    pub fn with_service_cache(mut self, methods: impl ServiceCacheMethods + 'static) -> Self {
        self.service_cache = Arc::new(methods);
        self
    }

    /// Replaces the security profile methods.
    #[must_use]
    pub fn with_security_profiles(
        mut self,
        methods: impl SecurityProfileMethods + 'static,
    ) -> Self {
        self.security_profiles = Arc::new(methods);
        self
    }

    /// Replaces the endpoint method operations.
    #[must_use]
    pub fn with_endpoint_methods(mut self, methods: impl ApiMethodMethods + 'static) -> Self {
        self.endpoint_methods = Arc::new(methods);
        self
    }

    /// Replaces the response filter methods.
    #[must_use]
    pub fn with_response_filters(mut self, methods: impl ResponseFilterMethods + 'static) -> Self {
        self.response_filters = Arc::new(methods);
        self
    }

    /// Replaces the error set methods.
    #[must_use]
    pub fn with_error_sets(mut self, methods: impl ErrorSetMethods + 'static) -> Self {
        self.error_sets = Arc::new(methods);
        self
    }

    /// Replaces the email template set methods.
    #[must_use]
    pub fn with_email_templates(mut self, methods: impl EmailTemplateSetMethods + 'static) -> Self {
        self.email_templates = Arc::new(methods);
        self
    }

    /// Replaces the domain methods.
    #[must_use]
    pub fn with_domains(mut self, methods: impl DomainMethods + 'static) -> Self {
        self.domains = Arc::new(methods);
        self
    }

    /// Application methods.
    #[must_use]
    pub fn applications(&self) -> &dyn ApplicationMethods {
        self.applications.as_ref()
    }

    /// Package methods.
    #[must_use]
    pub fn packages(&self) -> &dyn PackageMethods {
        self.packages.as_ref()
    }

    /// Plan methods.
    #[must_use]
    pub fn plans(&self) -> &dyn PlanMethods {
        self.plans.as_ref()
    }

    /// Package key methods.
    #[must_use]
    pub fn package_keys(&self) -> &dyn PackageKeyMethods {
        self.package_keys.as_ref()
    }

    /// Member methods.
    #[must_use]
    pub fn members(&self) -> &dyn MemberMethods {
        self.members.as_ref()
    }

    /// Role methods.
    #[must_use]
    pub fn roles(&self) -> &dyn RoleMethods {
        self.roles.as_ref()
    }

    /// Service methods.
    #[must_use]
    pub fn services(&self) -> &dyn ServiceMethods {
        self.services.as_ref()
    }

    /// Endpoint methods.
    #[must_use]
    pub fn endpoints(&self) -> &dyn EndpointMethods {
        self.endpoints.as_ref()
    }

    /// Service cache methods.
    #[must_use]
    pub fn service_cache(&self) -> &dyn ServiceCacheMethods {
        self.service_cache.as_ref()
    }

    /// Security profile methods.
    #[must_use]
    pub fn security_profiles(&self) -> &dyn SecurityProfileMethods {
        self.security_profiles.as_ref()
    }

    /// Endpoint method operations.
    #[must_use]
    pub fn endpoint_methods(&self) -> &dyn ApiMethodMethods {
        self.endpoint_methods.as_ref()
    }

    /// Response filter methods.
    #[must_use]
    pub fn response_filters(&self) -> &dyn ResponseFilterMethods {
        self.response_filters.as_ref()
    }

    /// Error set methods.
    #[must_use]
    pub fn error_sets(&self) -> &dyn ErrorSetMethods {
        self.error_sets.as_ref()
    }

    /// Email template set methods.
    #[must_use]
    pub fn email_templates(&self) -> &dyn EmailTemplateSetMethods {
        self.email_templates.as_ref()
    }

    /// Domain methods.
    #[must_use]
    pub fn domains(&self) -> &dyn DomainMethods {
        self.domains.as_ref()
    }
}

impl Default for MethodSchema {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for MethodSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodSchema").finish_non_exhaustive()
    }
}

/// Concatenates collection batches in order.
pub(crate) fn flatten<I>(batches: Vec<Vec<I>>) -> Vec<I> {
    batches.into_iter().flatten().collect()
}

/// Parser for full-info sweeps, where each unit answers with one object.
pub(crate) fn single<T: DeserializeOwned>(
    value: serde_json::Value,
) -> Result<Vec<T>, serde_json::Error> {
    Ok(vec![serde_json::from_value(value)?])
}

/// Default attribute selection for `T`.
pub(crate) fn fields_of<T: V3Resource>() -> QueryParams {
    fields_params(T::FIELDS)
}

/// Extracts a non-empty identifier from an object about to be updated.
pub(crate) fn require_id<'a, I: AsRef<str>>(
    context: &str,
    id: Option<&'a I>,
) -> Result<&'a str, V3Error> {
    match id.map(AsRef::as_ref) {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(V3Error::usage(context, "identifier must be set")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, Endpoint, V3Config};
    use crate::rest::{ErrorKind, V3Transport};
    use crate::types::{PackageId, ServiceId};
    use tokio_util::sync::CancellationToken;

    fn transport() -> V3Transport {
        V3Transport::new(
            V3Config::builder()
                .access_token(AccessToken::new("token").unwrap())
                .endpoint(Endpoint::new("http://127.0.0.1:9/v3/rest").unwrap())
                .build()
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_unimplemented_schema_names_the_method() {
        let schema = MethodSchema::unimplemented();
        let ctx = CancellationToken::new();

        let err = schema
            .packages()
            .get_package(&ctx, &transport(), &PackageId::new("p"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotImplemented);
        assert_eq!(err.context(), "get_package");

        let err = schema
            .services()
            .count_services(&ctx, &transport(), &[])
            .await
            .unwrap_err();
        assert_eq!(err.context(), "count_services");

        let err = schema
            .service_cache()
            .get_service_cache(&ctx, &transport(), &ServiceId::new("s"))
            .await
            .unwrap_err();
        assert_eq!(err.context(), "get_service_cache");

        let err = schema
            .domains()
            .get_public_domains(&ctx, &transport())
            .await
            .unwrap_err();
        assert_eq!(err.context(), "get_public_domains");
    }

    #[test]
    fn test_standard_update_without_id_fails_before_io() {
        let schema = MethodSchema::standard();
        let err = tokio_test::block_on(schema.members().update_member(
            &CancellationToken::new(),
            &transport(),
            &crate::types::Member::default(),
        ))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UsageFault);
        assert_eq!(err.context(), "member");
    }

    #[test]
    fn test_require_id() {
        let id = PackageId::new("p1");
        assert_eq!(require_id("package", Some(&id)).unwrap(), "p1");

        let empty = PackageId::default();
        assert_eq!(
            require_id("package", Some(&empty)).unwrap_err().kind(),
            ErrorKind::UsageFault
        );
        assert!(require_id::<PackageId>("package", None).is_err());
    }

    #[test]
    fn test_single_wraps_one_object() {
        let endpoints = single::<crate::types::Endpoint>(serde_json::json!({"id": "e1"})).unwrap();
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].id.as_deref(), Some("e1"));

        assert!(single::<crate::types::Endpoint>(serde_json::json!([{"id": "e1"}])).is_err());
    }

    #[test]
    fn test_flatten_keeps_order() {
        assert_eq!(flatten(vec![vec![1, 2], vec![], vec![3]]), vec![1, 2, 3]);
    }
}
