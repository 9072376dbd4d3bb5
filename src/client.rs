//! Facade clients exposing the SDK's method surface.
//!
//! - [`PluggableClient`]: dispatches every call to a replaceable
//!   [`MethodSchema`]; used to assemble clients from independent method
//!   groups or to substitute test doubles
//! - [`FixedSchemaClient`]: the same surface with a registry that can no
//!   longer be replaced once built
//!
//! Both share one [`V3Transport`] across all calls. A call whose slot holds
//! no implementation fails with [`V3Error::NotImplemented`] without touching
//! the transport.
//!
//! # Example
//!
//! ```rust,ignore
//! use mashery_v3::{AccessToken, FixedSchemaClient, V3Config};
//! use mashery_v3::types::PackageId;
//! use tokio_util::sync::CancellationToken;
//!
//! let config = V3Config::builder()
//!     .access_token(AccessToken::new("token")?)
//!     .build()?;
//! let client = FixedSchemaClient::new(config);
//!
//! let ctx = CancellationToken::new();
//! let package = client.get_package(&ctx, &PackageId::new("p1")).await?;
//! ```

use std::ops::Deref;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::clients::HttpResponse;
use crate::config::V3Config;
use crate::methods::MethodSchema;
use crate::rest::{QueryParams, V3Error, V3Transport};
use crate::types::{
    AddressableV3Object, ApiMethod, Application, ApplicationId, EmailTemplateSet, Endpoint,
    EndpointIdent, EndpointMethodIdent, ErrorMessage, ErrorSet, ErrorSetIdent, Member, MemberId,
    OAuthSecurityProfile, Package, PackageId, PackageKey, PackageKeyId, Plan, PlanEndpointIdent,
    PlanIdent, PlanMethodFilterIdent, PlanMethodIdent, PlanServiceIdent, ResponseFilter,
    ResponseFilterIdent, Role, RoleId, RolePermission, Service, ServiceCache, ServiceId,
};

/// Facade client with a replaceable method registry.
///
/// Cloning the client shares its transport and method implementations.
///
/// # Thread Safety
///
/// `PluggableClient` is `Send + Sync`. The registry is replaced through
/// `&mut self`, so it cannot change while other tasks hold the client.
#[derive(Clone, Debug)]
pub struct PluggableClient {
    schema: MethodSchema,
    transport: Arc<V3Transport>,
}

/// Facade client whose method registry is fixed at construction.
///
/// Derefs to [`PluggableClient`] for the whole method surface.
#[derive(Clone, Debug)]
pub struct FixedSchemaClient {
    inner: PluggableClient,
}

// Verify facade types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PluggableClient>();
    assert_send_sync::<FixedSchemaClient>();
};

impl PluggableClient {
    /// Creates a client wired to the standard V3 implementation.
    #[must_use]
    pub fn new(config: V3Config) -> Self {
        Self::with_schema(config, MethodSchema::standard())
    }

    /// Creates a client dispatching to `schema`.
    #[must_use]
    pub fn with_schema(config: V3Config, schema: MethodSchema) -> Self {
        Self::from_transport(Arc::new(V3Transport::new(config)), schema)
    }

    /// Creates a client over an existing transport.
    #[must_use]
    pub const fn from_transport(transport: Arc<V3Transport>, schema: MethodSchema) -> Self {
        Self { schema, transport }
    }

    /// Replaces the method registry.
    pub fn assume_schema(&mut self, schema: MethodSchema) {
        self.schema = schema;
    }

    /// Returns the method registry.
    #[must_use]
    pub const fn schema(&self) -> &MethodSchema {
        &self.schema
    }

    /// Returns the shared transport.
    #[must_use]
    pub fn transport(&self) -> &V3Transport {
        &self.transport
    }

    // Applications

    /// Fetches an application.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::NotFound`] if the application does not exist.
    pub async fn get_application(
        &self,
        ctx: &CancellationToken,
        id: &ApplicationId,
    ) -> Result<Application, V3Error> {
        self.schema.applications().get_application(ctx, &self.transport, id).await
    }

    /// Fetches an application with its package keys.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::NotFound`] if the application does not exist.
    pub async fn get_full_application(
        &self,
        ctx: &CancellationToken,
        id: &ApplicationId,
    ) -> Result<Application, V3Error> {
        self.schema.applications().get_full_application(ctx, &self.transport, id).await
    }

    /// Creates an application owned by `member_id`.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn create_application(
        &self,
        ctx: &CancellationToken,
        member_id: &MemberId,
        application: &Application,
    ) -> Result<Application, V3Error> {
        self.schema
            .applications()
            .create_application(ctx, &self.transport, member_id, application)
            .await
    }

    /// Updates an application.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Usage`] if the application carries no identifier.
    pub async fn update_application(
        &self,
        ctx: &CancellationToken,
        application: &Application,
    ) -> Result<Application, V3Error> {
        self.schema.applications().update_application(ctx, &self.transport, application).await
    }

    /// Deletes an application.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn delete_application(
        &self,
        ctx: &CancellationToken,
        id: &ApplicationId,
    ) -> Result<(), V3Error> {
        self.schema.applications().delete_application(ctx, &self.transport, id).await
    }

    /// Lists all applications.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any page fails.
    pub async fn list_applications(
        &self,
        ctx: &CancellationToken,
    ) -> Result<Vec<Application>, V3Error> {
        self.schema.applications().list_applications(ctx, &self.transport).await
    }

    /// Lists the applications of a member.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any page fails.
    pub async fn list_applications_of_member(
        &self,
        ctx: &CancellationToken,
        member_id: &MemberId,
    ) -> Result<Vec<Application>, V3Error> {
        self.schema
            .applications()
            .list_applications_of_member(ctx, &self.transport, member_id)
            .await
    }

    /// Counts the applications of a member.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn count_applications_of_member(
        &self,
        ctx: &CancellationToken,
        member_id: &MemberId,
    ) -> Result<u64, V3Error> {
        self.schema
            .applications()
            .count_applications_of_member(ctx, &self.transport, member_id)
            .await
    }

    /// Lists the package keys of an application.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any page fails.
    pub async fn list_application_package_keys(
        &self,
        ctx: &CancellationToken,
        id: &ApplicationId,
    ) -> Result<Vec<PackageKey>, V3Error> {
        self.schema
            .applications()
            .list_application_package_keys(ctx, &self.transport, id)
            .await
    }

    /// Counts the package keys of an application.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn count_application_package_keys(
        &self,
        ctx: &CancellationToken,
        id: &ApplicationId,
    ) -> Result<u64, V3Error> {
        self.schema
            .applications()
            .count_application_package_keys(ctx, &self.transport, id)
            .await
    }

    // Packages

    /// Fetches a package.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::NotFound`] if the package does not exist.
    pub async fn get_package(
        &self,
        ctx: &CancellationToken,
        id: &PackageId,
    ) -> Result<Package, V3Error> {
        self.schema.packages().get_package(ctx, &self.transport, id).await
    }

    /// Creates a package.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn create_package(
        &self,
        ctx: &CancellationToken,
        package: &Package,
    ) -> Result<Package, V3Error> {
        self.schema.packages().create_package(ctx, &self.transport, package).await
    }

    /// Updates a package.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Usage`] if the package carries no identifier.
    pub async fn update_package(
        &self,
        ctx: &CancellationToken,
        package: &Package,
    ) -> Result<Package, V3Error> {
        self.schema.packages().update_package(ctx, &self.transport, package).await
    }

    /// Deletes a package.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn delete_package(
        &self,
        ctx: &CancellationToken,
        id: &PackageId,
    ) -> Result<(), V3Error> {
        self.schema.packages().delete_package(ctx, &self.transport, id).await
    }

    /// Lists all packages.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any page fails.
    pub async fn list_packages(&self, ctx: &CancellationToken) -> Result<Vec<Package>, V3Error> {
        self.schema.packages().list_packages(ctx, &self.transport).await
    }

    /// Lists packages matching `filters`, returning only `fields`.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any page fails.
    pub async fn list_packages_filtered(
        &self,
        ctx: &CancellationToken,
        filters: &[(&str, &str)],
        fields: &[&str],
    ) -> Result<Vec<Package>, V3Error> {
        self.schema
            .packages()
            .list_packages_filtered(ctx, &self.transport, filters, fields)
            .await
    }

    // Plans

    /// Fetches a plan.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::NotFound`] if the plan does not exist.
    pub async fn get_plan(
        &self,
        ctx: &CancellationToken,
        ident: &PlanIdent,
    ) -> Result<Plan, V3Error> {
        self.schema.plans().get_plan(ctx, &self.transport, ident).await
    }

    /// Creates a plan in a package.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn create_plan(
        &self,
        ctx: &CancellationToken,
        package_id: &PackageId,
        plan: &Plan,
    ) -> Result<Plan, V3Error> {
        self.schema.plans().create_plan(ctx, &self.transport, package_id, plan).await
    }

    /// Updates a plan of a package.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Usage`] if the plan carries no identifier.
    pub async fn update_plan(
        &self,
        ctx: &CancellationToken,
        package_id: &PackageId,
        plan: &Plan,
    ) -> Result<Plan, V3Error> {
        self.schema.plans().update_plan(ctx, &self.transport, package_id, plan).await
    }

    /// Deletes a plan.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn delete_plan(
        &self,
        ctx: &CancellationToken,
        ident: &PlanIdent,
    ) -> Result<(), V3Error> {
        self.schema.plans().delete_plan(ctx, &self.transport, ident).await
    }

    /// Lists the plans of a package.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any page fails.
    pub async fn list_plans(
        &self,
        ctx: &CancellationToken,
        package_id: &PackageId,
    ) -> Result<Vec<Plan>, V3Error> {
        self.schema.plans().list_plans(ctx, &self.transport, package_id).await
    }

    /// Lists the plans of several packages, one request per package.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any package fails.
    pub async fn list_plans_of_packages(
        &self,
        ctx: &CancellationToken,
        package_ids: &[PackageId],
    ) -> Result<Vec<Plan>, V3Error> {
        self.schema
            .plans()
            .list_plans_of_packages(ctx, &self.transport, package_ids)
            .await
    }

    /// Counts the plans of a package.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn count_plans(
        &self,
        ctx: &CancellationToken,
        package_id: &PackageId,
    ) -> Result<u64, V3Error> {
        self.schema.plans().count_plans(ctx, &self.transport, package_id).await
    }

    /// Lists the services included in a plan.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any page fails.
    pub async fn list_plan_services(
        &self,
        ctx: &CancellationToken,
        ident: &PlanIdent,
    ) -> Result<Vec<Service>, V3Error> {
        self.schema.plans().list_plan_services(ctx, &self.transport, ident).await
    }

    /// Counts the services included in a plan.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn count_plan_services(
        &self,
        ctx: &CancellationToken,
        ident: &PlanIdent,
    ) -> Result<u64, V3Error> {
        self.schema.plans().count_plan_services(ctx, &self.transport, ident).await
    }

    /// Includes a service in a plan.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn create_plan_service(
        &self,
        ctx: &CancellationToken,
        ident: &PlanServiceIdent,
    ) -> Result<AddressableV3Object, V3Error> {
        self.schema.plans().create_plan_service(ctx, &self.transport, ident).await
    }

    /// Removes a service from a plan.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn delete_plan_service(
        &self,
        ctx: &CancellationToken,
        ident: &PlanServiceIdent,
    ) -> Result<(), V3Error> {
        self.schema.plans().delete_plan_service(ctx, &self.transport, ident).await
    }

    /// Returns `true` if a plan includes a service.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn check_plan_service_exists(
        &self,
        ctx: &CancellationToken,
        ident: &PlanServiceIdent,
    ) -> Result<bool, V3Error> {
        self.schema.plans().check_plan_service_exists(ctx, &self.transport, ident).await
    }

    /// Lists the endpoints a plan includes for one of its services.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any page fails.
    pub async fn list_plan_endpoints(
        &self,
        ctx: &CancellationToken,
        ident: &PlanServiceIdent,
    ) -> Result<Vec<AddressableV3Object>, V3Error> {
        self.schema.plans().list_plan_endpoints(ctx, &self.transport, ident).await
    }

    /// Counts the endpoints a plan includes for one of its services.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn count_plan_endpoints(
        &self,
        ctx: &CancellationToken,
        ident: &PlanServiceIdent,
    ) -> Result<u64, V3Error> {
        self.schema.plans().count_plan_endpoints(ctx, &self.transport, ident).await
    }

    /// Includes an endpoint in a plan.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn create_plan_endpoint(
        &self,
        ctx: &CancellationToken,
        ident: &PlanEndpointIdent,
    ) -> Result<AddressableV3Object, V3Error> {
        self.schema.plans().create_plan_endpoint(ctx, &self.transport, ident).await
    }

    /// Removes an endpoint from a plan.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn delete_plan_endpoint(
        &self,
        ctx: &CancellationToken,
        ident: &PlanEndpointIdent,
    ) -> Result<(), V3Error> {
        self.schema.plans().delete_plan_endpoint(ctx, &self.transport, ident).await
    }

    /// Returns `true` if a plan includes an endpoint.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn check_plan_endpoint_exists(
        &self,
        ctx: &CancellationToken,
        ident: &PlanEndpointIdent,
    ) -> Result<bool, V3Error> {
        self.schema.plans().check_plan_endpoint_exists(ctx, &self.transport, ident).await
    }

    /// Lists the endpoint methods a plan grants.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any page or unit fails.
    pub async fn list_plan_methods(
        &self,
        ctx: &CancellationToken,
        ident: &PlanEndpointIdent,
    ) -> Result<Vec<ApiMethod>, V3Error> {
        self.schema.plans().list_plan_methods(ctx, &self.transport, ident).await
    }

    /// Fetches an endpoint method granted by a plan.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::NotFound`] if the method does not exist.
    pub async fn get_plan_method(
        &self,
        ctx: &CancellationToken,
        ident: &PlanMethodIdent,
    ) -> Result<ApiMethod, V3Error> {
        self.schema.plans().get_plan_method(ctx, &self.transport, ident).await
    }

    /// Grants an endpoint method in a plan.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn create_plan_method(
        &self,
        ctx: &CancellationToken,
        ident: &PlanMethodIdent,
    ) -> Result<ApiMethod, V3Error> {
        self.schema.plans().create_plan_method(ctx, &self.transport, ident).await
    }

    /// Revokes an endpoint method from a plan.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn delete_plan_method(
        &self,
        ctx: &CancellationToken,
        ident: &PlanMethodIdent,
    ) -> Result<(), V3Error> {
        self.schema.plans().delete_plan_method(ctx, &self.transport, ident).await
    }

    /// Fetches the response filter applied to a plan method.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::NotFound`] if the filter does not exist.
    pub async fn get_plan_method_filter(
        &self,
        ctx: &CancellationToken,
        ident: &PlanMethodIdent,
    ) -> Result<ResponseFilter, V3Error> {
        self.schema.plans().get_plan_method_filter(ctx, &self.transport, ident).await
    }

    /// Applies a response filter to a plan method.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn create_plan_method_filter(
        &self,
        ctx: &CancellationToken,
        ident: &PlanMethodFilterIdent,
    ) -> Result<ResponseFilter, V3Error> {
        self.schema.plans().create_plan_method_filter(ctx, &self.transport, ident).await
    }

    /// Removes the response filter of a plan method.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn delete_plan_method_filter(
        &self,
        ctx: &CancellationToken,
        ident: &PlanMethodIdent,
    ) -> Result<(), V3Error> {
        self.schema.plans().delete_plan_method_filter(ctx, &self.transport, ident).await
    }

    // Package keys

    /// Fetches a package key.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::NotFound`] if the key does not exist.
    pub async fn get_package_key(
        &self,
        ctx: &CancellationToken,
        id: &PackageKeyId,
    ) -> Result<PackageKey, V3Error> {
        self.schema.package_keys().get_package_key(ctx, &self.transport, id).await
    }

    /// Issues a package key to an application.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Usage`] if the key does not name both a package and a plan.
    pub async fn create_package_key(
        &self,
        ctx: &CancellationToken,
        application_id: &ApplicationId,
        key: &PackageKey,
    ) -> Result<PackageKey, V3Error> {
        self.schema
            .package_keys()
            .create_package_key(ctx, &self.transport, application_id, key)
            .await
    }

    /// Updates a package key.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Usage`] if the key carries no identifier.
    pub async fn update_package_key(
        &self,
        ctx: &CancellationToken,
        key: &PackageKey,
    ) -> Result<PackageKey, V3Error> {
        self.schema.package_keys().update_package_key(ctx, &self.transport, key).await
    }

    /// Deletes a package key.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn delete_package_key(
        &self,
        ctx: &CancellationToken,
        id: &PackageKeyId,
    ) -> Result<(), V3Error> {
        self.schema.package_keys().delete_package_key(ctx, &self.transport, id).await
    }

    /// Lists all package keys.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any page fails.
    pub async fn list_package_keys(
        &self,
        ctx: &CancellationToken,
    ) -> Result<Vec<PackageKey>, V3Error> {
        self.schema.package_keys().list_package_keys(ctx, &self.transport).await
    }

    /// Lists package keys matching `filters`, returning only `fields`.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any page fails.
    pub async fn list_package_keys_filtered(
        &self,
        ctx: &CancellationToken,
        filters: &[(&str, &str)],
        fields: &[&str],
    ) -> Result<Vec<PackageKey>, V3Error> {
        self.schema
            .package_keys()
            .list_package_keys_filtered(ctx, &self.transport, filters, fields)
            .await
    }

    // Members

    /// Fetches a member.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::NotFound`] if the member does not exist.
    pub async fn get_member(
        &self,
        ctx: &CancellationToken,
        id: &MemberId,
    ) -> Result<Member, V3Error> {
        self.schema.members().get_member(ctx, &self.transport, id).await
    }

    /// Fetches a member with its applications, package keys and roles.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::NotFound`] if the member does not exist.
    pub async fn get_full_member(
        &self,
        ctx: &CancellationToken,
        id: &MemberId,
    ) -> Result<Member, V3Error> {
        self.schema.members().get_full_member(ctx, &self.transport, id).await
    }

    /// Creates a member.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn create_member(
        &self,
        ctx: &CancellationToken,
        member: &Member,
    ) -> Result<Member, V3Error> {
        self.schema.members().create_member(ctx, &self.transport, member).await
    }

    /// Updates a member.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Usage`] if the member carries no identifier.
    pub async fn update_member(
        &self,
        ctx: &CancellationToken,
        member: &Member,
    ) -> Result<Member, V3Error> {
        self.schema.members().update_member(ctx, &self.transport, member).await
    }

    /// Deletes a member.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn delete_member(
        &self,
        ctx: &CancellationToken,
        id: &MemberId,
    ) -> Result<(), V3Error> {
        self.schema.members().delete_member(ctx, &self.transport, id).await
    }

    /// Lists all members.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any page fails.
    pub async fn list_members(&self, ctx: &CancellationToken) -> Result<Vec<Member>, V3Error> {
        self.schema.members().list_members(ctx, &self.transport).await
    }

    // Roles

    /// Fetches a role.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::NotFound`] if the role does not exist.
    pub async fn get_role(&self, ctx: &CancellationToken, id: &RoleId) -> Result<Role, V3Error> {
        self.schema.roles().get_role(ctx, &self.transport, id).await
    }

    /// Lists all roles.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any page fails.
    pub async fn list_roles(&self, ctx: &CancellationToken) -> Result<Vec<Role>, V3Error> {
        self.schema.roles().list_roles(ctx, &self.transport).await
    }

    /// Lists roles matching `filters`, returning only `fields`.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any page fails.
    pub async fn list_roles_filtered(
        &self,
        ctx: &CancellationToken,
        filters: &[(&str, &str)],
        fields: &[&str],
    ) -> Result<Vec<Role>, V3Error> {
        self.schema
            .roles()
            .list_roles_filtered(ctx, &self.transport, filters, fields)
            .await
    }

    // Services

    /// Fetches a service.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::NotFound`] if the service does not exist.
    pub async fn get_service(
        &self,
        ctx: &CancellationToken,
        id: &ServiceId,
    ) -> Result<Service, V3Error> {
        self.schema.services().get_service(ctx, &self.transport, id).await
    }

    /// Creates a service.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn create_service(
        &self,
        ctx: &CancellationToken,
        service: &Service,
    ) -> Result<Service, V3Error> {
        self.schema.services().create_service(ctx, &self.transport, service).await
    }

    /// Updates a service.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Usage`] if the service carries no identifier.
    pub async fn update_service(
        &self,
        ctx: &CancellationToken,
        service: &Service,
    ) -> Result<Service, V3Error> {
        self.schema.services().update_service(ctx, &self.transport, service).await
    }

    /// Deletes a service.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn delete_service(
        &self,
        ctx: &CancellationToken,
        id: &ServiceId,
    ) -> Result<(), V3Error> {
        self.schema.services().delete_service(ctx, &self.transport, id).await
    }

    /// Lists all services.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any page fails.
    pub async fn list_services(&self, ctx: &CancellationToken) -> Result<Vec<Service>, V3Error> {
        self.schema.services().list_services(ctx, &self.transport).await
    }

    /// Lists services matching `filters`, returning only `fields`.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any page fails.
    pub async fn list_services_filtered(
        &self,
        ctx: &CancellationToken,
        filters: &[(&str, &str)],
        fields: &[&str],
    ) -> Result<Vec<Service>, V3Error> {
        self.schema
            .services()
            .list_services_filtered(ctx, &self.transport, filters, fields)
            .await
    }

    /// Counts services matching `filters`.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn count_services(
        &self,
        ctx: &CancellationToken,
        filters: &[(&str, &str)],
    ) -> Result<u64, V3Error> {
        self.schema.services().count_services(ctx, &self.transport, filters).await
    }

    /// Returns the roles granted on a service.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn get_service_roles(
        &self,
        ctx: &CancellationToken,
        id: &ServiceId,
    ) -> Result<Vec<RolePermission>, V3Error> {
        self.schema.services().get_service_roles(ctx, &self.transport, id).await
    }

    /// Replaces the roles granted on a service.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn set_service_roles(
        &self,
        ctx: &CancellationToken,
        id: &ServiceId,
        roles: &[RolePermission],
    ) -> Result<Vec<RolePermission>, V3Error> {
        self.schema.services().set_service_roles(ctx, &self.transport, id, roles).await
    }

    /// Revokes every role granted on a service.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn delete_service_roles(
        &self,
        ctx: &CancellationToken,
        id: &ServiceId,
    ) -> Result<(), V3Error> {
        self.schema.services().delete_service_roles(ctx, &self.transport, id).await
    }

    // Endpoints

    /// Fetches an endpoint with its full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::NotFound`] if the endpoint does not exist.
    pub async fn get_endpoint(
        &self,
        ctx: &CancellationToken,
        ident: &EndpointIdent,
    ) -> Result<Endpoint, V3Error> {
        self.schema.endpoints().get_endpoint(ctx, &self.transport, ident).await
    }

    /// Creates an endpoint in a service.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn create_endpoint(
        &self,
        ctx: &CancellationToken,
        service_id: &ServiceId,
        endpoint: &Endpoint,
    ) -> Result<Endpoint, V3Error> {
        self.schema
            .endpoints()
            .create_endpoint(ctx, &self.transport, service_id, endpoint)
            .await
    }

    /// Updates an endpoint of a service.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Usage`] if the endpoint carries no identifier.
    pub async fn update_endpoint(
        &self,
        ctx: &CancellationToken,
        service_id: &ServiceId,
        endpoint: &Endpoint,
    ) -> Result<Endpoint, V3Error> {
        self.schema
            .endpoints()
            .update_endpoint(ctx, &self.transport, service_id, endpoint)
            .await
    }

    /// Deletes an endpoint.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn delete_endpoint(
        &self,
        ctx: &CancellationToken,
        ident: &EndpointIdent,
    ) -> Result<(), V3Error> {
        self.schema.endpoints().delete_endpoint(ctx, &self.transport, ident).await
    }

    /// Lists the endpoints of a service by identity only.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any page fails.
    pub async fn list_endpoints(
        &self,
        ctx: &CancellationToken,
        service_id: &ServiceId,
    ) -> Result<Vec<AddressableV3Object>, V3Error> {
        self.schema.endpoints().list_endpoints(ctx, &self.transport, service_id).await
    }

    /// Lists the endpoints of a service with their full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if the listing or any endpoint fetch fails.
    pub async fn list_endpoints_with_full_info(
        &self,
        ctx: &CancellationToken,
        service_id: &ServiceId,
    ) -> Result<Vec<Endpoint>, V3Error> {
        self.schema
            .endpoints()
            .list_endpoints_with_full_info(ctx, &self.transport, service_id)
            .await
    }

    /// Counts the endpoints of a service.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn count_endpoints(
        &self,
        ctx: &CancellationToken,
        service_id: &ServiceId,
    ) -> Result<u64, V3Error> {
        self.schema.endpoints().count_endpoints(ctx, &self.transport, service_id).await
    }

    // Service cache

    /// Fetches the cache settings of a service.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::NotFound`] if caching is not configured.
    pub async fn get_service_cache(
        &self,
        ctx: &CancellationToken,
        id: &ServiceId,
    ) -> Result<ServiceCache, V3Error> {
        self.schema.service_cache().get_service_cache(ctx, &self.transport, id).await
    }

    /// Enables caching for a service.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn create_service_cache(
        &self,
        ctx: &CancellationToken,
        id: &ServiceId,
        cache: &ServiceCache,
    ) -> Result<ServiceCache, V3Error> {
        self.schema
            .service_cache()
            .create_service_cache(ctx, &self.transport, id, cache)
            .await
    }

    /// Changes the cache settings of a service.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn update_service_cache(
        &self,
        ctx: &CancellationToken,
        id: &ServiceId,
        cache: &ServiceCache,
    ) -> Result<ServiceCache, V3Error> {
        self.schema
            .service_cache()
            .update_service_cache(ctx, &self.transport, id, cache)
            .await
    }

    /// Disables caching for a service.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn delete_service_cache(
        &self,
        ctx: &CancellationToken,
        id: &ServiceId,
    ) -> Result<(), V3Error> {
        self.schema.service_cache().delete_service_cache(ctx, &self.transport, id).await
    }

    // OAuth security profile

    /// Fetches the OAuth profile of a service.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::NotFound`] if OAuth is not configured.
    pub async fn get_oauth_security_profile(
        &self,
        ctx: &CancellationToken,
        id: &ServiceId,
    ) -> Result<OAuthSecurityProfile, V3Error> {
        self.schema
            .security_profiles()
            .get_oauth_security_profile(ctx, &self.transport, id)
            .await
    }

    /// Enables OAuth for a service.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn create_oauth_security_profile(
        &self,
        ctx: &CancellationToken,
        id: &ServiceId,
        profile: &OAuthSecurityProfile,
    ) -> Result<OAuthSecurityProfile, V3Error> {
        self.schema
            .security_profiles()
            .create_oauth_security_profile(ctx, &self.transport, id, profile)
            .await
    }

    /// Changes the OAuth profile of a service.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn update_oauth_security_profile(
        &self,
        ctx: &CancellationToken,
        id: &ServiceId,
        profile: &OAuthSecurityProfile,
    ) -> Result<OAuthSecurityProfile, V3Error> {
        self.schema
            .security_profiles()
            .update_oauth_security_profile(ctx, &self.transport, id, profile)
            .await
    }

    /// Disables OAuth for a service.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn delete_oauth_security_profile(
        &self,
        ctx: &CancellationToken,
        id: &ServiceId,
    ) -> Result<(), V3Error> {
        self.schema
            .security_profiles()
            .delete_oauth_security_profile(ctx, &self.transport, id)
            .await
    }

    // Endpoint methods

    /// Fetches an endpoint method with its sample responses.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::NotFound`] if the method does not exist.
    pub async fn get_endpoint_method(
        &self,
        ctx: &CancellationToken,
        ident: &EndpointMethodIdent,
    ) -> Result<ApiMethod, V3Error> {
        self.schema.endpoint_methods().get_endpoint_method(ctx, &self.transport, ident).await
    }

    /// Creates a method on an endpoint.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn create_endpoint_method(
        &self,
        ctx: &CancellationToken,
        endpoint: &EndpointIdent,
        method: &ApiMethod,
    ) -> Result<ApiMethod, V3Error> {
        self.schema
            .endpoint_methods()
            .create_endpoint_method(ctx, &self.transport, endpoint, method)
            .await
    }

    /// Updates an endpoint method.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Usage`] if the method carries no identifier.
    pub async fn update_endpoint_method(
        &self,
        ctx: &CancellationToken,
        endpoint: &EndpointIdent,
        method: &ApiMethod,
    ) -> Result<ApiMethod, V3Error> {
        self.schema
            .endpoint_methods()
            .update_endpoint_method(ctx, &self.transport, endpoint, method)
            .await
    }

    /// Deletes an endpoint method.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn delete_endpoint_method(
        &self,
        ctx: &CancellationToken,
        ident: &EndpointMethodIdent,
    ) -> Result<(), V3Error> {
        self.schema.endpoint_methods().delete_endpoint_method(ctx, &self.transport, ident).await
    }

    /// Lists the methods of an endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any page or unit fails.
    pub async fn list_endpoint_methods(
        &self,
        ctx: &CancellationToken,
        endpoint: &EndpointIdent,
    ) -> Result<Vec<ApiMethod>, V3Error> {
        self.schema.endpoint_methods().list_endpoint_methods(ctx, &self.transport, endpoint).await
    }

    /// Lists the methods of an endpoint, fetching each one with its sample
    /// responses.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any page or unit fails.
    pub async fn list_endpoint_methods_with_full_info(
        &self,
        ctx: &CancellationToken,
        endpoint: &EndpointIdent,
    ) -> Result<Vec<ApiMethod>, V3Error> {
        self.schema
            .endpoint_methods()
            .list_endpoint_methods_with_full_info(ctx, &self.transport, endpoint)
            .await
    }

    /// Counts the methods of an endpoint.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn count_endpoint_methods(
        &self,
        ctx: &CancellationToken,
        endpoint: &EndpointIdent,
    ) -> Result<u64, V3Error> {
        self.schema.endpoint_methods().count_endpoint_methods(ctx, &self.transport, endpoint).await
    }

    // Response filters

    /// Fetches a response filter with its field lists.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::NotFound`] if the filter does not exist.
    pub async fn get_response_filter(
        &self,
        ctx: &CancellationToken,
        ident: &ResponseFilterIdent,
    ) -> Result<ResponseFilter, V3Error> {
        self.schema.response_filters().get_response_filter(ctx, &self.transport, ident).await
    }

    /// Creates a response filter on an endpoint method.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn create_response_filter(
        &self,
        ctx: &CancellationToken,
        method: &EndpointMethodIdent,
        filter: &ResponseFilter,
    ) -> Result<ResponseFilter, V3Error> {
        self.schema
            .response_filters()
            .create_response_filter(ctx, &self.transport, method, filter)
            .await
    }

    /// Updates a response filter.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Usage`] if the filter carries no identifier.
    pub async fn update_response_filter(
        &self,
        ctx: &CancellationToken,
        method: &EndpointMethodIdent,
        filter: &ResponseFilter,
    ) -> Result<ResponseFilter, V3Error> {
        self.schema
            .response_filters()
            .update_response_filter(ctx, &self.transport, method, filter)
            .await
    }

    /// Deletes a response filter.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn delete_response_filter(
        &self,
        ctx: &CancellationToken,
        ident: &ResponseFilterIdent,
    ) -> Result<(), V3Error> {
        self.schema.response_filters().delete_response_filter(ctx, &self.transport, ident).await
    }

    /// Lists the response filters of an endpoint method.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any page or unit fails.
    pub async fn list_response_filters(
        &self,
        ctx: &CancellationToken,
        method: &EndpointMethodIdent,
    ) -> Result<Vec<ResponseFilter>, V3Error> {
        self.schema.response_filters().list_response_filters(ctx, &self.transport, method).await
    }

    /// Lists the response filters of an endpoint method, fetching each one
    /// with its field lists.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any page or unit fails.
    pub async fn list_response_filters_with_full_info(
        &self,
        ctx: &CancellationToken,
        method: &EndpointMethodIdent,
    ) -> Result<Vec<ResponseFilter>, V3Error> {
        self.schema
            .response_filters()
            .list_response_filters_with_full_info(ctx, &self.transport, method)
            .await
    }

    /// Counts the response filters of an endpoint method.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn count_response_filters(
        &self,
        ctx: &CancellationToken,
        method: &EndpointMethodIdent,
    ) -> Result<u64, V3Error> {
        self.schema.response_filters().count_response_filters(ctx, &self.transport, method).await
    }

    // Error sets

    /// Lists the error sets of a service.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any page or unit fails.
    pub async fn list_error_sets(
        &self,
        ctx: &CancellationToken,
        service_id: &ServiceId,
        query: &QueryParams,
    ) -> Result<Vec<ErrorSet>, V3Error> {
        self.schema.error_sets().list_error_sets(ctx, &self.transport, service_id, query).await
    }

    /// Fetches an error set with its messages.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::NotFound`] if the error set does not exist.
    pub async fn get_error_set(
        &self,
        ctx: &CancellationToken,
        ident: &ErrorSetIdent,
    ) -> Result<ErrorSet, V3Error> {
        self.schema.error_sets().get_error_set(ctx, &self.transport, ident).await
    }

    /// Creates an error set in a service.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn create_error_set(
        &self,
        ctx: &CancellationToken,
        service_id: &ServiceId,
        set: &ErrorSet,
    ) -> Result<ErrorSet, V3Error> {
        self.schema.error_sets().create_error_set(ctx, &self.transport, service_id, set).await
    }

    /// Updates an error set.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Usage`] if the set carries no identifier.
    pub async fn update_error_set(
        &self,
        ctx: &CancellationToken,
        service_id: &ServiceId,
        set: &ErrorSet,
    ) -> Result<ErrorSet, V3Error> {
        self.schema.error_sets().update_error_set(ctx, &self.transport, service_id, set).await
    }

    /// Deletes an error set.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn delete_error_set(
        &self,
        ctx: &CancellationToken,
        ident: &ErrorSetIdent,
    ) -> Result<(), V3Error> {
        self.schema.error_sets().delete_error_set(ctx, &self.transport, ident).await
    }

    /// Replaces one message of an error set.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Usage`] if the message carries no identifier.
    pub async fn update_error_set_message(
        &self,
        ctx: &CancellationToken,
        ident: &ErrorSetIdent,
        message: &ErrorMessage,
    ) -> Result<ErrorMessage, V3Error> {
        self.schema
            .error_sets()
            .update_error_set_message(ctx, &self.transport, ident, message)
            .await
    }

    // Email template sets

    /// Fetches an email template set.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::NotFound`] if the template set does not exist.
    pub async fn get_email_template_set(
        &self,
        ctx: &CancellationToken,
        id: &str,
    ) -> Result<EmailTemplateSet, V3Error> {
        self.schema.email_templates().get_email_template_set(ctx, &self.transport, id).await
    }

    /// Lists all email template sets.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any page or unit fails.
    pub async fn list_email_template_sets(
        &self,
        ctx: &CancellationToken,
    ) -> Result<Vec<EmailTemplateSet>, V3Error> {
        self.schema.email_templates().list_email_template_sets(ctx, &self.transport).await
    }

    /// Lists the email template sets matching `filters`.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Pagination`] if any page or unit fails.
    pub async fn list_email_template_sets_filtered(
        &self,
        ctx: &CancellationToken,
        filters: &[(&str, &str)],
        fields: &[&str],
    ) -> Result<Vec<EmailTemplateSet>, V3Error> {
        self.schema
            .email_templates()
            .list_email_template_sets_filtered(ctx, &self.transport, filters, fields)
            .await
    }

    // Domains

    /// Returns the public host names of the area.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn get_public_domains(
        &self,
        ctx: &CancellationToken,
    ) -> Result<Vec<String>, V3Error> {
        self.schema.domains().get_public_domains(ctx, &self.transport).await
    }

    /// Returns the system host names of the area.
    ///
    /// # Errors
    ///
    /// Returns the errors of the registered implementation.
    pub async fn get_system_domains(
        &self,
        ctx: &CancellationToken,
    ) -> Result<Vec<String>, V3Error> {
        self.schema.domains().get_system_domains(ctx, &self.transport).await
    }

    // Untyped access

    /// Sends a GET to a resource the SDK does not model.
    ///
    /// # Errors
    ///
    /// Returns the exchange errors of [`V3Transport::fetch_any`].
    pub async fn fetch_any(
        &self,
        ctx: &CancellationToken,
        resource: &str,
        query: &QueryParams,
    ) -> Result<HttpResponse, V3Error> {
        self.transport.fetch_any(ctx, resource, query).await
    }

    /// Sends a POST to a resource the SDK does not model.
    ///
    /// # Errors
    ///
    /// Returns the exchange errors of [`V3Transport::post_any`].
    pub async fn post_any(
        &self,
        ctx: &CancellationToken,
        resource: &str,
        body: serde_json::Value,
    ) -> Result<HttpResponse, V3Error> {
        self.transport.post_any(ctx, resource, body).await
    }

    /// Sends a PUT to a resource the SDK does not model.
    ///
    /// # Errors
    ///
    /// Returns the exchange errors of [`V3Transport::put_any`].
    pub async fn put_any(
        &self,
        ctx: &CancellationToken,
        resource: &str,
        body: serde_json::Value,
    ) -> Result<HttpResponse, V3Error> {
        self.transport.put_any(ctx, resource, body).await
    }

    /// Sends a DELETE to a resource the SDK does not model.
    ///
    /// # Errors
    ///
    /// Returns the exchange errors of [`V3Transport::delete_any`].
    pub async fn delete_any(
        &self,
        ctx: &CancellationToken,
        resource: &str,
    ) -> Result<HttpResponse, V3Error> {
        self.transport.delete_any(ctx, resource).await
    }
}

impl FixedSchemaClient {
    /// Creates a client wired to the standard V3 implementation.
    #[must_use]
    pub fn new(config: V3Config) -> Self {
        Self::from(PluggableClient::new(config))
    }

    /// Creates a client fixed to `schema`.
    #[must_use]
    pub fn with_schema(config: V3Config, schema: MethodSchema) -> Self {
        Self::from(PluggableClient::with_schema(config, schema))
    }

    /// Always fails; the registry of a fixed client cannot be replaced.
    ///
    /// # Errors
    ///
    /// Returns [`V3Error::Usage`] and leaves the registry unchanged.
    pub fn assume_schema(&mut self, _schema: MethodSchema) -> Result<(), V3Error> {
        tracing::warn!("attempt to replace the method schema of a fixed client");
        Err(V3Error::usage(
            "assume_schema",
            "the method schema of a fixed client cannot be replaced",
        ))
    }
}

impl From<PluggableClient> for FixedSchemaClient {
    fn from(inner: PluggableClient) -> Self {
        Self { inner }
    }
}

impl Deref for FixedSchemaClient {
    type Target = PluggableClient;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccessToken, Endpoint as ApiEndpoint};
    use crate::rest::ErrorKind;

    fn config() -> V3Config {
        V3Config::builder()
            .access_token(AccessToken::new("token").unwrap())
            .endpoint(ApiEndpoint::new("http://127.0.0.1:9/v3/rest").unwrap())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_pluggable_client_replaces_schema() {
        let mut client = PluggableClient::new(config());
        client.assume_schema(MethodSchema::unimplemented());

        let err = client
            .list_members(&CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotImplemented);
        assert_eq!(err.context(), "list_members");
    }

    #[tokio::test]
    async fn test_fixed_client_rejects_new_schema() {
        let mut client = FixedSchemaClient::with_schema(config(), MethodSchema::unimplemented());
        let err = client.assume_schema(MethodSchema::standard()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UsageFault);

        let err = client
            .get_role(&CancellationToken::new(), &RoleId::new("r"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotImplemented);
    }

    #[test]
    fn test_clones_share_transport() {
        let client = PluggableClient::new(config());
        let copy = client.clone();
        assert!(std::ptr::eq(client.transport(), copy.transport()));
    }
}
