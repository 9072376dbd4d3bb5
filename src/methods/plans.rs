use async_trait::async_trait;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use super::{fields_of, flatten, require_id, V3Methods};
use crate::rest::{build_path, fields_params, FetchSpec, Pagination, V3Error, V3Transport};
use crate::types::{
    AddressableV3Object, ApiMethod, PackageId, Plan, PlanEndpointIdent, PlanIdent,
    PlanMethodFilterIdent, PlanMethodIdent, PlanServiceIdent, ResponseFilter, Service, V3Resource,
    RESPONSE_FILTER_FULL_FIELDS,
};

const PLAN_SERVICE: &str = "plan service";
const PLAN_SERVICES: &str = "plan services";
const PLAN_ENDPOINT: &str = "plan endpoint";
const PLAN_ENDPOINTS: &str = "plan endpoints";
const PLAN_METHOD: &str = "plan method";
const PLAN_METHODS: &str = "plan methods";
const PLAN_METHOD_FILTER: &str = "plan method filter";
const REFERENCE_FIELDS: &[&str] = &["id", "name", "created", "updated"];

/// Plan operations, including the services and endpoints a plan grants.
#[async_trait]
pub trait PlanMethods: Send + Sync {
    /// Fetches a plan.
    async fn get_plan(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &PlanIdent,
    ) -> Result<Plan, V3Error> {
        Err(V3Error::not_implemented("get_plan"))
    }

    /// Creates a plan in a package.
    async fn create_plan(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _package_id: &PackageId,
        _plan: &Plan,
    ) -> Result<Plan, V3Error> {
        Err(V3Error::not_implemented("create_plan"))
    }

    /// Updates a plan of a package. The plan must carry its identifier.
    async fn update_plan(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _package_id: &PackageId,
        _plan: &Plan,
    ) -> Result<Plan, V3Error> {
        Err(V3Error::not_implemented("update_plan"))
    }

    /// Deletes a plan.
    async fn delete_plan(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &PlanIdent,
    ) -> Result<(), V3Error> {
        Err(V3Error::not_implemented("delete_plan"))
    }

    /// Lists the plans of a package.
    async fn list_plans(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _package_id: &PackageId,
    ) -> Result<Vec<Plan>, V3Error> {
        Err(V3Error::not_implemented("list_plans"))
    }

    /// Lists the plans of several packages, in package order.
    async fn list_plans_of_packages(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _package_ids: &[PackageId],
    ) -> Result<Vec<Plan>, V3Error> {
        Err(V3Error::not_implemented("list_plans_of_packages"))
    }

    /// Counts the plans of a package.
    async fn count_plans(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _package_id: &PackageId,
    ) -> Result<u64, V3Error> {
        Err(V3Error::not_implemented("count_plans"))
    }

    /// Lists the services included in a plan.
    async fn list_plan_services(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &PlanIdent,
    ) -> Result<Vec<Service>, V3Error> {
        Err(V3Error::not_implemented("list_plan_services"))
    }

    /// Counts the services included in a plan.
    async fn count_plan_services(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &PlanIdent,
    ) -> Result<u64, V3Error> {
        Err(V3Error::not_implemented("count_plan_services"))
    }

    /// Includes a service in a plan.
    async fn create_plan_service(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &PlanServiceIdent,
    ) -> Result<AddressableV3Object, V3Error> {
        Err(V3Error::not_implemented("create_plan_service"))
    }

    /// Removes a service from a plan.
    async fn delete_plan_service(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &PlanServiceIdent,
    ) -> Result<(), V3Error> {
        Err(V3Error::not_implemented("delete_plan_service"))
    }

    /// Returns `true` if the service is included in the plan.
    async fn check_plan_service_exists(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &PlanServiceIdent,
    ) -> Result<bool, V3Error> {
        Err(V3Error::not_implemented("check_plan_service_exists"))
    }

    /// Lists the endpoints of a service included in a plan.
    async fn list_plan_endpoints(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &PlanServiceIdent,
    ) -> Result<Vec<AddressableV3Object>, V3Error> {
        Err(V3Error::not_implemented("list_plan_endpoints"))
    }

    /// Counts the endpoints of a service included in a plan.
    async fn count_plan_endpoints(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &PlanServiceIdent,
    ) -> Result<u64, V3Error> {
        Err(V3Error::not_implemented("count_plan_endpoints"))
    }

    /// Includes an endpoint in a plan. Its service must already be included.
    async fn create_plan_endpoint(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &PlanEndpointIdent,
    ) -> Result<AddressableV3Object, V3Error> {
        Err(V3Error::not_implemented("create_plan_endpoint"))
    }

    /// Removes an endpoint from a plan.
    async fn delete_plan_endpoint(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &PlanEndpointIdent,
    ) -> Result<(), V3Error> {
        Err(V3Error::not_implemented("delete_plan_endpoint"))
    }

    /// Returns `true` if the endpoint is included in the plan.
    async fn check_plan_endpoint_exists(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &PlanEndpointIdent,
    ) -> Result<bool, V3Error> {
        Err(V3Error::not_implemented("check_plan_endpoint_exists"))
    }

    /// Lists the endpoint methods a plan grants.
    async fn list_plan_methods(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &PlanEndpointIdent,
    ) -> Result<Vec<ApiMethod>, V3Error> {
        Err(V3Error::not_implemented("list_plan_methods"))
    }

    /// Fetches an endpoint method granted by a plan.
    async fn get_plan_method(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &PlanMethodIdent,
    ) -> Result<ApiMethod, V3Error> {
        Err(V3Error::not_implemented("get_plan_method"))
    }

    /// Grants an endpoint method in a plan.
    async fn create_plan_method(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &PlanMethodIdent,
    ) -> Result<ApiMethod, V3Error> {
        Err(V3Error::not_implemented("create_plan_method"))
    }

    /// Revokes an endpoint method from a plan.
    async fn delete_plan_method(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &PlanMethodIdent,
    ) -> Result<(), V3Error> {
        Err(V3Error::not_implemented("delete_plan_method"))
    }

    /// Fetches the response filter applied to a plan method.
    async fn get_plan_method_filter(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &PlanMethodIdent,
    ) -> Result<ResponseFilter, V3Error> {
        Err(V3Error::not_implemented("get_plan_method_filter"))
    }

    /// Applies a response filter to a plan method.
    async fn create_plan_method_filter(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &PlanMethodFilterIdent,
    ) -> Result<ResponseFilter, V3Error> {
        Err(V3Error::not_implemented("create_plan_method_filter"))
    }

    /// Removes the response filter of a plan method.
    async fn delete_plan_method_filter(
        &self,
        _ctx: &CancellationToken,
        _transport: &V3Transport,
        _ident: &PlanMethodIdent,
    ) -> Result<(), V3Error> {
        Err(V3Error::not_implemented("delete_plan_method_filter"))
    }
}

fn plans_path(package_id: &PackageId) -> String {
    build_path("/packages/{packageId}/plans", &[("packageId", package_id)])
}

fn plan_path(package_id: &PackageId, plan_id: &str) -> String {
    build_path(
        "/packages/{packageId}/plans/{planId}",
        &[("packageId", package_id.as_str()), ("planId", plan_id)],
    )
}

fn plan_services_path(ident: &PlanIdent) -> String {
    format!("{}/services", plan_path(&ident.package_id, &ident.plan_id))
}

fn plan_service_path(ident: &PlanServiceIdent) -> String {
    build_path(
        &format!("{}/{{serviceId}}", plan_services_path(&ident.plan)),
        &[("serviceId", &ident.service_id)],
    )
}

fn plan_endpoints_path(ident: &PlanServiceIdent) -> String {
    format!("{}/endpoints", plan_service_path(ident))
}

fn plan_endpoint_path(ident: &PlanEndpointIdent) -> String {
    build_path(
        &format!("{}/{{endpointId}}", plan_endpoints_path(&ident.plan_service)),
        &[("endpointId", &ident.endpoint_id)],
    )
}

fn plan_methods_path(ident: &PlanEndpointIdent) -> String {
    format!("{}/methods", plan_endpoint_path(ident))
}

fn plan_method_path(ident: &PlanMethodIdent) -> String {
    build_path(
        &format!("{}/{{methodId}}", plan_methods_path(&ident.plan_endpoint)),
        &[("methodId", &ident.method_id)],
    )
}

// A plan method carries at most one filter, addressed without an identifier.
fn plan_method_filter_path(ident: &PlanMethodIdent) -> String {
    format!("{}/responseFilter", plan_method_path(ident))
}

#[async_trait]
impl PlanMethods for V3Methods {
    async fn get_plan(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &PlanIdent,
    ) -> Result<Plan, V3Error> {
        let spec = FetchSpec::new(plan_path(&ident.package_id, &ident.plan_id), Plan::NAME)
            .with_query(fields_of::<Plan>());
        transport.get_object(ctx, &spec).await
    }

    async fn create_plan(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        package_id: &PackageId,
        plan: &Plan,
    ) -> Result<Plan, V3Error> {
        let spec =
            FetchSpec::new(plans_path(package_id), Plan::NAME).with_query(fields_of::<Plan>());
        transport.create_object(ctx, &spec, plan).await
    }

    async fn update_plan(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        package_id: &PackageId,
        plan: &Plan,
    ) -> Result<Plan, V3Error> {
        let plan_id = require_id(Plan::NAME, plan.id.as_ref())?;
        let spec = FetchSpec::new(plan_path(package_id, plan_id), Plan::NAME)
            .with_query(fields_of::<Plan>());
        transport.update_object(ctx, &spec, plan).await
    }

    async fn delete_plan(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &PlanIdent,
    ) -> Result<(), V3Error> {
        let spec =
            FetchSpec::<()>::without_parser(
                plan_path(&ident.package_id, &ident.plan_id),
                Plan::NAME,
            );
        transport.delete_object(ctx, &spec).await
    }

    async fn list_plans(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        package_id: &PackageId,
    ) -> Result<Vec<Plan>, V3Error> {
        let spec = FetchSpec::new(plans_path(package_id), Plan::PLURAL)
            .with_query(fields_of::<Plan>())
            .paginate(Pagination::per_page());
        transport.fetch_all(ctx, &spec).await.map(flatten)
    }

    async fn list_plans_of_packages(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        package_ids: &[PackageId],
    ) -> Result<Vec<Plan>, V3Error> {
        let units: Vec<String> = package_ids.iter().map(plans_path).collect();
        let spec = FetchSpec::new("/packages", Plan::PLURAL)
            .with_query(fields_of::<Plan>())
            .paginate(Pagination::PerItem { units });
        transport.fetch_all(ctx, &spec).await.map(flatten)
    }

    async fn count_plans(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        package_id: &PackageId,
    ) -> Result<u64, V3Error> {
        let spec = FetchSpec::<()>::without_parser(plans_path(package_id), Plan::PLURAL);
        transport.count(ctx, &spec).await
    }

    async fn list_plan_services(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &PlanIdent,
    ) -> Result<Vec<Service>, V3Error> {
        let spec = FetchSpec::new(plan_services_path(ident), PLAN_SERVICES)
            .with_query(fields_of::<Service>())
            .paginate(Pagination::per_page());
        transport.fetch_all(ctx, &spec).await.map(flatten)
    }

    async fn count_plan_services(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &PlanIdent,
    ) -> Result<u64, V3Error> {
        let spec = FetchSpec::<()>::without_parser(plan_services_path(ident), PLAN_SERVICES);
        transport.count(ctx, &spec).await
    }

    async fn create_plan_service(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &PlanServiceIdent,
    ) -> Result<AddressableV3Object, V3Error> {
        let spec = FetchSpec::new(plan_services_path(&ident.plan), PLAN_SERVICE);
        let body = json!({ "id": ident.service_id });
        transport.create_object(ctx, &spec, &body).await
    }

    async fn delete_plan_service(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &PlanServiceIdent,
    ) -> Result<(), V3Error> {
        let spec = FetchSpec::<()>::without_parser(plan_service_path(ident), PLAN_SERVICE);
        transport.delete_object(ctx, &spec).await
    }

    async fn check_plan_service_exists(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &PlanServiceIdent,
    ) -> Result<bool, V3Error> {
        let spec = FetchSpec::<()>::without_parser(plan_service_path(ident), PLAN_SERVICE)
            .with_query(fields_params(&["id"]));
        transport.exists(ctx, &spec).await
    }

    async fn list_plan_endpoints(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &PlanServiceIdent,
    ) -> Result<Vec<AddressableV3Object>, V3Error> {
        let spec = FetchSpec::new(plan_endpoints_path(ident), PLAN_ENDPOINTS)
            .with_query(fields_params(REFERENCE_FIELDS))
            .paginate(Pagination::per_page());
        transport.fetch_all(ctx, &spec).await.map(flatten)
    }

    async fn count_plan_endpoints(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &PlanServiceIdent,
    ) -> Result<u64, V3Error> {
        let spec = FetchSpec::<()>::without_parser(plan_endpoints_path(ident), PLAN_ENDPOINTS);
        transport.count(ctx, &spec).await
    }

    async fn create_plan_endpoint(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &PlanEndpointIdent,
    ) -> Result<AddressableV3Object, V3Error> {
        let spec = FetchSpec::new(plan_endpoints_path(&ident.plan_service), PLAN_ENDPOINT);
        let body = json!({ "id": ident.endpoint_id });
        transport.create_object(ctx, &spec, &body).await
    }

    async fn delete_plan_endpoint(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &PlanEndpointIdent,
    ) -> Result<(), V3Error> {
        let spec = FetchSpec::<()>::without_parser(plan_endpoint_path(ident), PLAN_ENDPOINT);
        transport.delete_object(ctx, &spec).await
    }

    async fn check_plan_endpoint_exists(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &PlanEndpointIdent,
    ) -> Result<bool, V3Error> {
        let spec = FetchSpec::<()>::without_parser(plan_endpoint_path(ident), PLAN_ENDPOINT)
            .with_query(fields_params(&["id"]));
        transport.exists(ctx, &spec).await
    }

    async fn list_plan_methods(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &PlanEndpointIdent,
    ) -> Result<Vec<ApiMethod>, V3Error> {
        let spec = FetchSpec::new(plan_methods_path(ident), PLAN_METHODS)
            .with_query(fields_params(REFERENCE_FIELDS))
            .paginate(Pagination::per_page());
        transport.fetch_all(ctx, &spec).await.map(flatten)
    }

    async fn get_plan_method(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &PlanMethodIdent,
    ) -> Result<ApiMethod, V3Error> {
        let spec = FetchSpec::new(plan_method_path(ident), PLAN_METHOD)
            .with_query(fields_params(REFERENCE_FIELDS));
        transport.get_object(ctx, &spec).await
    }

    async fn create_plan_method(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &PlanMethodIdent,
    ) -> Result<ApiMethod, V3Error> {
        let spec = FetchSpec::new(plan_methods_path(&ident.plan_endpoint), PLAN_METHOD);
        let body = json!({ "id": ident.method_id });
        transport.create_object(ctx, &spec, &body).await
    }

    async fn delete_plan_method(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &PlanMethodIdent,
    ) -> Result<(), V3Error> {
        let spec = FetchSpec::<()>::without_parser(plan_method_path(ident), PLAN_METHOD);
        transport.delete_object(ctx, &spec).await
    }

    async fn get_plan_method_filter(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &PlanMethodIdent,
    ) -> Result<ResponseFilter, V3Error> {
        let spec = FetchSpec::new(plan_method_filter_path(ident), PLAN_METHOD_FILTER)
            .with_query(fields_params(RESPONSE_FILTER_FULL_FIELDS));
        transport.get_object(ctx, &spec).await
    }

    async fn create_plan_method_filter(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &PlanMethodFilterIdent,
    ) -> Result<ResponseFilter, V3Error> {
        let spec = FetchSpec::new(plan_method_filter_path(&ident.plan_method), PLAN_METHOD_FILTER);
        let body = json!({ "id": ident.filter_id });
        transport.create_object(ctx, &spec, &body).await
    }

    async fn delete_plan_method_filter(
        &self,
        ctx: &CancellationToken,
        transport: &V3Transport,
        ident: &PlanMethodIdent,
    ) -> Result<(), V3Error> {
        let spec =
            FetchSpec::<()>::without_parser(plan_method_filter_path(ident), PLAN_METHOD_FILTER);
        transport.delete_object(ctx, &spec).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_service() -> PlanServiceIdent {
        PlanServiceIdent::new(PlanIdent::new("pkg", "plan"), "svc")
    }

    #[test]
    fn test_nested_paths() {
        assert_eq!(plans_path(&PackageId::new("pkg")), "/packages/pkg/plans");
        assert_eq!(
            plan_services_path(&PlanIdent::new("pkg", "plan")),
            "/packages/pkg/plans/plan/services"
        );
        assert_eq!(
            plan_service_path(&plan_service()),
            "/packages/pkg/plans/plan/services/svc"
        );
        assert_eq!(
            plan_endpoint_path(&PlanEndpointIdent::new(plan_service(), "ep")),
            "/packages/pkg/plans/plan/services/svc/endpoints/ep"
        );
        let method = PlanMethodIdent::new(PlanEndpointIdent::new(plan_service(), "ep"), "m");
        assert_eq!(
            plan_method_filter_path(&method),
            "/packages/pkg/plans/plan/services/svc/endpoints/ep/methods/m/responseFilter"
        );
    }

    #[test]
    fn test_identifiers_are_encoded() {
        let ident = PlanServiceIdent::new(PlanIdent::new("p/1", "a b"), "s");
        assert_eq!(
            plan_service_path(&ident),
            "/packages/p%2F1/plans/a%20b/services/s"
        );
    }
}
