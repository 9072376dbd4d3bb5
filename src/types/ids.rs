//! Typed identifiers of V3 objects.
//!
//! Top-level objects are addressed by a single opaque identifier. Nested
//! objects (plans, endpoints, plan services) need the identifiers of their
//! parents as well, and are addressed by the composite `*Ident` types.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! object_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an identifier assigned by the platform.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns `true` if the identifier is empty.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

object_id!(
    /// Identifier of an application.
    ApplicationId
);
object_id!(
    /// Identifier of a package.
    PackageId
);
object_id!(
    /// Identifier of a package key.
    PackageKeyId
);
object_id!(
    /// Identifier of a member.
    MemberId
);
object_id!(
    /// Identifier of a role.
    RoleId
);
object_id!(
    /// Identifier of a service.
    ServiceId
);

/// Identifies a plan within its package.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PlanIdent {
    /// The owning package.
    pub package_id: PackageId,
    /// The plan within the package.
    pub plan_id: String,
}

impl PlanIdent {
    /// Creates a plan identifier.
    #[must_use]
    pub fn new(package_id: impl Into<PackageId>, plan_id: impl Into<String>) -> Self {
        Self {
            package_id: package_id.into(),
            plan_id: plan_id.into(),
        }
    }
}

/// Identifies an endpoint within its service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct EndpointIdent {
    /// The owning service.
    pub service_id: ServiceId,
    /// The endpoint within the service.
    pub endpoint_id: String,
}

impl EndpointIdent {
    /// Creates an endpoint identifier.
    #[must_use]
    pub fn new(service_id: impl Into<ServiceId>, endpoint_id: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            endpoint_id: endpoint_id.into(),
        }
    }
}

/// Identifies a service included in a plan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PlanServiceIdent {
    /// The plan.
    pub plan: PlanIdent,
    /// The service included in the plan.
    pub service_id: ServiceId,
}

impl PlanServiceIdent {
    /// Creates a plan service identifier.
    #[must_use]
    pub fn new(plan: PlanIdent, service_id: impl Into<ServiceId>) -> Self {
        Self {
            plan,
            service_id: service_id.into(),
        }
    }
}

/// Identifies an endpoint included in a plan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PlanEndpointIdent {
    /// The plan service the endpoint belongs to.
    pub plan_service: PlanServiceIdent,
    /// The endpoint within the service.
    pub endpoint_id: String,
}

impl PlanEndpointIdent {
    /// Creates a plan endpoint identifier.
    #[must_use]
    pub fn new(plan_service: PlanServiceIdent, endpoint_id: impl Into<String>) -> Self {
        Self {
            plan_service,
            endpoint_id: endpoint_id.into(),
        }
    }

    /// Returns the identifier of the endpoint outside of the plan.
    #[must_use]
    pub fn endpoint(&self) -> EndpointIdent {
        EndpointIdent::new(
            self.plan_service.service_id.clone(),
            self.endpoint_id.clone(),
        )
    }
}

/// Identifies a method of an endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct EndpointMethodIdent {
    /// The owning endpoint.
    pub endpoint: EndpointIdent,
    /// The method within the endpoint.
    pub method_id: String,
}

impl EndpointMethodIdent {
    /// Creates an endpoint method identifier.
    #[must_use]
    pub fn new(endpoint: EndpointIdent, method_id: impl Into<String>) -> Self {
        Self {
            endpoint,
            method_id: method_id.into(),
        }
    }
}

/// Identifies a response filter of an endpoint method.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ResponseFilterIdent {
    /// The owning method.
    pub method: EndpointMethodIdent,
    /// The filter within the method.
    pub filter_id: String,
}

impl ResponseFilterIdent {
    /// Creates a response filter identifier.
    #[must_use]
    pub fn new(method: EndpointMethodIdent, filter_id: impl Into<String>) -> Self {
        Self {
            method,
            filter_id: filter_id.into(),
        }
    }
}

/// Identifies an error set within its service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ErrorSetIdent {
    /// The owning service.
    pub service_id: ServiceId,
    /// The error set within the service.
    pub error_set_id: String,
}

impl ErrorSetIdent {
    /// Creates an error set identifier.
    #[must_use]
    pub fn new(service_id: impl Into<ServiceId>, error_set_id: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            error_set_id: error_set_id.into(),
        }
    }
}

/// Identifies an endpoint method included in a plan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PlanMethodIdent {
    /// The plan endpoint the method belongs to.
    pub plan_endpoint: PlanEndpointIdent,
    /// The method within the endpoint.
    pub method_id: String,
}

impl PlanMethodIdent {
    /// Creates a plan method identifier.
    #[must_use]
    pub fn new(plan_endpoint: PlanEndpointIdent, method_id: impl Into<String>) -> Self {
        Self {
            plan_endpoint,
            method_id: method_id.into(),
        }
    }
}

/// Names the response filter to apply to a method included in a plan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PlanMethodFilterIdent {
    /// The plan method.
    pub plan_method: PlanMethodIdent,
    /// A response filter of the method, as defined on the service.
    pub filter_id: String,
}

impl PlanMethodFilterIdent {
    /// Creates a plan method filter identifier.
    #[must_use]
    pub fn new(plan_method: PlanMethodIdent, filter_id: impl Into<String>) -> Self {
        Self {
            plan_method,
            filter_id: filter_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_transparently() {
        let id = PackageId::new("p-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"p-1\"");
        let back: PackageId = serde_json::from_str("\"p-1\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_display_and_conversions() {
        let id: ServiceId = "svc".into();
        assert_eq!(id.to_string(), "svc");
        assert_eq!(id.as_str(), "svc");
        assert!(!id.is_empty());
        assert!(MemberId::default().is_empty());
    }

    #[test]
    fn test_plan_endpoint_ident_exposes_endpoint() {
        let ident = PlanEndpointIdent::new(
            PlanServiceIdent::new(PlanIdent::new("pkg", "plan"), "svc"),
            "ep",
        );
        assert_eq!(ident.endpoint(), EndpointIdent::new("svc", "ep"));
    }
}
