//! V3 object model.
//!
//! Every object is a serde struct using the platform's camelCase attribute
//! names. Attributes are optional: the platform returns only the fields that
//! were requested, and only set attributes are sent on create and update.
//! `created`/`updated` timestamps are read-only and never serialized.

mod application;
mod common;
mod email_template;
mod error_set;
mod ids;
mod member;
mod method;
mod package;
mod service;
mod timestamp;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use application::{Application, APPLICATION_DEEP_FIELDS};
pub use common::{AddressableV3Object, Domain};
pub use email_template::{EmailTemplate, EmailTemplateSet};
pub use error_set::{ErrorMessage, ErrorSet};
pub use ids::{
    ApplicationId, EndpointIdent, EndpointMethodIdent, ErrorSetIdent, MemberId, PackageId,
    PackageKeyId, PlanEndpointIdent, PlanIdent, PlanMethodFilterIdent, PlanMethodIdent,
    PlanServiceIdent, ResponseFilterIdent, RoleId, ServiceId,
};
pub use member::{Member, Role, RolePermission, MEMBER_DEEP_FIELDS};
pub use method::{ApiMethod, ResponseFilter, API_METHOD_FULL_FIELDS, RESPONSE_FILTER_FULL_FIELDS};
pub use package::{Package, PackageKey, Plan};
pub use service::{Endpoint, OAuthSecurityProfile, Service, ServiceCache, ENDPOINT_FULL_FIELDS};
pub use timestamp::{parse_timestamp, TIMESTAMP_FORMAT};

/// Common metadata of V3 objects.
pub trait V3Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Context tag for single-object operations (e.g., `"package"`).
    const NAME: &'static str;
    /// Context tag for collection operations (e.g., `"all packages"`).
    const PLURAL: &'static str;
    /// Attributes requested by default. Empty means the platform default.
    const FIELDS: &'static [&'static str];
}

// Verify object types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Application>();
    assert_send_sync::<Package>();
    assert_send_sync::<PackageKey>();
    assert_send_sync::<Service>();
    assert_send_sync::<Endpoint>();
    assert_send_sync::<ApiMethod>();
    assert_send_sync::<ErrorSet>();
};
