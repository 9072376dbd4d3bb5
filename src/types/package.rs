//! Packages, plans and package keys.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::common::AddressableV3Object;
use super::ids::{PackageId, PackageKeyId};
use super::V3Resource;

/// A package groups plans that developers subscribe to.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PackageId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize", skip_serializing)]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize", skip_serializing)]
    pub updated: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_developer_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_developer_near_quota: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_developer_over_quota: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_developer_over_throttle: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_admin_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_admin_near_quota: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_admin_over_quota: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_admin_over_throttle: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_admin_emails: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub near_quota_threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eav: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_adapter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_secret_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing)]
    pub plans: Option<Vec<Plan>>,
}

impl V3Resource for Package {
    const NAME: &'static str = "package";
    const PLURAL: &'static str = "all packages";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "created",
        "updated",
        "name",
        "description",
        "notifyDeveloperPeriod",
        "notifyDeveloperNearQuota",
        "notifyDeveloperOverQuota",
        "notifyDeveloperOverThrottle",
        "notifyAdminPeriod",
        "notifyAdminNearQuota",
        "notifyAdminOverQuota",
        "notifyAdminOverThrottle",
        "notifyAdminEmails",
        "nearQuotaThreshold",
        "eav",
        "keyAdapter",
        "keyLength",
        "sharedSecretLength",
        "organization",
    ];
}

/// A plan inside a package, defining quotas and the services it grants.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize", skip_serializing)]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize", skip_serializing)]
    pub updated: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eav: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_service_key_provisioning_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_key_provisioning_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_num_keys_allowed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_keys_before_review: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qps_limit_ceiling: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qps_limit_exempt: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qps_limit_key_override_allowed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_ceiling: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_exempt: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_key_override_allowed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_filter_override_allowed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_template_set_id: Option<String>,
}

impl V3Resource for Plan {
    const NAME: &'static str = "plan";
    const PLURAL: &'static str = "plans";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "created",
        "updated",
        "name",
        "description",
        "eav",
        "selfServiceKeyProvisioningEnabled",
        "adminKeyProvisioningEnabled",
        "notes",
        "maxNumKeysAllowed",
        "numKeysBeforeReview",
        "qpsLimitCeiling",
        "qpsLimitExempt",
        "qpsLimitKeyOverrideAllowed",
        "rateLimitCeiling",
        "rateLimitExempt",
        "rateLimitKeyOverrideAllowed",
        "rateLimitPeriod",
        "responseFilterOverrideAllowed",
        "status",
        "emailTemplateSetId",
    ];
}

/// A key granting an application access to one plan of one package.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PackageKey {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PackageKeyId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apikey: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize", skip_serializing)]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize", skip_serializing)]
    pub updated: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_ceiling: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_exempt: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qps_limit_ceiling: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qps_limit_exempt: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    #[serde(skip_serializing)]
    pub limits: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<AddressableV3Object>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<AddressableV3Object>,
}

impl PackageKey {
    /// Creates a key linking the given package and plan.
    #[must_use]
    pub fn for_plan(package_id: impl Into<String>, plan_id: impl Into<String>) -> Self {
        Self {
            package: Some(AddressableV3Object::with_id(package_id)),
            plan: Some(AddressableV3Object::with_id(plan_id)),
            ..Self::default()
        }
    }

    /// Returns `true` if the key references both a package and a plan.
    #[must_use]
    pub fn links_package_and_plan(&self) -> bool {
        self.package
            .as_ref()
            .is_some_and(AddressableV3Object::is_identified)
            && self.plan.as_ref().is_some_and(AddressableV3Object::is_identified)
    }
}

impl V3Resource for PackageKey {
    const NAME: &'static str = "package key";
    const PLURAL: &'static str = "all package keys";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "apikey",
        "secret",
        "created",
        "updated",
        "rateLimitCeiling",
        "rateLimitExempt",
        "qpsLimitCeiling",
        "qpsLimitExempt",
        "status",
        "expires",
        "limits",
        "package",
        "plan",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_package_deserializes_platform_json() {
        let package: Package = serde_json::from_value(json!({
            "id": "pkg-1",
            "name": "Gold",
            "created": "2020-05-13T09:06:55.000+0000",
            "updated": "2020-05-14T10:00:00.000+0000",
            "nearQuotaThreshold": 90,
            "keyAdapter": "com.example.KeyAdapter",
            "plans": [{"id": "plan-1", "name": "Basic"}]
        }))
        .unwrap();

        assert_eq!(package.id, Some(PackageId::new("pkg-1")));
        assert_eq!(package.near_quota_threshold, Some(90));
        assert!(package.created.is_some());
        assert_eq!(package.plans.unwrap()[0].name.as_deref(), Some("Basic"));
    }

    #[test]
    fn test_package_serialization_omits_read_only_and_empty_fields() {
        let package = Package {
            id: Some(PackageId::new("pkg-1")),
            name: Some("Gold".to_string()),
            created: Some(crate::types::parse_timestamp("2020-05-13T09:06:55.000+0000").unwrap()),
            plans: Some(vec![Plan::default()]),
            ..Package::default()
        };

        assert_eq!(
            serde_json::to_value(&package).unwrap(),
            json!({"id": "pkg-1", "name": "Gold"})
        );
    }

    #[test]
    fn test_invalid_timestamp_is_rejected() {
        let result: Result<Plan, _> = serde_json::from_value(json!({"created": "last week"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_links_package_and_plan() {
        assert!(PackageKey::for_plan("pkg", "plan").links_package_and_plan());

        let only_package = PackageKey {
            package: Some(AddressableV3Object::with_id("pkg")),
            ..PackageKey::default()
        };
        assert!(!only_package.links_package_and_plan());
        assert!(!PackageKey::default().links_package_and_plan());
    }

    #[test]
    fn test_package_key_serializes_links() {
        let key = PackageKey::for_plan("pkg", "plan");
        assert_eq!(
            serde_json::to_value(&key).unwrap(),
            json!({"package": {"id": "pkg"}, "plan": {"id": "plan"}})
        );
    }
}
