//! Members and roles.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::common::AddressableV3Object;
use super::ids::{MemberId, RoleId};
use super::V3Resource;

/// A developer account.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<MemberId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize", skip_serializing)]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize", skip_serializing)]
    pub updated: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub im: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imsvc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// New password; write-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passwd_new: Option<String>,
    #[serde(skip_serializing)]
    pub applications: Option<Vec<AddressableV3Object>>,
    #[serde(skip_serializing)]
    pub package_keys: Option<Vec<AddressableV3Object>>,
    #[serde(skip_serializing)]
    pub roles: Option<Vec<Role>>,
}

impl V3Resource for Member {
    const NAME: &'static str = "member";
    const PLURAL: &'static str = "all members";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "created",
        "updated",
        "username",
        "email",
        "displayName",
        "uri",
        "blog",
        "im",
        "imsvc",
        "phone",
        "company",
        "address1",
        "address2",
        "locality",
        "region",
        "postalCode",
        "countryCode",
        "firstName",
        "lastName",
        "areaStatus",
        "externalId",
    ];
}

/// Attributes requested when fetching a member with its applications,
/// package keys and roles.
pub const MEMBER_DEEP_FIELDS: &[&str] = &[
    "id",
    "created",
    "updated",
    "username",
    "email",
    "displayName",
    "uri",
    "blog",
    "im",
    "imsvc",
    "phone",
    "company",
    "address1",
    "address2",
    "locality",
    "region",
    "postalCode",
    "countryCode",
    "firstName",
    "lastName",
    "areaStatus",
    "externalId",
    "applications",
    "packageKeys",
    "roles",
];

/// A portal or organization role.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RoleId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize", skip_serializing)]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize", skip_serializing)]
    pub updated: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predefined: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_role: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignable: Option<bool>,
}

impl V3Resource for Role {
    const NAME: &'static str = "role";
    const PLURAL: &'static str = "all roles";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "created",
        "updated",
        "name",
        "description",
        "predefined",
        "orgRole",
        "assignable",
    ];
}

/// Grants a role an action on a service (e.g. reading its interactive docs).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RolePermission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RoleId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl RolePermission {
    /// Grants `action` to the role.
    #[must_use]
    pub fn new(role: impl Into<RoleId>, action: impl Into<String>) -> Self {
        Self {
            id: Some(role.into()),
            name: None,
            action: Some(action.into()),
        }
    }
}

impl V3Resource for RolePermission {
    const NAME: &'static str = "service roles";
    const PLURAL: &'static str = "service roles";
    const FIELDS: &'static [&'static str] = &["id", "name", "action"];
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_member_wire_names() {
        let member = Member {
            username: Some("jdoe".to_string()),
            display_name: Some("J. Doe".to_string()),
            postal_code: Some("1011".to_string()),
            ..Member::default()
        };
        assert_eq!(
            serde_json::to_value(&member).unwrap(),
            json!({"username": "jdoe", "displayName": "J. Doe", "postalCode": "1011"})
        );
    }

    #[test]
    fn test_role_permission() {
        let permission = RolePermission::new("r1", "read");
        assert_eq!(
            serde_json::to_value(&permission).unwrap(),
            json!({"id": "r1", "action": "read"})
        );
    }

    #[test]
    fn test_role_null_timestamps() {
        let role: Role =
            serde_json::from_value(json!({"id": "r", "created": null, "updated": ""})).unwrap();
        assert!(role.created.is_none());
        assert!(role.updated.is_none());
    }

    #[test]
    fn test_full_member_nested_objects_are_read_only() {
        let member: Member = serde_json::from_value(json!({
            "id": "m1",
            "username": "jdoe",
            "applications": [{"id": "a1", "name": "App"}],
            "packageKeys": [{"id": "k1"}],
            "roles": [{"id": "r1", "name": "Developer"}]
        }))
        .unwrap();
        assert_eq!(member.applications.as_ref().map(Vec::len), Some(1));
        assert_eq!(member.roles.as_ref().map(Vec::len), Some(1));
        assert_eq!(
            serde_json::to_value(&member).unwrap(),
            json!({"id": "m1", "username": "jdoe"})
        );
    }
}
