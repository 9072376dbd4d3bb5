//! Applications registered by members.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::ids::ApplicationId;
use super::package::PackageKey;
use super::V3Resource;

/// An application owned by a member, holding package keys.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ApplicationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize", skip_serializing)]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize", skip_serializing)]
    pub updated: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub app_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commercial: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ads: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ads_system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub how_did_you_hear: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth_redirect_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eav: Option<serde_json::Value>,
    #[serde(skip_serializing)]
    pub package_keys: Option<Vec<PackageKey>>,
}

impl V3Resource for Application {
    const NAME: &'static str = "application";
    const PLURAL: &'static str = "all applications";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "created",
        "updated",
        "username",
        "name",
        "description",
        "type",
        "commercial",
        "ads",
        "adsSystem",
        "usageModel",
        "tags",
        "notes",
        "howDidYouHear",
        "preferredProtocol",
        "preferredOutput",
        "externalId",
        "uri",
        "oauthRedirectUri",
        "eav",
    ];
}

/// Attributes requested when fetching an application with its keys.
pub const APPLICATION_DEEP_FIELDS: &[&str] = &[
    "id",
    "created",
    "updated",
    "username",
    "name",
    "description",
    "type",
    "externalId",
    "uri",
    "oauthRedirectUri",
    "eav",
    "packageKeys",
];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_attribute_is_renamed() {
        let app: Application = serde_json::from_value(json!({
            "id": "app-1",
            "type": "Web",
            "packageKeys": [{"id": "k1", "apikey": "abc"}]
        }))
        .unwrap();

        assert_eq!(app.app_type.as_deref(), Some("Web"));
        assert_eq!(app.package_keys.as_ref().map(Vec::len), Some(1));

        let value = serde_json::to_value(&app).unwrap();
        assert_eq!(value, json!({"id": "app-1", "type": "Web"}));
    }
}
