//! Endpoint methods and their response filters.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::V3Resource;

/// A method detected on an endpoint's traffic.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiMethod {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize", skip_serializing)]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize", skip_serializing)]
    pub updated: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_json_response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_xml_response: Option<String>,
}

impl V3Resource for ApiMethod {
    const NAME: &'static str = "endpoint method";
    const PLURAL: &'static str = "all endpoint methods";
    const FIELDS: &'static [&'static str] = &["id", "name", "created", "updated"];
}

/// Attributes requested when fetching methods with their sample responses.
pub const API_METHOD_FULL_FIELDS: &[&str] = &[
    "id",
    "name",
    "created",
    "updated",
    "sampleJsonResponse",
    "sampleXmlResponse",
];

/// Strips fields from a method's responses.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize", skip_serializing)]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize", skip_serializing)]
    pub updated: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml_filter_fields: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_filter_fields: Option<String>,
}

impl V3Resource for ResponseFilter {
    const NAME: &'static str = "response filter";
    const PLURAL: &'static str = "all response filters";
    const FIELDS: &'static [&'static str] = &["id", "name", "created", "updated"];
}

/// Attributes requested when fetching filters with their field lists.
pub const RESPONSE_FILTER_FULL_FIELDS: &[&str] = &[
    "id",
    "name",
    "created",
    "updated",
    "notes",
    "xmlFilterFields",
    "jsonFilterFields",
];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_sample_responses() {
        let method: ApiMethod = serde_json::from_value(json!({
            "id": "m1",
            "name": "echo",
            "sampleJsonResponse": "{}",
            "created": "2020-05-13T09:06:55.000+0000"
        }))
        .unwrap();
        assert_eq!(method.sample_json_response.as_deref(), Some("{}"));
        assert_eq!(
            serde_json::to_value(&method).unwrap(),
            json!({"id": "m1", "name": "echo", "sampleJsonResponse": "{}"})
        );
    }

    #[test]
    fn test_filter_wire_names() {
        let filter = ResponseFilter {
            name: Some("strip".to_string()),
            json_filter_fields: Some("/secret".to_string()),
            ..ResponseFilter::default()
        };
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({"name": "strip", "jsonFilterFields": "/secret"})
        );
    }
}
