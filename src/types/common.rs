//! Types shared by several V3 objects.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Reference to another V3 object, as embedded in package keys and plans.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddressableV3Object {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize", skip_serializing)]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize", skip_serializing)]
    pub updated: Option<DateTime<FixedOffset>>,
}

impl AddressableV3Object {
    /// Creates a reference carrying only an identifier.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Returns `true` if the reference carries a non-empty identifier.
    #[must_use]
    pub fn is_identified(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

/// A domain name used by endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Domain {
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reference_skips_read_only_attributes() {
        let reference: AddressableV3Object = serde_json::from_value(json!({
            "id": "p1",
            "name": "Gold",
            "created": "2020-05-13T09:06:55.000+0000",
        }))
        .unwrap();
        assert!(reference.created.is_some());
        assert_eq!(
            serde_json::to_value(&reference).unwrap(),
            json!({"id": "p1", "name": "Gold"})
        );
    }

    #[test]
    fn test_is_identified() {
        assert!(AddressableV3Object::with_id("x").is_identified());
        assert!(!AddressableV3Object::with_id("").is_identified());
        assert!(!AddressableV3Object::default().is_identified());
    }
}
