//! Error sets: the messages a service returns when the gateway rejects a call.

use serde::{Deserialize, Serialize};

use super::V3Resource;

/// A named group of gateway error messages owned by a service.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Response content type, e.g. `"application/json"`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsonp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsonp_type: Option<String>,
    #[serde(skip_serializing)]
    pub error_messages: Option<Vec<ErrorMessage>>,
}

impl V3Resource for ErrorSet {
    const NAME: &'static str = "error set";
    const PLURAL: &'static str = "all error sets";
    const FIELDS: &'static [&'static str] =
        &["id", "name", "type", "jsonp", "jsonpType", "errorMessages"];
}

/// One message of an error set. The identifier names the gateway condition,
/// e.g. `"ERR_403_NOT_AUTHORIZED"`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_body: Option<String>,
}

impl V3Resource for ErrorMessage {
    const NAME: &'static str = "error message";
    const PLURAL: &'static str = "all error messages";
    const FIELDS: &'static [&'static str] = &[];
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_set_keeps_messages_read_only() {
        let set: ErrorSet = serde_json::from_value(json!({
            "id": "es1",
            "name": "Default",
            "type": "application/json",
            "errorMessages": [{"id": "ERR_403_NOT_AUTHORIZED", "code": 403, "status": "Forbidden"}]
        }))
        .unwrap();
        assert_eq!(set.content_type.as_deref(), Some("application/json"));
        assert_eq!(set.error_messages.as_ref().map(Vec::len), Some(1));
        assert_eq!(
            serde_json::to_value(&set).unwrap(),
            json!({"id": "es1", "name": "Default", "type": "application/json"})
        );
    }
}
