//! Services, endpoints and their per-service settings.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::common::Domain;
use super::ids::ServiceId;
use super::member::RolePermission;
use super::V3Resource;

/// An API definition exposed through the platform.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ServiceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize", skip_serializing)]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize", skip_serializing)]
    pub updated: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor_handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robots_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crossdomain_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qps_limit_overall: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rfc3986_encode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing)]
    pub endpoints: Option<Vec<Endpoint>>,
    #[serde(skip_serializing)]
    pub cache: Option<ServiceCache>,
    #[serde(skip_serializing)]
    pub roles: Option<Vec<RolePermission>>,
    #[serde(skip_serializing)]
    pub security_profile: Option<serde_json::Value>,
}

impl V3Resource for Service {
    const NAME: &'static str = "service";
    const PLURAL: &'static str = "all services";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "created",
        "updated",
        "editorHandle",
        "revisionNumber",
        "robotsPolicy",
        "crossdomainPolicy",
        "description",
        "qpsLimitOverall",
        "rfc3986Encode",
        "version",
        "organization",
    ];
}

/// A traffic route of a service.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize", skip_serializing)]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "crate::types::timestamp::deserialize", skip_serializing)]
    pub updated: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_missing_api_key: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_value_location_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_value_locations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_method_detection_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_method_detection_locations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_timeout_for_system_domain_request: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_timeout_for_system_domain_response: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies_during_http_redirects_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_request_authentication_adapter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_api_key_from_incoming_call: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_gzip_of_backend_call: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gzip_passthrough_support_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers_to_exclude_from_incoming_call: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_security: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_passthrough_included_in_backend_call_header: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbound_ssl_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsonp_callback_parameter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsonp_callback_parameter_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forwarded_headers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returned_headers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_http_redirects_to_follow: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outbound_request_target_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outbound_request_target_query_parameters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outbound_transport_protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processor: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_domains: Option<Vec<Domain>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_authentication_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_path_alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth_grant_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strings_to_trim_from_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_http_methods: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_domains: Option<Vec<Domain>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traffic_manager_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_system_domain_credentials: Option<bool>,
}

impl V3Resource for Endpoint {
    const NAME: &'static str = "endpoint";
    const PLURAL: &'static str = "all endpoints";
    const FIELDS: &'static [&'static str] = &["id", "name", "created", "updated"];
}

/// Attributes requested when listing endpoints with their full configuration.
pub const ENDPOINT_FULL_FIELDS: &[&str] = &[
    "id",
    "name",
    "created",
    "updated",
    "allowMissingApiKey",
    "apiKeyValueLocationKey",
    "apiKeyValueLocations",
    "apiMethodDetectionKey",
    "apiMethodDetectionLocations",
    "connectionTimeoutForSystemDomainRequest",
    "connectionTimeoutForSystemDomainResponse",
    "cookiesDuringHttpRedirectsEnabled",
    "customRequestAuthenticationAdapter",
    "dropApiKeyFromIncomingCall",
    "forceGzipOfBackendCall",
    "gzipPassthroughSupportEnabled",
    "headersToExcludeFromIncomingCall",
    "highSecurity",
    "hostPassthroughIncludedInBackendCallHeader",
    "inboundSslRequired",
    "jsonpCallbackParameter",
    "jsonpCallbackParameterValue",
    "forwardedHeaders",
    "returnedHeaders",
    "numberOfHttpRedirectsToFollow",
    "outboundRequestTargetPath",
    "outboundRequestTargetQueryParameters",
    "outboundTransportProtocol",
    "processor",
    "publicDomains",
    "requestAuthenticationType",
    "requestPathAlias",
    "requestProtocol",
    "oauthGrantTypes",
    "stringsToTrimFromApiKey",
    "supportedHttpMethods",
    "systemDomains",
    "trafficManagerDomain",
    "useSystemDomainCredentials",
];

/// Response caching settings of a service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCache {
    /// Cache time-to-live in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_ttl: Option<u32>,
}

impl V3Resource for ServiceCache {
    const NAME: &'static str = "service cache";
    const PLURAL: &'static str = "service cache";
    const FIELDS: &'static [&'static str] = &["cacheTtl"];
}

/// OAuth 2.0 settings of a service.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OAuthSecurityProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token_ttl_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token_ttl: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_multiple_token: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_code_ttl: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forwarded_headers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mashery_token_api_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_refresh_token_ttl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_based_rate_limits_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_oauth_redirect_url: Option<bool>,
    #[serde(rename = "forceSSLRedirectUrlEnabled", skip_serializing_if = "Option::is_none")]
    pub force_ssl_redirect_url_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grant_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qps_limit_ceiling: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_ceiling: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token_ttl: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure_tokens_enabled: Option<bool>,
}

impl V3Resource for OAuthSecurityProfile {
    const NAME: &'static str = "oauth security profile";
    const PLURAL: &'static str = "oauth security profile";
    const FIELDS: &'static [&'static str] = &[];
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_with_domains() {
        let endpoint: Endpoint = serde_json::from_value(json!({
            "id": "ep-1",
            "requestPathAlias": "/v1/echo",
            "publicDomains": [{"address": "api.example.com"}],
            "supportedHttpMethods": ["get", "post"],
            "processor": {"adapter": "custom", "preInputs": {}}
        }))
        .unwrap();

        assert_eq!(endpoint.request_path_alias.as_deref(), Some("/v1/echo"));
        assert_eq!(
            endpoint.public_domains,
            Some(vec![Domain { address: "api.example.com".to_string() }])
        );
        assert!(endpoint.processor.is_some());
    }

    #[test]
    fn test_service_wire_names() {
        let service = Service {
            name: Some("Echo".to_string()),
            rfc3986_encode: Some(true),
            qps_limit_overall: Some(10),
            ..Service::default()
        };
        assert_eq!(
            serde_json::to_value(&service).unwrap(),
            json!({"name": "Echo", "rfc3986Encode": true, "qpsLimitOverall": 10})
        );
    }

    #[test]
    fn test_oauth_profile_renamed_flag() {
        let profile: OAuthSecurityProfile = serde_json::from_value(json!({
            "forceSSLRedirectUrlEnabled": true,
            "grantTypes": ["implicit"]
        }))
        .unwrap();
        assert_eq!(profile.force_ssl_redirect_url_enabled, Some(true));
        assert_eq!(profile.grant_types, Some(vec!["implicit".to_string()]));
    }

    #[test]
    fn test_service_cache() {
        let cache: ServiceCache = serde_json::from_value(json!({"cacheTtl": 15})).unwrap();
        assert_eq!(cache.cache_ttl, Some(15));
    }
}
