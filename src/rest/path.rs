//! Resource path construction and validation.
//!
//! Resource paths are relative to the configured endpoint and always start
//! with `/`, e.g. `/packages/{packageId}/plans/{planId}`. Identifiers are
//! interpolated with [`build_path`], which percent-encodes each value so that
//! an identifier can never introduce extra path segments.
//!
//! # Example
//!
//! ```rust
//! use mashery_v3::rest::build_path;
//!
//! let url = build_path(
//!     "/packages/{packageId}/plans/{planId}",
//!     &[("packageId", "p-1"), ("planId", "gold plan")],
//! );
//! assert_eq!(url, "/packages/p-1/plans/gold%20plan");
//! ```

use std::fmt::Display;

use crate::rest::errors::V3Error;

/// Builds a resource path by interpolating identifiers into a template.
///
/// Each `{name}` placeholder is replaced with the percent-encoded value
/// registered under `name`. Placeholders without a value are left in place;
/// [`ensure_resolved`] rejects such paths before they are sent.
#[must_use]
pub fn build_path<V: Display>(template: &str, ids: &[(&str, V)]) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        let encoded = urlencoding::encode(&value.to_string()).into_owned();
        result = result.replace(&placeholder, &encoded);
    }

    result
}

/// Checks that `resource` is a fully interpolated absolute path.
///
/// # Errors
///
/// Returns [`V3Error::Usage`] if the path is relative, still contains a
/// `{placeholder}`, or carries a query string.
pub fn ensure_resolved(context: &str, resource: &str) -> Result<(), V3Error> {
    if !resource.starts_with('/') {
        return Err(V3Error::usage(
            context,
            format!("resource path '{resource}' must start with '/'"),
        ));
    }
    if resource.contains('{') || resource.contains('}') {
        return Err(V3Error::usage(
            context,
            format!("resource path '{resource}' has unresolved placeholders"),
        ));
    }
    if resource.contains('?') || resource.contains('#') {
        return Err(V3Error::usage(
            context,
            format!("resource path '{resource}' must not carry a query; use the descriptor query"),
        ));
    }
    Ok(())
}

/// Checks that `resource` addresses one identified object.
///
/// An identified path has at least a collection segment followed by an
/// identifier segment, and no empty segments. `/packages/` and `/packages`
/// are rejected; `/packages/abc` is accepted.
///
/// # Errors
///
/// Returns [`V3Error::Usage`] if the path does not identify an object.
pub fn ensure_identified(context: &str, resource: &str) -> Result<(), V3Error> {
    ensure_resolved(context, resource)?;

    let segments: Vec<&str> = resource[1..].split('/').collect();
    if segments.iter().any(|s| s.is_empty()) || segments.len() < 2 {
        return Err(V3Error::usage(
            context,
            format!("resource path '{resource}' does not identify an object"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::errors::ErrorKind;

    #[test]
    fn test_build_path_replaces_placeholders() {
        let result = build_path(
            "/packages/{packageId}/plans/{planId}",
            &[("packageId", "p1"), ("planId", "pl2")],
        );
        assert_eq!(result, "/packages/p1/plans/pl2");
    }

    #[test]
    fn test_build_path_encodes_values() {
        let result = build_path("/members/{id}", &[("id", "a/b c")]);
        assert_eq!(result, "/members/a%2Fb%20c");
    }

    #[test]
    fn test_build_path_handles_numeric_ids() {
        let result = build_path("/services/{id}/endpoints", &[("id", 42u64)]);
        assert_eq!(result, "/services/42/endpoints");
    }

    #[test]
    fn test_build_path_leaves_missing_ids() {
        let ids: [(&str, &str); 0] = [];
        assert_eq!(build_path("/packages/{id}", &ids), "/packages/{id}");
    }

    #[test]
    fn test_ensure_resolved() {
        assert!(ensure_resolved("x", "/packages").is_ok());
        assert!(ensure_resolved("x", "/packages/p1/plans").is_ok());

        for bad in ["packages", "/packages/{id}", "/packages?limit=1", ""] {
            let err = ensure_resolved("package", bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UsageFault, "{bad} should be rejected");
            assert_eq!(err.context(), "package");
        }
    }

    #[test]
    fn test_ensure_identified_accepts_object_paths() {
        assert!(ensure_identified("x", "/packages/abc").is_ok());
        assert!(ensure_identified("x", "/packages/abc/plans/def").is_ok());
        assert!(ensure_identified("x", "/services/s1/cache").is_ok());
    }

    #[test]
    fn test_ensure_identified_rejects_missing_identifier() {
        for bad in ["/packages", "/packages/", "/", "/packages//plans", "/packages/{id}"] {
            let err = ensure_identified("package", bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UsageFault, "{bad} should be rejected");
        }
    }
}
