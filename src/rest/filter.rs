//! Filtering and field-selection query parameters.
//!
//! The V3 API narrows collections with `filter=name:value,other:value` and
//! narrows the returned attributes with `fields=a,b,c`.

use crate::rest::fetch_spec::QueryParams;

/// Builds the query for a filtered listing.
///
/// Empty filters and empty field lists are omitted.
///
/// # Example
///
/// ```rust
/// use mashery_v3::rest::filtering_params;
///
/// let query = filtering_params([("status", "active")], &["id", "apikey"]);
/// assert_eq!(query.get("filter"), Some(&["status:active".to_string()][..]));
/// assert_eq!(query.get("fields"), Some(&["id,apikey".to_string()][..]));
/// ```
#[must_use]
pub fn filtering_params<K, V>(
    filters: impl IntoIterator<Item = (K, V)>,
    fields: &[&str],
) -> QueryParams
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut query = QueryParams::new();

    let filter = filters
        .into_iter()
        .map(|(k, v)| format!("{}:{}", k.as_ref(), v.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    if !filter.is_empty() {
        query.add("filter", filter);
    }

    if !fields.is_empty() {
        query.add("fields", fields.join(","));
    }

    query
}

/// Builds a query selecting only `fields`.
#[must_use]
pub fn fields_params(fields: &[&str]) -> QueryParams {
    filtering_params(std::iter::empty::<(&str, &str)>(), fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_filter_joins_pairs_in_order() {
        let mut filters = BTreeMap::new();
        filters.insert("apikey", "abc");
        filters.insert("status", "active");

        let query = filtering_params(&filters, &[]);
        assert_eq!(
            query.to_pairs(),
            vec![("filter".to_string(), "apikey:abc,status:active".to_string())]
        );
    }

    #[test]
    fn test_empty_inputs_produce_empty_query() {
        assert!(filtering_params(Vec::<(String, String)>::new(), &[]).is_empty());
    }

    #[test]
    fn test_fields_only() {
        let query = fields_params(&["id", "name", "created"]);
        assert_eq!(
            query.to_pairs(),
            vec![("fields".to_string(), "id,name,created".to_string())]
        );
    }
}
