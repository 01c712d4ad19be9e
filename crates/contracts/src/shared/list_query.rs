use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Query for resources paginated on the server (`GET <resource>?page&limit&search&...`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Resource specific filters, sent as plain query parameters
    #[serde(flatten)]
    pub filters: BTreeMap<String, String>,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    100
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            search: None,
            filters: BTreeMap::new(),
        }
    }
}

impl ListQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            ..Self::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = if search.trim().is_empty() {
            None
        } else {
            Some(search)
        };
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }
}

/// One page of a server-paginated resource
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub results: Vec<T>,
    pub total_results: u64,
    pub total_pages: u32,
}

/// Body of `DELETE <resource>/bulk-delete`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<String>,
}

/// Answer of `DELETE <resource>/bulk-delete`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteResponse {
    #[serde(default)]
    pub deleted_count: u64,
    #[serde(default)]
    pub failed_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_keeps_extra_filters() {
        let query: ListQuery =
            serde_json::from_str(r#"{"page":2,"limit":50,"search":"mum","city":"Pune"}"#).unwrap();
        assert_eq!(query.page, 2);
        assert_eq!(query.limit, 50);
        assert_eq!(query.search.as_deref(), Some("mum"));
        assert_eq!(query.filters.get("city").map(String::as_str), Some("Pune"));
    }

    #[test]
    fn test_list_query_defaults() {
        let query: ListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query, ListQuery::default());
        assert_eq!(ListQuery::new(1, 100).with_search("   ").search, None);
    }

    #[test]
    fn test_list_response_wire_names() {
        let json = r#"{"results":[1,2,3],"totalResults":3,"totalPages":1}"#;
        let response: ListResponse<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(response.results, vec![1, 2, 3]);
        assert_eq!(response.total_results, 3);
        assert_eq!(response.total_pages, 1);
    }

    #[test]
    fn test_bulk_delete_response_tolerates_missing_fields() {
        let response: BulkDeleteResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.deleted_count, 0);
        assert!(response.failed_ids.is_empty());
    }
}
