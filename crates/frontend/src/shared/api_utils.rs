//! API utilities for frontend-backend communication
//!
//! URL construction plus the request shapes list pages need: the whole
//! collection, one server page, single records and deletes.

use contracts::shared::list_query::{ListQuery, ListResponse};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::config::config;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Network(String),
    #[error("HTTP error: {0}")]
    Http(u16),
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Rejected by server")]
    Rejected,
}

/// Get the base URL for API requests
///
/// Uses `[api] base_url` from the configuration when set; otherwise derives it
/// from the current window location, using port 3000 for the backend server.
/// Returns an empty string outside a browser.
pub fn api_base() -> String {
    let configured = &config().api.base_url;
    if !configured.is_empty() {
        return configured.trim_end_matches('/').to_string();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path such as `/api/categories`
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// `page=..&limit=..[&search=..][&filter=..]`, values percent-encoded.
pub fn query_string(query: &ListQuery) -> String {
    let mut qs = format!("page={}&limit={}", query.page, query.limit);
    if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
        qs.push_str(&format!("&search={}", urlencoding::encode(search.trim())));
    }
    for (key, value) in &query.filters {
        qs.push_str(&format!(
            "&{}={}",
            urlencoding::encode(key),
            urlencoding::encode(value)
        ));
    }
    qs
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Http(response.status()));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// `GET <resource>`: the whole collection, filtered and paged on the client.
pub async fn fetch_all<T: DeserializeOwned>(resource: &str) -> Result<Vec<T>, ApiError> {
    let url = api_url(resource);
    let rows: Vec<T> = get_json(&url).await?;
    log::debug!("GET {}: {} rows", url, rows.len());
    Ok(rows)
}

/// `GET <resource>?page&limit&search&...`: one page cut by the server.
pub async fn fetch_page<T: DeserializeOwned>(
    resource: &str,
    query: &ListQuery,
) -> Result<ListResponse<T>, ApiError> {
    let url = format!("{}?{}", api_url(resource), query_string(query));
    let page: ListResponse<T> = get_json(&url).await?;
    log::debug!(
        "GET {}: page {} of {}, {} total",
        url,
        query.page,
        page.total_pages,
        page.total_results
    );
    Ok(page)
}

/// `GET <resource>/<id>`: one full record.
pub async fn fetch_one<T: DeserializeOwned>(resource: &str, id: &str) -> Result<T, ApiError> {
    let url = format!("{}/{}", api_url(resource), urlencoding::encode(id));
    get_json(&url).await
}

/// `DELETE <resource>/<id>`
pub async fn delete_one(resource: &str, id: &str) -> Result<(), ApiError> {
    let url = format!("{}/{}", api_url(resource), urlencoding::encode(id));
    let response = Request::delete(&url)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Http(response.status()));
    }
    Ok(())
}

/// `DELETE <url>` with a JSON body and a JSON answer.
pub async fn delete_with_body<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    let url = api_url(path);
    let response = Request::delete(&url)
        .json(body)
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Http(response.status()));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
