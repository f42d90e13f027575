use super::types::{CategoryDetail, ResourceList};
use crate::catalog::{Category, Entry};
use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Public PokéAPI v2 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
/// Size of the single entry page requested at startup.
pub const DEFAULT_PAGE_LIMIT: u32 = 150;
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const MAX_RESPONSE_SIZE: usize = 5 * 1024 * 1024; // 5MB

/// Errors from talking to the creature-data API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// Response body exceeded the 5MB size limit
    #[error("Response too large")]
    ResponseTooLarge,
    /// Body was not the JSON shape we expected
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// Base URL is not an absolute http(s) URL
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Thin client for the three PokéAPI operations the catalog needs.
///
/// Cheap to clone: the inner `reqwest::Client` is reference counted, so
/// background tasks take their own copy.
#[derive(Debug, Clone)]
pub struct PokeApi {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl PokeApi {
    /// Build a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] unless `base_url` is an absolute
    /// `http` or `https` URL.
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let mut url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }

        // Url::join replaces the last segment unless the path ends with '/'
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url: url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch every category.
    ///
    /// The first request uses the server's default page size. If the server
    /// reports more results than it returned, a second request asks for all
    /// of them in one page.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let url = self.endpoint("type")?;
        let first: ResourceList<Category> = self.get_json(url).await?;

        if first.next.is_none() || first.count <= first.results.len() {
            return Ok(first.results);
        }

        tracing::debug!(
            count = first.count,
            received = first.results.len(),
            "Category list is paginated, requesting all"
        );
        let mut url = self.endpoint("type")?;
        url.query_pairs_mut()
            .append_pair("limit", &first.count.to_string())
            .append_pair("offset", "0");
        let all: ResourceList<Category> = self.get_json(url).await?;
        Ok(all.results)
    }

    /// Fetch one page of entries.
    pub async fn list_entries(&self, limit: u32, offset: u32) -> Result<Vec<Entry>, ApiError> {
        let mut url = self.endpoint("pokemon")?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());
        let page: ResourceList<Entry> = self.get_json(url).await?;
        Ok(page.results)
    }

    /// Fetch a category's detail record, including its member entries.
    pub async fn fetch_category_detail(&self, name: &str) -> Result<CategoryDetail, ApiError> {
        let mut url = self.endpoint("type")?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .push(name);
        self.get_json(url).await
    }

    fn endpoint(&self, resource: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(resource)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {e}", self.base_url)))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        tracing::debug!(url = %url, "GET");

        let response = tokio::time::timeout(self.timeout, self.client.get(url.clone()).send())
            .await
            .map_err(|_| ApiError::Timeout)?
            .map_err(ApiError::Network)?;

        if !response.status().is_success() {
            tracing::warn!(url = %url, status = %response.status(), "API request failed");
            return Err(ApiError::HttpStatus(response.status().as_u16()));
        }

        let bytes = read_limited_bytes(response, MAX_RESPONSE_SIZE).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, ApiError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(ApiError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(ApiError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(ApiError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_for(server: &MockServer) -> PokeApi {
        PokeApi::new(reqwest::Client::new(), &server.uri(), DEFAULT_TIMEOUT).unwrap()
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let api = PokeApi::new(reqwest::Client::new(), DEFAULT_BASE_URL, DEFAULT_TIMEOUT).unwrap();
        assert_eq!(api.base_url().as_str(), "https://pokeapi.co/api/v2/");
        assert_eq!(
            api.endpoint("pokemon").unwrap().as_str(),
            "https://pokeapi.co/api/v2/pokemon"
        );
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let err = PokeApi::new(reqwest::Client::new(), "ftp://example.com", DEFAULT_TIMEOUT)
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl(_)));

        let err = PokeApi::new(reqwest::Client::new(), "not a url", DEFAULT_TIMEOUT).unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl(_)));
    }

    #[tokio::test]
    async fn test_list_entries_sends_page_window() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon"))
            .and(query_param("limit", "150"))
            .and(query_param("offset", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"count": 1302, "next": "x", "results": [
                    {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"}
                ]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let entries = api_for(&server).list_entries(150, 0).await.unwrap();
        assert_eq!(entries, vec![Entry::new("bulbasaur", "https://pokeapi.co/api/v2/pokemon/1/")]);
    }

    #[tokio::test]
    async fn test_list_categories_single_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/type"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"count": 1, "next": null, "results": [
                    {"name": "fire", "url": "https://pokeapi.co/api/v2/type/10/"}
                ]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let categories = api_for(&server).list_categories().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "fire");
    }

    #[tokio::test]
    async fn test_list_categories_requests_all_when_paginated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/type"))
            .and(query_param("limit", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"count": 3, "next": null, "results": [
                    {"name": "normal", "url": "u1"},
                    {"name": "fighting", "url": "u2"},
                    {"name": "flying", "url": "u3"}
                ]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/type"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"count": 3, "next": "more", "results": [
                    {"name": "normal", "url": "u1"}
                ]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let categories = api_for(&server).list_categories().await.unwrap();
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["normal", "fighting", "flying"]);
    }

    #[tokio::test]
    async fn test_fetch_category_detail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/type/fire"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"name": "fire", "pokemon": [
                    {"slot": 1, "pokemon": {"name": "charmander", "url": "u4"}}
                ]}"#,
            ))
            .mount(&server)
            .await;

        let detail = api_for(&server).fetch_category_detail("fire").await.unwrap();
        assert_eq!(detail.member_names(), ["charmander"]);
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        match api_for(&server).list_entries(150, 0).await.unwrap_err() {
            ApiError::HttpStatus(500) => {}
            e => panic!("Expected HttpStatus(500), got {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        match api_for(&server).list_categories().await.unwrap_err() {
            ApiError::Decode(_) => {}
            e => panic!("Expected Decode error, got {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"results": []}"#)
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let api =
            PokeApi::new(reqwest::Client::new(), &server.uri(), Duration::from_millis(50)).unwrap();
        match api.list_entries(150, 0).await.unwrap_err() {
            ApiError::Timeout => {}
            e => panic!("Expected Timeout, got {:?}", e),
        }
    }
}
