use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use watch_state_models::{CatalogEntry, MediaKind};

use crate::error::RemoteError;
use crate::traits::CatalogApi;

/// Metadata catalog client (TMDB wire format, bearer-token auth).
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct PagedResults {
    #[serde(default)]
    results: Vec<CatalogEntry>,
}

impl TmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, RemoteError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("catalog request: {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RemoteError::from_response("catalog", response).await);
        }

        Ok(response.json::<T>().await?)
    }

    /// Titles similar to `id`. Response taken as-is, no pagination.
    pub async fn similar(
        &self,
        id: u64,
        kind: MediaKind,
    ) -> Result<Vec<CatalogEntry>, RemoteError> {
        let page: PagedResults = self
            .get_json(&format!("{}/{}/similar", kind.as_path(), id), &[])
            .await?;
        Ok(page.results)
    }

    /// Full-text title search within one media kind.
    pub async fn search(
        &self,
        query: &str,
        kind: MediaKind,
    ) -> Result<Vec<CatalogEntry>, RemoteError> {
        let page: PagedResults = self
            .get_json(
                &format!("search/{}", kind.as_path()),
                &[("query", query.to_string())],
            )
            .await?;
        Ok(page.results)
    }

    /// Titles trending today.
    pub async fn trending(&self, kind: MediaKind) -> Result<Vec<CatalogEntry>, RemoteError> {
        let page: PagedResults = self
            .get_json(&format!("trending/{}/day", kind.as_path()), &[])
            .await?;
        Ok(page.results)
    }

    /// Full details for one title.
    pub async fn details(&self, id: u64, kind: MediaKind) -> Result<CatalogEntry, RemoteError> {
        self.get_json(&format!("{}/{}", kind.as_path(), id), &[])
            .await
    }
}

#[async_trait]
impl CatalogApi for TmdbClient {
    async fn similar(&self, id: u64, kind: MediaKind) -> Result<Vec<CatalogEntry>, RemoteError> {
        TmdbClient::similar(self, id, kind).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paged_results_tolerate_missing_results_field() {
        let page: PagedResults = serde_json::from_str("{\"page\": 1}").unwrap();
        assert!(page.results.is_empty());
    }

    #[test]
    fn paged_results_parse_catalog_entries() {
        let raw = r#"{
            "page": 1,
            "results": [
                {"id": 1, "title": "A", "vote_average": 6.5, "vote_count": 10},
                {"id": 2, "name": "B"}
            ],
            "total_pages": 3
        }"#;
        let page: PagedResults = serde_json::from_str(raw).unwrap();
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[1].display_name(), "B");
    }
}
