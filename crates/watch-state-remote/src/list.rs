use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use watch_state_models::SavedItem;

use crate::error::RemoteError;
use crate::traits::RemoteListApi;

const LIST_TABLE: &str = "watchlists";

/// Saved-list client over a PostgREST-style table endpoint. Requests carry
/// the project anon key plus, when a session exists, the user's access token
/// so row-level security scopes every call to the owner.
#[derive(Clone)]
pub struct SavedListClient {
    client: Client,
    base_url: String,
    anon_key: String,
    access_token: Option<String>,
}

impl SavedListClient {
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        access_token: Option<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            access_token,
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, LIST_TABLE)
    }

    fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.anon_key)
    }
}

#[async_trait]
impl RemoteListApi for SavedListClient {
    async fn upsert(&self, item: &SavedItem) -> Result<(), RemoteError> {
        debug!(
            "saved-list upsert: user={} media_id={}",
            item.user_id, item.media_id
        );

        let response = self
            .client
            .post(self.table_url())
            .query(&[("on_conflict", "user_id,media_id")])
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&[item])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RemoteError::from_response("saved-list", response).await);
        }
        Ok(())
    }

    async fn delete(&self, user_id: &str, media_id: u64) -> Result<(), RemoteError> {
        debug!("saved-list delete: user={} media_id={}", user_id, media_id);

        let response = self
            .client
            .delete(self.table_url())
            .query(&[
                ("user_id", format!("eq.{}", user_id)),
                ("media_id", format!("eq.{}", media_id)),
            ])
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RemoteError::from_response("saved-list", response).await);
        }
        Ok(())
    }

    async fn query(&self, user_id: &str) -> Result<Vec<SavedItem>, RemoteError> {
        let response = self
            .client
            .get(self.table_url())
            .query(&[
                ("select", "*".to_string()),
                ("user_id", format!("eq.{}", user_id)),
                ("order", "inserted_at.desc".to_string()),
            ])
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RemoteError::from_response("saved-list", response).await);
        }

        let items = response.json::<Vec<SavedItem>>().await?;
        debug!("saved-list query: user={} rows={}", user_id, items.len());
        Ok(items)
    }
}
