use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;
use crate::media::MediaKind;

/// A row in the remote saved-list table, unique on (user_id, media_id).
/// Field names follow the table columns so the struct serializes straight
/// onto the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedItem {
    pub user_id: String,
    pub media_id: u64,
    #[serde(rename = "media_type")]
    pub media_kind: MediaKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "poster_path", skip_serializing_if = "Option::is_none")]
    pub poster_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(rename = "vote_average", skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    /// Server-assigned on insert; never sent on upsert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inserted_at: Option<DateTime<Utc>>,
}

impl SavedItem {
    /// Snapshot a catalog title into a row owned by `user_id`.
    pub fn from_catalog(user_id: &str, title: &CatalogEntry, media_kind: MediaKind) -> Self {
        Self {
            user_id: user_id.to_string(),
            media_id: title.id,
            media_kind,
            title: title.title.clone().or_else(|| title.name.clone()),
            poster_ref: title.poster_path.clone(),
            release_date: title.first_release().map(|d| d.to_string()),
            rating: Some(title.vote_average),
            inserted_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_table_column_names() {
        let item = SavedItem {
            user_id: "u1".to_string(),
            media_id: 603,
            media_kind: MediaKind::Movie,
            title: Some("The Matrix".to_string()),
            poster_ref: Some("/m.jpg".to_string()),
            release_date: Some("1999-03-31".to_string()),
            rating: Some(7.5),
            inserted_at: None,
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["media_type"], "movie");
        assert_eq!(json["poster_path"], "/m.jpg");
        assert_eq!(json["vote_average"], 7.5);
        assert!(json.get("inserted_at").is_none());
    }
}
