use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;
use crate::media::MediaKind;

/// One recently viewed title in the local history log. Denormalized snapshot
/// of the catalog metadata at the time of viewing, so the log renders without
/// a network round trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub id: u64,
    pub media_kind: MediaKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_ref: Option<String>,
    pub last_watched_at: DateTime<Utc>,
    /// Playback progress, 0-100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_percent: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<u64>,
}

impl HistoryEntry {
    /// Build an entry from a catalog snapshot. Progress beyond 100 is clamped.
    pub fn from_catalog(
        title: &CatalogEntry,
        media_kind: MediaKind,
        progress_percent: Option<u8>,
        watched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: title.id,
            media_kind,
            display_name: title
                .title
                .clone()
                .or_else(|| title.name.clone()),
            poster_ref: title.poster_path.clone(),
            backdrop_ref: title.backdrop_path.clone(),
            last_watched_at: watched_at,
            progress_percent: progress_percent.map(|p| p.min(100)),
            rating: Some(title.vote_average),
            rating_count: Some(title.vote_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64, name: &str) -> CatalogEntry {
        CatalogEntry {
            id,
            title: Some(name.to_string()),
            name: None,
            overview: String::new(),
            poster_path: Some("/p.jpg".to_string()),
            backdrop_path: None,
            vote_average: 7.2,
            vote_count: 1000,
            release_date: None,
            first_air_date: None,
        }
    }

    #[test]
    fn snapshot_carries_catalog_fields() {
        let now = Utc::now();
        let h = HistoryEntry::from_catalog(&entry(42, "Heat"), MediaKind::Movie, Some(35), now);
        assert_eq!(h.id, 42);
        assert_eq!(h.display_name.as_deref(), Some("Heat"));
        assert_eq!(h.poster_ref.as_deref(), Some("/p.jpg"));
        assert_eq!(h.progress_percent, Some(35));
        assert_eq!(h.last_watched_at, now);
    }

    #[test]
    fn progress_is_clamped_to_100() {
        let h = HistoryEntry::from_catalog(&entry(1, "x"), MediaKind::Movie, Some(250), Utc::now());
        assert_eq!(h.progress_percent, Some(100));
    }
}
