use serde::{Deserialize, Serialize};

/// A title as returned by the catalog API. Movies carry `title`, series
/// carry `name`; everything else is best-effort and may be absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
}

impl CatalogEntry {
    /// Best-effort display string: movie title, then series name.
    pub fn display_name(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Unknown")
    }

    /// Release date for movies, first air date for series.
    pub fn first_release(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .or(self.first_air_date.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_a_catalog_payload() {
        let raw = r#"{
            "id": 550,
            "title": "Fight Club",
            "overview": "An insomniac office worker...",
            "poster_path": "/poster.jpg",
            "backdrop_path": null,
            "vote_average": 8.4,
            "vote_count": 26280,
            "release_date": "1999-10-15",
            "genre_ids": [18]
        }"#;

        let entry: CatalogEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.id, 550);
        assert_eq!(entry.display_name(), "Fight Club");
        assert_eq!(entry.first_release(), Some("1999-10-15"));
        assert!(entry.backdrop_path.is_none());
    }

    #[test]
    fn series_fall_back_to_name() {
        let raw = r#"{"id": 1399, "name": "Game of Thrones"}"#;
        let entry: CatalogEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.display_name(), "Game of Thrones");
        assert_eq!(entry.vote_count, 0);
    }
}
