use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of title a catalog id refers to. Serialized as the catalog's own
/// path segments ("movie" / "tv") so the same values work on the wire and
/// in durable storage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MediaKind {
    #[serde(rename = "movie")]
    Movie,
    #[serde(rename = "tv")]
    Series,
}

impl MediaKind {
    /// Path segment used by the catalog API for this kind.
    pub fn as_path(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "tv",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "movie" => Ok(MediaKind::Movie),
            "tv" | "series" | "show" => Ok(MediaKind::Series),
            other => Err(format!("unknown media kind: {} (use 'movie' or 'tv')", other)),
        }
    }
}
