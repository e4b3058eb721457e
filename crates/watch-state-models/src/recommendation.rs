use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;
use crate::media::MediaKind;

/// A catalog title surfaced by the aggregator, tagged with the media kind of
/// the history entry that produced it. Derived data, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub media_kind: MediaKind,
    #[serde(flatten)]
    pub entry: CatalogEntry,
}
