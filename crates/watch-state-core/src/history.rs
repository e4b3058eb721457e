use chrono::Utc;
use std::sync::Arc;
use tracing::warn;
use watch_state_models::{CatalogEntry, HistoryEntry, MediaKind};

use crate::storage::KeyValueStore;

/// Storage key for the history log.
pub const HISTORY_KEY: &str = "watchHistory";

/// Fixed capacity of the log. Recording past this silently evicts the oldest
/// entry; that is the intended ring behavior, not an error.
pub const MAX_HISTORY: usize = 12;

/// Bounded, recency-ordered log of recently viewed titles. Every read
/// deserializes fresh from durable storage, so there is no in-memory copy to
/// go stale, and history is best-effort throughout: unreadable or corrupt
/// payloads degrade to an empty log and heal on the next write.
pub struct LocalHistoryStore {
    storage: Arc<dyn KeyValueStore>,
}

impl LocalHistoryStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// All entries, most recently watched first.
    pub fn get_all(&self) -> Vec<HistoryEntry> {
        let raw = match self.storage.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("failed to read watch history, treating as empty: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("watch history is corrupt, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Log a view of `title`. A re-watch moves the title to the front of the
    /// log instead of duplicating it.
    pub fn record(&self, title: &CatalogEntry, kind: MediaKind, progress_percent: Option<u8>) {
        let entry = HistoryEntry::from_catalog(title, kind, progress_percent, Utc::now());

        let mut entries = self.get_all();
        entries.retain(|e| e.id != entry.id);
        entries.insert(0, entry);
        entries.truncate(MAX_HISTORY);

        self.write(&entries);
    }

    /// Drop the entry for `id`. No-op when absent.
    pub fn remove(&self, id: u64) {
        let mut entries = self.get_all();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() != before {
            self.write(&entries);
        }
    }

    /// Empty the log unconditionally.
    pub fn clear(&self) {
        if let Err(e) = self.storage.remove(HISTORY_KEY) {
            warn!("failed to clear watch history: {}", e);
        }
    }

    fn write(&self, entries: &[HistoryEntry]) {
        let json = match serde_json::to_string(entries) {
            Ok(json) => json,
            Err(e) => {
                warn!("failed to serialize watch history: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set(HISTORY_KEY, &json) {
            warn!("failed to write watch history: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn title(id: u64) -> CatalogEntry {
        CatalogEntry {
            id,
            title: Some(format!("Title {}", id)),
            name: None,
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            vote_average: 7.0,
            vote_count: 100,
            release_date: None,
            first_air_date: None,
        }
    }

    fn store() -> (Arc<MemoryStore>, LocalHistoryStore) {
        let storage = Arc::new(MemoryStore::new());
        let history = LocalHistoryStore::new(storage.clone());
        (storage, history)
    }

    #[test]
    fn starts_empty() {
        let (_, history) = store();
        assert!(history.get_all().is_empty());
    }

    #[test]
    fn record_orders_most_recent_first() {
        let (_, history) = store();
        history.record(&title(101), MediaKind::Movie, None);
        history.record(&title(102), MediaKind::Movie, None);

        let ids: Vec<u64> = history.get_all().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![102, 101]);
    }

    #[test]
    fn rewatch_moves_to_front_without_duplicating() {
        let (_, history) = store();
        history.record(&title(1), MediaKind::Movie, None);
        history.record(&title(2), MediaKind::Movie, None);
        history.record(&title(3), MediaKind::Series, None);
        history.record(&title(1), MediaKind::Movie, Some(50));

        let entries = history.get_all();
        let ids: Vec<u64> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
        assert_eq!(entries[0].progress_percent, Some(50));
    }

    #[test]
    fn capacity_evicts_the_oldest() {
        let (_, history) = store();
        for id in 1..=(MAX_HISTORY as u64 + 1) {
            history.record(&title(id), MediaKind::Movie, None);
        }

        let entries = history.get_all();
        assert_eq!(entries.len(), MAX_HISTORY);
        // id 1 was the oldest and fell off the end
        assert!(entries.iter().all(|e| e.id != 1));
        assert_eq!(entries[0].id, MAX_HISTORY as u64 + 1);
    }

    #[test]
    fn remove_is_idempotent() {
        let (_, history) = store();
        history.record(&title(7), MediaKind::Movie, None);
        history.remove(7);
        history.remove(7);
        assert!(history.get_all().is_empty());
    }

    #[test]
    fn clear_empties_the_log() {
        let (_, history) = store();
        history.record(&title(1), MediaKind::Movie, None);
        history.record(&title(2), MediaKind::Movie, None);
        history.clear();
        assert!(history.get_all().is_empty());
    }

    #[test]
    fn corrupt_payload_degrades_to_empty_and_self_heals() {
        let (storage, history) = store();
        storage.set(HISTORY_KEY, "{not json").unwrap();
        assert!(history.get_all().is_empty());

        history.record(&title(5), MediaKind::Movie, None);
        let entries = history.get_all();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, 5);
    }
}
