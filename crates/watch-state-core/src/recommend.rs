use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};
use watch_state_models::{HistoryEntry, Recommendation};
use watch_state_remote::CatalogApi;

/// Output cap of one aggregation pass.
pub const MAX_RECOMMENDATIONS: usize = 12;

/// How many of the most recent history entries seed similarity lookups.
pub const SEED_COUNT: usize = 3;

/// Fans similar-title lookups out over recent history and folds the results
/// into one de-duplicated, watched-excluded, size-capped set.
pub struct RecommendationAggregator {
    catalog: Arc<dyn CatalogApi>,
}

impl RecommendationAggregator {
    pub fn new(catalog: Arc<dyn CatalogApi>) -> Self {
        Self { catalog }
    }

    /// Aggregate over `history`, which must be ordered newest-first (as
    /// `LocalHistoryStore::get_all` returns it).
    ///
    /// The exclusion set covers every id in history, not just the sampled
    /// seeds, so nothing already logged as watched is ever re-suggested. The
    /// lookups run concurrently but are awaited as a batch and merged in seed
    /// order, which keeps the first-seen-wins tie-break deterministic: a
    /// title returned by two seeds keeps the media kind of the
    /// earlier-processed seed. A failed lookup contributes nothing and the
    /// pass continues; all seeds failing yields an empty set.
    pub async fn refresh(&self, history: &[HistoryEntry]) -> Vec<Recommendation> {
        let excluded: HashSet<u64> = history.iter().map(|e| e.id).collect();
        let seeds: Vec<&HistoryEntry> = history.iter().take(SEED_COUNT).collect();

        let lookups = seeds
            .iter()
            .map(|seed| self.catalog.similar(seed.id, seed.media_kind));
        let responses = join_all(lookups).await;

        let mut seen = HashSet::new();
        let mut merged = Vec::new();
        for (seed, response) in seeds.iter().zip(responses) {
            match response {
                Ok(results) => {
                    for entry in results {
                        if !seen.insert(entry.id) {
                            continue;
                        }
                        merged.push(Recommendation {
                            media_kind: seed.media_kind,
                            entry,
                        });
                    }
                }
                Err(e) => {
                    warn!("similar-titles lookup for {} failed: {}", seed.id, e);
                }
            }
        }

        merged.retain(|r| !excluded.contains(&r.entry.id));
        merged.truncate(MAX_RECOMMENDATIONS);
        debug!(
            "aggregated {} recommendations from {} seeds",
            merged.len(),
            seeds.len()
        );
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use watch_state_models::{CatalogEntry, MediaKind};
    use watch_state_remote::RemoteError;

    #[derive(Default)]
    struct MockCatalog {
        similar: HashMap<u64, Vec<CatalogEntry>>,
        failing: HashSet<u64>,
        calls: AtomicUsize,
    }

    impl MockCatalog {
        fn with(mut self, id: u64, results: Vec<CatalogEntry>) -> Self {
            self.similar.insert(id, results);
            self
        }

        fn failing_on(mut self, id: u64) -> Self {
            self.failing.insert(id);
            self
        }
    }

    #[async_trait]
    impl CatalogApi for MockCatalog {
        async fn similar(
            &self,
            id: u64,
            _kind: MediaKind,
        ) -> Result<Vec<CatalogEntry>, RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.contains(&id) {
                return Err(RemoteError::Status {
                    service: "catalog",
                    status: 502,
                    body: "bad gateway".to_string(),
                });
            }
            Ok(self.similar.get(&id).cloned().unwrap_or_default())
        }
    }

    fn entry(id: u64) -> CatalogEntry {
        CatalogEntry {
            id,
            title: Some(format!("Title {}", id)),
            name: None,
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            vote_average: 7.0,
            vote_count: 50,
            release_date: None,
            first_air_date: None,
        }
    }

    fn watched(id: u64, kind: MediaKind) -> HistoryEntry {
        HistoryEntry::from_catalog(&entry(id), kind, None, Utc::now())
    }

    fn aggregator(catalog: MockCatalog) -> RecommendationAggregator {
        RecommendationAggregator::new(Arc::new(catalog))
    }

    #[tokio::test]
    async fn merges_deduplicates_and_excludes_watched() {
        // history = [A=1, B=2]; similar(A) = [B, C]; similar(B) = [C, D]
        let catalog = MockCatalog::default()
            .with(1, vec![entry(2), entry(3)])
            .with(2, vec![entry(3), entry(4)]);
        let agg = aggregator(catalog);

        let history = vec![watched(1, MediaKind::Movie), watched(2, MediaKind::Series)];
        let recs = agg.refresh(&history).await;

        let ids: Vec<u64> = recs.iter().map(|r| r.entry.id).collect();
        assert_eq!(ids, vec![3, 4]);
        // C came from seed A first, so it keeps A's media kind
        assert_eq!(recs[0].media_kind, MediaKind::Movie);
        assert_eq!(recs[1].media_kind, MediaKind::Series);
    }

    #[tokio::test]
    async fn a_failed_seed_contributes_nothing() {
        let catalog = MockCatalog::default()
            .failing_on(1)
            .with(2, vec![entry(3)]);
        let agg = aggregator(catalog);

        let history = vec![watched(1, MediaKind::Movie), watched(2, MediaKind::Movie)];
        let recs = agg.refresh(&history).await;

        let ids: Vec<u64> = recs.iter().map(|r| r.entry.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[tokio::test]
    async fn all_seeds_failing_yields_empty() {
        let catalog = MockCatalog::default().failing_on(1).failing_on(2);
        let agg = aggregator(catalog);

        let history = vec![watched(1, MediaKind::Movie), watched(2, MediaKind::Movie)];
        assert!(agg.refresh(&history).await.is_empty());
    }

    #[tokio::test]
    async fn only_the_most_recent_seeds_are_queried() {
        let catalog = MockCatalog::default()
            .with(1, vec![entry(100)])
            .with(2, vec![entry(101)])
            .with(3, vec![entry(102)])
            .with(4, vec![entry(103)]);
        let agg = RecommendationAggregator::new(Arc::new(catalog));

        let history: Vec<HistoryEntry> =
            (1..=4).map(|id| watched(id, MediaKind::Movie)).collect();
        let recs = agg.refresh(&history).await;

        // Seeds are the newest 3 entries; seed 4's results never appear
        let ids: Vec<u64> = recs.iter().map(|r| r.entry.id).collect();
        assert_eq!(ids, vec![100, 101, 102]);
    }

    #[tokio::test]
    async fn exclusion_covers_unsampled_history() {
        // id 4 is in history but not among the 3 seeds; it must still never
        // be suggested.
        let catalog = MockCatalog::default()
            .with(1, vec![entry(4), entry(50)])
            .with(2, vec![])
            .with(3, vec![]);
        let agg = aggregator(catalog);

        let history: Vec<HistoryEntry> =
            (1..=4).map(|id| watched(id, MediaKind::Movie)).collect();
        let recs = agg.refresh(&history).await;

        let ids: Vec<u64> = recs.iter().map(|r| r.entry.id).collect();
        assert_eq!(ids, vec![50]);
    }

    #[tokio::test]
    async fn output_is_capped() {
        let many: Vec<CatalogEntry> = (100..140).map(entry).collect();
        let catalog = MockCatalog::default().with(1, many);
        let agg = aggregator(catalog);

        let recs = agg.refresh(&[watched(1, MediaKind::Movie)]).await;
        assert_eq!(recs.len(), MAX_RECOMMENDATIONS);
    }

    #[tokio::test]
    async fn watch_then_refresh_end_to_end() {
        use crate::history::LocalHistoryStore;
        use crate::storage::MemoryStore;

        let history = LocalHistoryStore::new(Arc::new(MemoryStore::new()));
        history.record(&entry(101), MediaKind::Movie, None);
        history.record(&entry(102), MediaKind::Movie, Some(80));

        let logged: Vec<u64> = history.get_all().iter().map(|e| e.id).collect();
        assert_eq!(logged, vec![102, 101]);

        let catalog = MockCatalog::default()
            .with(102, vec![entry(101), entry(200)])
            .with(101, vec![entry(200), entry(201)]);
        let agg = aggregator(catalog);

        let recs = agg.refresh(&history.get_all()).await;
        let ids: Vec<u64> = recs.iter().map(|r| r.entry.id).collect();
        // 101 is excluded as watched, 200 appears once
        assert_eq!(ids, vec![200, 201]);
    }

    #[tokio::test]
    async fn empty_history_issues_no_lookups() {
        let catalog = MockCatalog::default();
        let calls = Arc::new(catalog);
        let agg = RecommendationAggregator::new(calls.clone());

        assert!(agg.refresh(&[]).await.is_empty());
        assert_eq!(calls.calls.load(Ordering::SeqCst), 0);
    }
}
