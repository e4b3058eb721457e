use crate::output::Output;
use color_eyre::Result;
use serde_json::json;
use std::sync::Arc;
use watch_state_config::PathManager;
use watch_state_core::RecommendationAggregator;

pub async fn run_recommend(output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config = super::load_config(&paths)?;

    let history = super::open_history(&paths);
    let entries = history.get_all();
    if entries.is_empty() {
        output.info("Watch something first - recommendations are seeded from history");
        return Ok(());
    }

    tracing::debug!("Aggregating recommendations from {} history entries", entries.len());
    let catalog = Arc::new(super::catalog_client(&config));
    let aggregator = RecommendationAggregator::new(catalog);
    let recommendations = aggregator.refresh(&entries).await;
    tracing::info!(
        operation = "recommend",
        count = recommendations.len(),
        "Recommendation aggregation finished"
    );

    if recommendations.is_empty() {
        output.info("Nothing to recommend right now");
        return Ok(());
    }

    output.json(&json!({ "type": "recommendations", "items": recommendations }));
    if output.is_human() {
        let seed_names: Vec<&str> = entries
            .iter()
            .take(watch_state_core::SEED_COUNT)
            .filter_map(|e| e.display_name.as_deref())
            .collect();
        output.println(format!("Because you watched {}:", seed_names.join(", ")));
        for rec in &recommendations {
            output.println(format!(
                "{:>8}  {:5}  {}  ({:.1})",
                rec.entry.id,
                rec.media_kind.to_string(),
                rec.entry.display_name(),
                rec.entry.vote_average
            ));
        }
    }
    Ok(())
}
