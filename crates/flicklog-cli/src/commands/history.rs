use crate::output::Output;
use color_eyre::Result;
use serde_json::json;
use watch_state_config::PathManager;

pub fn run_list(output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let history = super::open_history(&paths);
    let entries = history.get_all();

    if entries.is_empty() {
        output.info("Watch history is empty");
        return Ok(());
    }

    output.json(&json!({ "type": "history", "entries": entries }));
    if output.is_human() {
        for entry in &entries {
            let name = entry.display_name.as_deref().unwrap_or("Unknown");
            let progress = entry
                .progress_percent
                .map(|p| format!(" [{}%]", p))
                .unwrap_or_default();
            output.println(format!(
                "{:>8}  {:5}  {}{}  ({})",
                entry.id,
                entry.media_kind.to_string(),
                name,
                progress,
                entry.last_watched_at.format("%Y-%m-%d %H:%M")
            ));
        }
    }
    Ok(())
}

pub fn run_remove(id: u64, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let history = super::open_history(&paths);
    history.remove(id);
    output.success(format!("Removed {} from history", id));
    Ok(())
}

pub fn run_clear(output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let history = super::open_history(&paths);
    history.clear();
    output.success("Watch history cleared");
    Ok(())
}
