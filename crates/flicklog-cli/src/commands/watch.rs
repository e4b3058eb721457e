use crate::output::Output;
use color_eyre::Result;
use watch_state_config::PathManager;
use watch_state_models::MediaKind;

pub async fn run_watch(
    id: u64,
    kind: MediaKind,
    progress: Option<u8>,
    output: &Output,
) -> Result<()> {
    tracing::debug!("Watch command started for {} ({})", id, kind);

    let paths = PathManager::default();
    paths
        .ensure_directories()
        .map_err(|err| color_eyre::eyre::eyre!("{:#}", err))?;
    let config = super::load_config(&paths)?;

    let catalog = super::catalog_client(&config);
    let title = catalog.details(id, kind).await?;

    let history = super::open_history(&paths);
    history.record(&title, kind, progress);
    tracing::info!(
        operation = "watch_recorded",
        media_id = id,
        "Recorded {} in watch history",
        title.display_name()
    );

    match progress {
        Some(p) => output.success(format!(
            "Logged {} ({}) at {}%",
            title.display_name(),
            kind,
            p.min(100)
        )),
        None => output.success(format!("Logged {} ({})", title.display_name(), kind)),
    }
    Ok(())
}
