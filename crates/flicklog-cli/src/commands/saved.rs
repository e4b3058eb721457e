use crate::output::Output;
use color_eyre::Result;
use serde_json::json;
use watch_state_config::PathManager;
use watch_state_core::{SessionState, StoreError};
use watch_state_models::MediaKind;

pub async fn run_list(output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config = super::load_config(&paths)?;
    let creds = super::credential_store(&paths)?;

    let store = super::open_saved_list(&config, &creds).await;
    if store.state() == SessionState::Unauthenticated {
        output.warn("Not signed in. Run 'flicklog login' first");
        return Ok(());
    }

    let items = store.items();
    if items.is_empty() {
        output.info("No saved titles");
        return Ok(());
    }

    output.json(&json!({ "type": "saved", "items": items }));
    if output.is_human() {
        for item in &items {
            let name = item.title.as_deref().unwrap_or("Unknown");
            let date = item.release_date.as_deref().unwrap_or("-");
            output.println(format!(
                "{:>8}  {:5}  {}  ({})",
                item.media_id,
                item.media_kind.to_string(),
                name,
                date
            ));
        }
    }
    Ok(())
}

pub async fn run_add(id: u64, kind: MediaKind, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config = super::load_config(&paths)?;
    let creds = super::credential_store(&paths)?;

    let catalog = super::catalog_client(&config);
    let title = catalog.details(id, kind).await?;

    let store = super::open_saved_list(&config, &creds).await;
    match store.add(&title, kind).await {
        Ok(()) => {
            tracing::info!(operation = "saved_add", media_id = id, "Saved title confirmed remotely");
            output.success(format!("Saved {} for later", title.display_name()));
            Ok(())
        }
        Err(StoreError::Unauthenticated) => {
            output.warn("Not signed in. Run 'flicklog login' first");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn run_remove(id: u64, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config = super::load_config(&paths)?;
    let creds = super::credential_store(&paths)?;

    let store = super::open_saved_list(&config, &creds).await;
    if !store.contains(id) && store.state() == SessionState::Ready {
        output.info(format!("{} is not in the saved list", id));
        return Ok(());
    }

    match store.remove(id).await {
        Ok(()) => {
            tracing::info!(operation = "saved_remove", media_id = id, "Removal confirmed remotely");
            output.success(format!("Removed {} from the saved list", id));
            Ok(())
        }
        Err(StoreError::Unauthenticated) => {
            output.warn("Not signed in. Run 'flicklog login' first");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
