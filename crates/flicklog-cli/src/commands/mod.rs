pub mod clear;
pub mod config;
pub mod history;
pub mod login;
pub mod recommend;
pub mod saved;
pub mod watch;

use color_eyre::eyre::Context as _;
use color_eyre::Result;
use std::sync::Arc;
use watch_state_config::{Config, CredentialStore, PathManager};
use watch_state_core::{FileStore, LocalHistoryStore, SavedListStore};
use watch_state_remote::{SavedListClient, TmdbClient};

pub fn load_config(paths: &PathManager) -> Result<Config> {
    Config::load(&paths.config_file())
        .map_err(|err| color_eyre::eyre::eyre!("{:#}", err))
        .wrap_err_with(|| {
        format!(
            "no usable config at {:?}; run 'flicklog config set' first",
            paths.config_file()
        )
    })
}

pub fn credential_store(paths: &PathManager) -> Result<CredentialStore> {
    let mut store = CredentialStore::new(paths.credentials_file());
    store
        .load()
        .map_err(|err| color_eyre::eyre::eyre!("{:#}", err))?;
    Ok(store)
}

pub fn open_history(paths: &PathManager) -> LocalHistoryStore {
    LocalHistoryStore::new(Arc::new(FileStore::new(paths.state_dir())))
}

pub fn catalog_client(config: &Config) -> TmdbClient {
    TmdbClient::new(&config.catalog.api_base, &config.catalog.api_key)
}

/// Build the saved-list store and drive it through the stored session, if
/// any. Callers check the resulting state before mutating.
pub async fn open_saved_list(config: &Config, creds: &CredentialStore) -> Arc<SavedListStore> {
    let session = creds.session();
    let client = SavedListClient::new(
        &config.account.api_base,
        &config.account.anon_key,
        session.as_ref().map(|s| s.access_token.clone()),
    );
    let store = Arc::new(SavedListStore::new(Arc::new(client)));
    store.handle_auth_change(session).await;
    store
}
