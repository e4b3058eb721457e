use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use watch_state_models::UserSession;

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// Flat TOML credential file holding the persisted account session, so
/// saved-list commands work across invocations without re-prompting.
pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    // Convenience accessors for the account session

    pub fn session(&self) -> Option<UserSession> {
        let user_id = self.get("user_id")?.clone();
        let access_token = self.get("access_token")?.clone();
        Some(UserSession {
            user_id,
            email: self.get("email").cloned(),
            access_token,
        })
    }

    pub fn set_session(&mut self, session: &UserSession) {
        self.set("user_id".to_string(), session.user_id.clone());
        self.set("access_token".to_string(), session.access_token.clone());
        match &session.email {
            Some(email) => self.set("email".to_string(), email.clone()),
            None => self.remove("email"),
        }
    }

    pub fn clear_session(&mut self) {
        self.remove("user_id");
        self.remove("access_token");
        self.remove("email");
    }
}
