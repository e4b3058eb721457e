use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub account: AccountConfig,
}

/// Metadata catalog API (TMDB-compatible).
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_base")]
    pub api_base: String,
    /// Read-access bearer token.
    pub api_key: String,
}

/// Hosted account / saved-list service (Supabase-compatible).
#[derive(Debug, Serialize, Deserialize)]
pub struct AccountConfig {
    pub api_base: String,
    /// Public project key sent with every request.
    pub anon_key: String,
}

fn default_catalog_base() -> String {
    "https://api.themoviedb.org/3".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {:?}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {:?}", path))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write config file {:?}", path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn round_trips_through_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config {
            catalog: CatalogConfig {
                api_base: default_catalog_base(),
                api_key: "catalog-key".to_string(),
            },
            account: AccountConfig {
                api_base: "https://example.supabase.co".to_string(),
                anon_key: "anon".to_string(),
            },
        };
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.catalog.api_key, "catalog-key");
        assert_eq!(loaded.account.api_base, "https://example.supabase.co");
    }

    #[test]
    fn catalog_base_defaults_when_omitted() {
        let raw = r#"
            [catalog]
            api_key = "k"

            [account]
            api_base = "https://example.supabase.co"
            anon_key = "anon"
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.catalog.api_base, default_catalog_base());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(&dir.path().join("nope.toml")).is_err());
    }
}
