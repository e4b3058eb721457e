use crate::output::Output;
use color_eyre::Result;
use watch_state_config::{AccountConfig, CatalogConfig, Config, PathManager};

pub fn run_show(full: bool, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config = match Config::load(&paths.config_file()) {
        Ok(config) => config,
        Err(_) => {
            output.warn(format!(
                "No config at {:?}. Run 'flicklog config set' to create one",
                paths.config_file()
            ));
            return Ok(());
        }
    };

    output.println(format!("catalog.api_base  = {}", config.catalog.api_base));
    output.println(format!(
        "catalog.api_key   = {}",
        mask(&config.catalog.api_key, full)
    ));
    output.println(format!("account.api_base  = {}", config.account.api_base));
    output.println(format!(
        "account.anon_key  = {}",
        mask(&config.account.anon_key, full)
    ));
    Ok(())
}

pub fn run_set(
    catalog_base: Option<String>,
    catalog_key: Option<String>,
    account_base: Option<String>,
    account_key: Option<String>,
    output: &Output,
) -> Result<()> {
    let paths = PathManager::default();
    paths
        .ensure_directories()
        .map_err(|err| color_eyre::eyre::eyre!("{:#}", err))?;

    let existing = Config::load(&paths.config_file()).ok();
    let (mut catalog, mut account) = match existing {
        Some(config) => (config.catalog, config.account),
        None => (
            CatalogConfig {
                api_base: "https://api.themoviedb.org/3".to_string(),
                api_key: String::new(),
            },
            AccountConfig {
                api_base: String::new(),
                anon_key: String::new(),
            },
        ),
    };

    if let Some(base) = catalog_base {
        catalog.api_base = base;
    }
    if let Some(key) = catalog_key {
        catalog.api_key = key;
    }
    if let Some(base) = account_base {
        account.api_base = base;
    }
    if let Some(key) = account_key {
        account.anon_key = key;
    }

    if catalog.api_key.is_empty() {
        output.warn("catalog.api_key is not set; catalog commands will fail");
    }
    if account.api_base.is_empty() || account.anon_key.is_empty() {
        output.warn("account service is not fully configured; login will fail");
    }

    let config = Config { catalog, account };
    config
        .save(&paths.config_file())
        .map_err(|err| color_eyre::eyre::eyre!("{:#}", err))?;
    output.success(format!("Config written to {:?}", paths.config_file()));
    Ok(())
}

fn mask(value: &str, full: bool) -> String {
    if full || value.is_empty() {
        return value.to_string();
    }
    // Indexing by char, not byte, so multi-byte keys cannot split a boundary
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}****{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::mask;

    #[test]
    fn mask_keeps_head_and_tail_of_long_keys() {
        assert_eq!(mask("abcdefghijkl", false), "abcd****ijkl");
        assert_eq!(mask("abcdefghijkl", true), "abcdefghijkl");
    }

    #[test]
    fn mask_hides_short_keys_entirely() {
        assert_eq!(mask("abcd1234", false), "****");
        assert_eq!(mask("", false), "");
    }

    #[test]
    fn mask_handles_multibyte_keys() {
        assert_eq!(mask("ключ-секрет-ключ", false), "ключ****ключ");
        assert_eq!(mask("日本語のキー", false), "****");
    }
}
