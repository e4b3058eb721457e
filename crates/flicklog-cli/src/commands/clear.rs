use crate::output::Output;
use color_eyre::Result;
use watch_state_config::PathManager;

pub fn run_clear(all: bool, history: bool, credentials: bool, output: &Output) -> Result<()> {
    let paths = PathManager::default();

    if all {
        clear_history(&paths, output);
        clear_credentials(&paths, output)?;
        output.success("All local state cleared");
        return Ok(());
    }

    let mut cleared_anything = false;

    if history {
        clear_history(&paths, output);
        cleared_anything = true;
    }

    if credentials {
        clear_credentials(&paths, output)?;
        cleared_anything = true;
    }

    if !cleared_anything {
        output.warn("No clear option specified. Use --history, --credentials, or --all");
        output.println("\nExample: flicklog clear --history");
    }

    Ok(())
}

fn clear_history(paths: &PathManager, output: &Output) {
    let history = super::open_history(paths);
    history.clear();
    output.success("Cleared watch history");
}

fn clear_credentials(paths: &PathManager, output: &Output) -> Result<()> {
    let mut creds = super::credential_store(paths)?;
    creds.clear_session();
    creds
        .save()
        .map_err(|err| color_eyre::eyre::eyre!("{:#}", err))?;
    output.success("Cleared stored credentials");
    Ok(())
}
