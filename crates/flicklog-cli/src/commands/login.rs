use crate::output::Output;
use color_eyre::Result;
use std::io::BufRead;
use watch_state_config::PathManager;
use watch_state_remote::AuthClient;

pub async fn run_login(email: Option<String>, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    paths
        .ensure_directories()
        .map_err(|err| color_eyre::eyre::eyre!("{:#}", err))?;
    let config = super::load_config(&paths)?;

    let email = match email {
        Some(email) => email,
        None => {
            output.print("Email: ")?;
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line)?;
            line.trim().to_string()
        }
    };
    if email.is_empty() {
        return Err(color_eyre::eyre::eyre!("email is required"));
    }
    let password = rpassword::prompt_password("Password: ")?;

    let auth = AuthClient::new(&config.account.api_base, &config.account.anon_key);
    let session = auth.sign_in_with_password(&email, &password).await?;

    let mut creds = super::credential_store(&paths)?;
    creds.set_session(&session);
    creds
        .save()
        .map_err(|err| color_eyre::eyre::eyre!("{:#}", err))?;
    tracing::info!(
        operation = "login",
        user_id = %session.user_id,
        "Stored session credentials"
    );

    output.success(format!(
        "Signed in as {}",
        session.email.as_deref().unwrap_or(&session.user_id)
    ));
    Ok(())
}

pub fn run_logout(output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let mut creds = super::credential_store(&paths)?;

    if creds.session().is_none() {
        output.info("No stored session");
        return Ok(());
    }

    creds.clear_session();
    creds
        .save()
        .map_err(|err| color_eyre::eyre::eyre!("{:#}", err))?;
    tracing::info!(operation = "logout", "Cleared stored session");
    output.success("Signed out");
    Ok(())
}
