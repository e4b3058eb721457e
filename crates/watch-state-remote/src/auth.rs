use reqwest::Client;
use serde::Deserialize;
use tokio::sync::watch;
use tracing::info;
use watch_state_models::UserSession;

use crate::error::RemoteError;

/// Password-grant sign-in against the account service.
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: String,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenError {
    #[serde(default, alias = "error_description", alias = "msg")]
    message: Option<String>,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserSession, RemoteError> {
        let url = format!("{}/auth/v1/token", self.base_url);
        let response = self
            .client
            .post(&url)
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<TokenError>(&body)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or(body);
            return Err(RemoteError::SignInRejected(message));
        }

        let token: TokenResponse = response.json().await?;
        info!("signed in as {}", token.user.id);
        Ok(UserSession {
            user_id: token.user.id,
            email: token.user.email,
            access_token: token.access_token,
        })
    }
}

/// Current-user-or-none, fanned out to subscribers on every sign-in and
/// sign-out. Subscribers observe the latest value; intermediate states may
/// be skipped, which is fine for a last-writer-wins session.
pub struct AuthSession {
    tx: watch::Sender<Option<UserSession>>,
}

impl AuthSession {
    pub fn new(initial: Option<UserSession>) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn current(&self) -> Option<UserSession> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<UserSession>> {
        self.tx.subscribe()
    }

    pub fn sign_in(&self, session: UserSession) {
        let _ = self.tx.send(Some(session));
    }

    pub fn sign_out(&self) {
        let _ = self.tx.send(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(user: &str) -> UserSession {
        UserSession {
            user_id: user.to_string(),
            email: None,
            access_token: "tok".to_string(),
        }
    }

    #[test]
    fn subscribers_observe_sign_in_and_out() {
        let auth = AuthSession::new(None);
        let rx = auth.subscribe();
        assert!(auth.current().is_none());

        auth.sign_in(session("u1"));
        assert_eq!(rx.borrow().as_ref().map(|s| s.user_id.as_str()), Some("u1"));

        auth.sign_out();
        assert!(rx.borrow().is_none());
    }

    #[test]
    fn token_error_reads_either_field_name() {
        let e: TokenError =
            serde_json::from_str("{\"error_description\": \"bad credentials\"}").unwrap();
        assert_eq!(e.message.as_deref(), Some("bad credentials"));

        let e: TokenError = serde_json::from_str("{\"msg\": \"nope\"}").unwrap();
        assert_eq!(e.message.as_deref(), Some("nope"));
    }
}
