use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("sign-in rejected: {0}")]
    SignInRejected(String),
}

impl RemoteError {
    pub(crate) async fn from_response(
        service: &'static str,
        response: reqwest::Response,
    ) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        RemoteError::Status {
            service,
            status,
            body,
        }
    }
}
