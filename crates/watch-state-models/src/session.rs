use serde::{Deserialize, Serialize};

/// An established account session. Carried by the auth layer and consumed by
/// the saved-list store; absence means unauthenticated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSession {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub access_token: String,
}
