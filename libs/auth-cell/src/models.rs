use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::StoreError;
use shared_utils::coerce::loose_text;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default, deserialize_with = "loose_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub confirm_password: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub role: Option<String>,
}

impl SignupRequest {
    pub fn passwords_match(&self) -> bool {
        self.password == self.confirm_password
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "name", default, deserialize_with = "loose_text")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub password: Option<String>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
