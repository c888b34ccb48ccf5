use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A registered user as returned by the backend's profile endpoint.
/// This client never mutates users beyond session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub is_admin: bool,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Registration payload for `POST /users`.
///
/// `is_admin` is always sent as `false`; admin accounts are not created
/// from this client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignupProfile {
    pub username: String,
    pub email: String,
    pub password: String,
    pub is_admin: bool,
}

impl SignupProfile {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            is_admin: false,
        }
    }

    /// Client-side checks mirroring the backend's registration rules,
    /// applied before any network call.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.username.trim().is_empty() {
            return Err(CoreError::Validation("Username is required".into()));
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(CoreError::Validation(
                "A valid email address is required".into(),
            ));
        }
        if self.password.len() < 6 {
            return Err(CoreError::Validation(
                "Password must be at least 6 characters long".into(),
            ));
        }
        Ok(())
    }
}
