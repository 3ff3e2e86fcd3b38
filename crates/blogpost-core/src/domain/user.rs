use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::ports::{AuthError, PasswordService};

/// Base URL of the avatar service.
const GRAVATAR_URL: &str = "https://www.gravatar.com/avatar";

pub const MAX_USERNAME_LEN: usize = 64;
pub const MAX_EMAIL_LEN: usize = 120;
pub const MAX_ABOUT_ME_LEN: usize = 140;

/// User entity - represents a registered author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub about_me: Option<String>,
    pub last_seen: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user without credentials.
    ///
    /// Ids are UUID v7, so they sort in creation order.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            username: username.into(),
            email: email.into(),
            password_hash: String::new(),
            about_me: None,
            last_seen: None,
            created_at: Utc::now(),
        }
    }

    /// Hash `raw` and store the result. The plaintext is never kept.
    pub fn set_password(
        &mut self,
        raw: &str,
        hasher: &dyn PasswordService,
    ) -> Result<(), AuthError> {
        self.password_hash = hasher.hash(raw)?;
        Ok(())
    }

    /// Returns true iff `raw` matches the stored hash.
    ///
    /// A user without a password, or with an unreadable hash, never matches.
    pub fn check_password(&self, raw: &str, hasher: &dyn PasswordService) -> bool {
        if self.password_hash.is_empty() {
            return false;
        }

        match hasher.verify(raw, &self.password_hash) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!(user_id = %self.id, error = %e, "Stored password hash is unreadable");
                false
            }
        }
    }

    /// Gravatar URL for this user's email at `size` pixels, falling back to an identicon.
    pub fn avatar(&self, size: u32) -> String {
        let digest = md5::compute(self.email.trim().to_lowercase().as_bytes());
        format!("{GRAVATAR_URL}/{digest:x}?d=identicon&s={size}")
    }

    /// Check username and email shape before the user is stored.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_username(&self.username)?;

        let email = self.email.trim();
        if email.is_empty() || email.len() > MAX_EMAIL_LEN {
            return Err(DomainError::Validation(format!(
                "Email must be between 1 and {MAX_EMAIL_LEN} characters"
            )));
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
            _ => {
                return Err(DomainError::Validation(
                    "Invalid email address".to_string(),
                ));
            }
        }

        if let Some(about_me) = &self.about_me {
            validate_about_me(about_me)?;
        }

        Ok(())
    }
}

pub fn validate_username(username: &str) -> Result<(), DomainError> {
    let len = username.chars().count();
    if len == 0 || len > MAX_USERNAME_LEN {
        return Err(DomainError::Validation(format!(
            "Username must be between 1 and {MAX_USERNAME_LEN} characters"
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(DomainError::Validation(
            "Username must not contain whitespace".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_about_me(about_me: &str) -> Result<(), DomainError> {
    if about_me.chars().count() > MAX_ABOUT_ME_LEN {
        return Err(DomainError::Validation(format!(
            "About me must be at most {MAX_ABOUT_ME_LEN} characters"
        )));
    }
    Ok(())
}
