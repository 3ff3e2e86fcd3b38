use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

pub const MAX_BODY_LEN: usize = 140;

/// Post entity - a short entry written by a single author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

impl Post {
    /// Create a new post stamped with the current time.
    pub fn new(user_id: Uuid, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            body: body.into(),
            timestamp: Utc::now(),
        }
    }

    /// Override the creation timestamp.
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Reject empty bodies and bodies over the length limit.
    pub fn validate(&self) -> Result<(), DomainError> {
        let len = self.body.trim().chars().count();
        if len == 0 {
            return Err(DomainError::Validation("Post body must not be empty".to_string()));
        }
        if self.body.chars().count() > MAX_BODY_LEN {
            return Err(DomainError::Validation(format!(
                "Post body must be at most {MAX_BODY_LEN} characters"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_new_post_defaults_to_now() {
        let before = Utc::now();
        let post = Post::new(Uuid::new_v4(), "hello");
        assert!(post.timestamp >= before);
        assert!(post.timestamp <= Utc::now());
    }

    #[test]
    fn test_explicit_timestamp() {
        let when = Utc::now() + TimeDelta::seconds(4);
        let post = Post::new(Uuid::new_v4(), "later").at(when);
        assert_eq!(post.timestamp, when);
    }

    #[test]
    fn test_ids_follow_creation_order() {
        let author = Uuid::new_v4();
        let first = Post::new(author, "one");
        let second = Post::new(author, "two");
        assert!(first.id < second.id);
    }

    #[test]
    fn test_validate_body() {
        let author = Uuid::new_v4();
        assert!(Post::new(author, "hi").validate().is_ok());
        assert!(Post::new(author, "   ").validate().is_err());
        assert!(Post::new(author, "x".repeat(MAX_BODY_LEN)).validate().is_ok());
        assert!(Post::new(author, "x".repeat(MAX_BODY_LEN + 1)).validate().is_err());
    }
}
