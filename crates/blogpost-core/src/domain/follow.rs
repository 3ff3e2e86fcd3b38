use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// A directed "follows" edge: `follower_id` follows `followed_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Follow {
    pub follower_id: Uuid,
    pub followed_id: Uuid,
}

impl Follow {
    /// Build an edge between two distinct users.
    pub fn new(follower_id: Uuid, followed_id: Uuid) -> Result<Self, DomainError> {
        if follower_id == followed_id {
            return Err(DomainError::Validation(
                "Users cannot follow themselves".to_string(),
            ));
        }
        Ok(Self {
            follower_id,
            followed_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_follow_is_rejected() {
        let id = Uuid::new_v4();
        assert!(matches!(Follow::new(id, id), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_edge_is_directed() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let edge = Follow::new(a, b).unwrap();
        assert_eq!(edge.follower_id, a);
        assert_eq!(edge.followed_id, b);
        assert_ne!(edge, Follow::new(b, a).unwrap());
    }
}
