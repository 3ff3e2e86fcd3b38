//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} {key}")]
    NotFound {
        entity_type: &'static str,
        key: String,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),
}

impl DomainError {
    pub fn not_found(entity_type: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            key: key.into(),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
