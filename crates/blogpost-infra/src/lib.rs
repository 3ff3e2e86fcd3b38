//! # Blogpost Infrastructure
//!
//! Concrete implementations of the ports defined in `blogpost-core`.
//! This crate contains the database layer and the credential services.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `database` - PostgreSQL / SQLite support via SeaORM
//! - `auth` - JWT + Argon2 authentication

#[cfg(feature = "database")]
pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "database")]
pub use database::{
    DatabaseConfig, DatabaseConnections, SqlFollowRepository, SqlPostRepository,
    SqlUserRepository,
};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
