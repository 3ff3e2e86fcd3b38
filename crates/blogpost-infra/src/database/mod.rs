//! Database connection management and SeaORM repositories.

mod connections;
mod sql_base;
mod sql_repo;

pub mod entity;

pub use connections::{DatabaseConfig, DatabaseConnections};
pub use sql_base::SqlBaseRepository;
pub use sql_repo::{SqlFollowRepository, SqlPostRepository, SqlUserRepository};

#[cfg(test)]
mod tests;
