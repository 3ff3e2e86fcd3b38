//! Application state - shared across all handlers.

use std::sync::Arc;

use sea_orm::DbErr;

use blogpost_core::domain::PageRequest;
use blogpost_core::ports::{FollowRepository, PostRepository, UserRepository};
use blogpost_infra::{
    DatabaseConnections, SqlFollowRepository, SqlPostRepository, SqlUserRepository,
};
use migration::{Migrator, MigratorTrait};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub follows: Arc<dyn FollowRepository>,
    pub db: Arc<DatabaseConnections>,
    pub posts_per_page: u64,
}

impl AppState {
    /// Connect to the database and build the repositories.
    pub async fn new(config: &AppConfig) -> Result<Self, DbErr> {
        let connections = DatabaseConnections::init(&config.database).await?;

        if config.auto_migrate {
            tracing::info!("Applying pending migrations");
            Migrator::up(&connections.main, None).await?;
        }

        let state = Self::from_connections(connections, config.posts_per_page);
        tracing::info!("Application state initialized");

        Ok(state)
    }

    pub fn from_connections(connections: DatabaseConnections, posts_per_page: u64) -> Self {
        let main = connections.main.clone();

        Self {
            users: Arc::new(SqlUserRepository::new(main.clone())),
            posts: Arc::new(SqlPostRepository::new(main.clone())),
            follows: Arc::new(SqlFollowRepository::new(main)),
            db: Arc::new(connections),
            posts_per_page,
        }
    }

    /// Page request for a 1-based `page` query parameter, using the configured page size.
    pub fn page(&self, page: Option<u64>) -> PageRequest {
        PageRequest::new(page.unwrap_or(1), self.posts_per_page)
    }
}
