use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DbConn, DbErr};

/// Configuration for the application database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub sql_logging: bool,
}

impl DatabaseConfig {
    /// Configuration for a throwaway in-memory SQLite database.
    ///
    /// Every pooled connection to `sqlite::memory:` opens its own database,
    /// so the pool is pinned to a single connection.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            sql_logging: false,
        }
    }
}

/// Connection pool for the application database.
///
/// # Example
/// ```ignore
/// let db = DatabaseConnections::init(&config).await?;
/// let users = SqlUserRepository::new(db.main.clone());
/// ```
pub struct DatabaseConnections {
    pub main: DbConn,
}

impl DatabaseConnections {
    /// Open the connection pool described by `config`.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(config.sql_logging)
            .to_owned();

        let main = Database::connect(opts).await?;
        tracing::info!(
            backend = ?main.get_database_backend(),
            pool = config.max_connections,
            "Database connected"
        );

        Ok(Self { main })
    }

    pub fn backend(&self) -> DatabaseBackend {
        self.main.get_database_backend()
    }
}
