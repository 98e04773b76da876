use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::config::Config;
use crate::migration::Migrator;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState: connect to the database and apply migrations
    pub async fn new(config: Config) -> Result<Self, AppStateError> {
        let mut opt = ConnectOptions::new(&config.database_url);
        opt.max_connections(100)
            .min_connections(5)
            .sqlx_logging(true);

        let db = Database::connect(opt)
            .await
            .map_err(|e| AppStateError::Connection(e.to_string()))?;

        Migrator::up(&db, None)
            .await
            .map_err(|e| AppStateError::Migration(e.to_string()))?;

        Ok(Self { db, config })
    }

    /// Create AppState around an existing connection (for testing)
    pub fn with_connection(config: Config, db: DatabaseConnection) -> Self {
        Self { db, config }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Migration error: {0}")]
    Migration(String),
}
