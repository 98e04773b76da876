use axum_test::TestServer;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;

use hazard_map::build_router;
use hazard_map::config::Config;
use hazard_map::migration::Migrator;
use hazard_map::state::AppState;

/// Test configuration
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-jwt-secret-that-is-at-least-32-characters-long".to_string(),
        access_token_minutes: 60,
        refresh_token_days: 7,
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

/// Test application wrapper
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application backed by an in-memory SQLite database
    pub async fn new() -> Self {
        let config = test_config();

        // A single connection so every query sees the same in-memory database
        let mut opt = ConnectOptions::new(&config.database_url);
        opt.max_connections(1);

        let db = Database::connect(opt)
            .await
            .expect("Failed to connect to in-memory database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let state = AppState::with_connection(config, db);

        let router = build_router(state.clone());
        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, state }
    }
}
