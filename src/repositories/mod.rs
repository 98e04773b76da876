pub mod hazard_report;
pub mod revoked_token;
pub mod user;

pub use hazard_report::HazardReportRepository;
pub use revoked_token::RevokedTokenRepository;
pub use user::UserRepository;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::error::AppResult;

/// Base repository trait for UUID-keyed resources
#[async_trait]
pub trait Repository<T>
where
    T: Send + Sync,
{
    /// Find entity by ID
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<T>;

    /// Delete entity by ID (hard delete)
    async fn delete(db: &DatabaseConnection, id: Uuid) -> AppResult<()>;
}
