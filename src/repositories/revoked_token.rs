use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, ColumnTrait, Set};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entity::revoked_token::{ActiveModel, Column, Entity as RevokedTokenEntity};
use crate::error::{AppError, AppResult};

/// Denylist store for revoked refresh tokens
pub struct RevokedTokenRepository;

impl RevokedTokenRepository {
    /// Record a refresh token as revoked. Revoking the same token twice is
    /// reported as a conflict so logout can surface it as a token error.
    /// Each revocation also drops denylist rows whose tokens have expired,
    /// since an expired token is rejected by signature checks anyway.
    pub async fn revoke(
        db: &DatabaseConnection,
        jti: Uuid,
        expires_at: OffsetDateTime,
    ) -> AppResult<()> {
        Self::purge_expired(db).await?;

        let model = ActiveModel {
            jti: Set(jti),
            expires_at: Set(expires_at),
            revoked_at: Set(OffsetDateTime::now_utc()),
        };

        model.insert(db).await.map_err(|e| {
            if e.to_string().contains("duplicate key") || e.to_string().contains("UNIQUE")
                || e.to_string().contains("unique")
            {
                AppError::InvalidRefreshToken
            } else {
                AppError::Database(e.to_string())
            }
        })?;

        Ok(())
    }

    /// Delete denylist rows whose tokens have expired
    pub async fn purge_expired(db: &DatabaseConnection) -> AppResult<u64> {
        let result = RevokedTokenEntity::delete_many()
            .filter(Column::ExpiresAt.lt(OffsetDateTime::now_utc()))
            .exec(db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Check whether a refresh token's JWT ID has been revoked
    pub async fn is_revoked(db: &DatabaseConnection, jti: Uuid) -> AppResult<bool> {
        let count = RevokedTokenEntity::find()
            .filter(Column::Jti.eq(jti))
            .count(db)
            .await?;

        Ok(count > 0)
    }
}
