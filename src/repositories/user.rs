use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entity::user::{self, ActiveModel, Column, Entity as UserEntity};
use crate::error::{AppError, AppResult};
use crate::models::{CreateUser, User};

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user. The email uniqueness constraint resolves
    /// concurrent registrations; the loser surfaces as a conflict.
    pub async fn create(
        db: &DatabaseConnection,
        input: &CreateUser,
        password_hash: &str,
    ) -> AppResult<User> {
        let model = ActiveModel {
            user_id: Set(Uuid::new_v4()),
            email: Set(input.email.clone()),
            password: Set(password_hash.to_string()),
            name: Set(input.name.clone()),
            role: Set(None),
            is_active: Set(true),
            is_staff: Set(false),
            ..Default::default()
        };

        let result = model.insert(db).await.map_err(|e| {
            if e.to_string().contains("duplicate key") || e.to_string().contains("UNIQUE")
                || e.to_string().contains("unique")
            {
                AppError::Conflict("Email already registered".to_string())
            } else {
                AppError::Database(e.to_string())
            }
        })?;

        Ok(result.into())
    }

    /// Find user by email (for login)
    pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> AppResult<User> {
        let model = UserEntity::find()
            .filter(Column::Email.eq(email))
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        Ok(model.into())
    }

    /// Find user by public UUID (the JWT subject)
    pub async fn find_by_user_id(db: &DatabaseConnection, user_id: Uuid) -> AppResult<User> {
        let model = UserEntity::find()
            .filter(Column::UserId.eq(user_id))
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        Ok(model.into())
    }

    /// Check whether a public UUID references an existing user
    pub async fn exists(db: &DatabaseConnection, user_id: Uuid) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(Column::UserId.eq(user_id))
            .count(db)
            .await?;

        Ok(count > 0)
    }
}

// Conversion from SeaORM model to our domain model
impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            email: m.email,
            password: m.password,
            name: m.name,
            role: m.role,
            is_active: m.is_active,
            is_staff: m.is_staff,
        }
    }
}
