use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub user_id: Uuid,
    pub email: String,
    #[serde(skip_serializing)] // Never expose password hash
    pub password: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
}

/// User creation DTO (server fills ids and flags)
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub name: Option<String>,
}

/// Public user projection returned by register
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// Public user projection returned by login
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginUserResponse {
    pub id: i32,
    pub email: String,
    pub full_name: String,
}

impl From<User> for LoginUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.name.unwrap_or_default(),
        }
    }
}
