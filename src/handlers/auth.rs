use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::models::{CreateUser, LoginUserResponse, UserResponse};
use crate::repositories::{RevokedTokenRepository, UserRepository};
use crate::services::AuthService;
use crate::state::AppState;
use crate::validation;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub user: UserResponse,
    pub refresh: String,
    pub access: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub refresh: String,
    pub access: String,
    pub user: LoginUserResponse,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RefreshTokenRequest {
    pub refresh: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccessTokenResponse {
    pub access: String,
}

// ============ Handlers ============

/// Register a new user
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = RegisterResponse),
        (status = 400, description = "Validation error or email already registered")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    validation::ensure(validation::registration(
        &payload.email,
        &payload.password,
        &payload.name,
    ))?;

    // Hash password
    let password_hash = AuthService::hash_password(&payload.password)?;

    // Create user; a racing duplicate registration loses on the unique
    // email constraint and surfaces as a conflict
    let create_user = CreateUser {
        email: payload.email,
        name: Some(payload.name),
    };

    let user = UserRepository::create(&state.db, &create_user, &password_hash).await?;

    // Issue access/refresh token pair
    let tokens = AuthService::generate_token_pair(&user, &state.config)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: user.into(),
            refresh: tokens.refresh,
            access: tokens.access,
        }),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Wrong email or password")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    // Find user by email; never reveal which of the two fields was wrong.
    // Only an absent user becomes a credential error, storage failures
    // still surface as 500s.
    let user = UserRepository::find_by_email(&state.db, &payload.email)
        .await
        .map_err(|err| match err {
            AppError::NotFound(_) => AppError::InvalidCredentials,
            other => other,
        })?;

    // Verify password
    let is_valid = AuthService::verify_password(&payload.password, &user.password)?;
    if !is_valid {
        return Err(AppError::InvalidCredentials);
    }

    // Issue access/refresh token pair
    let tokens = AuthService::generate_token_pair(&user, &state.config)?;

    Ok(Json(LoginResponse {
        refresh: tokens.refresh,
        access: tokens.access,
        user: user.into(),
    }))
}

/// Logout: revoke a refresh token so it can no longer mint access tokens
#[utoipa::path(
    post,
    path = "/logout",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Logout successful", body = MessageResponse),
        (status = 400, description = "Missing, malformed or already revoked token")
    ),
    tag = "Auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> AppResult<Json<MessageResponse>> {
    let token = payload
        .refresh
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("Refresh token is required".to_string()))?;

    let claims = AuthService::verify_refresh_token(&token, &state.config)?;

    if RevokedTokenRepository::is_revoked(&state.db, claims.jti).await? {
        return Err(AppError::InvalidRefreshToken);
    }

    let expires_at = AuthService::claims_expiry(&claims)?;
    RevokedTokenRepository::revoke(&state.db, claims.jti, expires_at).await?;

    Ok(Json(MessageResponse {
        message: "Logout successful".to_string(),
    }))
}

/// Exchange a refresh token for a new access token
#[utoipa::path(
    post,
    path = "/refresh",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "New access token", body = AccessTokenResponse),
        (status = 400, description = "Missing, malformed or revoked token")
    ),
    tag = "Auth"
)]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> AppResult<Json<AccessTokenResponse>> {
    let token = payload
        .refresh
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("Refresh token is required".to_string()))?;

    let claims = AuthService::verify_refresh_token(&token, &state.config)?;

    if RevokedTokenRepository::is_revoked(&state.db, claims.jti).await? {
        return Err(AppError::InvalidRefreshToken);
    }

    // Re-read the user so a staff change takes effect on the next access
    // token. A vanished user invalidates the token; storage failures do not.
    let user = UserRepository::find_by_user_id(&state.db, claims.sub)
        .await
        .map_err(|err| match err {
            AppError::NotFound(_) => AppError::InvalidRefreshToken,
            other => other,
        })?;

    let access = AuthService::generate_access_token(&user, &state.config)?;

    Ok(Json(AccessTokenResponse { access }))
}
