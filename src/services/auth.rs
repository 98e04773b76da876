use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::User;

pub const TOKEN_USE_ACCESS: &str = "access";
pub const TOKEN_USE_REFRESH: &str = "refresh";

/// JWT Claims structure (shared by access and refresh tokens)
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // public user id (`user.user_id`)
    pub email: String,
    pub staff: bool,
    pub token_use: String,
    pub jti: Uuid,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

/// Access/refresh token pair issued on register and login
#[derive(Debug)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

pub struct AuthService;

impl AuthService {
    /// Hash a password using Argon2
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        Ok(hash.to_string())
    }

    /// Verify a password against a hash
    pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;

        let result = Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok();

        Ok(result)
    }

    /// Issue a fresh access/refresh token pair for a user
    pub fn generate_token_pair(user: &User, config: &Config) -> AppResult<TokenPair> {
        let access = Self::generate_access_token(user, config)?;
        let refresh = Self::generate_token(
            user,
            TOKEN_USE_REFRESH,
            Duration::days(config.refresh_token_days),
            config,
        )?;

        Ok(TokenPair { access, refresh })
    }

    /// Issue a new access token (used by login, register and refresh)
    pub fn generate_access_token(user: &User, config: &Config) -> AppResult<String> {
        Self::generate_token(
            user,
            TOKEN_USE_ACCESS,
            Duration::minutes(config.access_token_minutes),
            config,
        )
    }

    fn generate_token(
        user: &User,
        token_use: &str,
        ttl: Duration,
        config: &Config,
    ) -> AppResult<String> {
        let now = OffsetDateTime::now_utc();

        let claims = Claims {
            sub: user.user_id,
            email: user.email.clone(),
            staff: user.is_staff,
            token_use: token_use.to_string(),
            jti: Uuid::new_v4(),
            exp: (now + ttl).unix_timestamp(),
            iat: now.unix_timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(token)
    }

    /// Verify signature and expiry of an access token
    pub fn verify_access_token(token: &str, config: &Config) -> AppResult<Claims> {
        let claims = Self::verify_token(token, config)?;

        if claims.token_use != TOKEN_USE_ACCESS {
            return Err(AppError::InvalidToken);
        }

        Ok(claims)
    }

    /// Verify signature and expiry of a refresh token. Denylist lookup is the
    /// caller's job; this only proves the token itself is well-formed.
    pub fn verify_refresh_token(token: &str, config: &Config) -> AppResult<Claims> {
        let claims = Self::verify_token(token, config).map_err(|_| AppError::InvalidRefreshToken)?;

        if claims.token_use != TOKEN_USE_REFRESH {
            return Err(AppError::InvalidRefreshToken);
        }

        Ok(claims)
    }

    fn verify_token(token: &str, config: &Config) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Expiry of a verified claim set as a timestamp
    pub fn claims_expiry(claims: &Claims) -> AppResult<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(claims.exp)
            .map_err(|e| AppError::Internal(format!("Invalid token expiry: {}", e)))
    }
}
