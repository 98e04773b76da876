pub mod auth;

pub use auth::{AuthService, Claims, TokenPair, TOKEN_USE_ACCESS, TOKEN_USE_REFRESH};
