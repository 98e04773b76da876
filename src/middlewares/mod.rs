pub mod auth;
pub mod policy;

pub use auth::{auth_middleware, AuthUser};
pub use policy::{allow, policy_middleware};
