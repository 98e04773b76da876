pub mod hazard_report;
pub mod revoked_token;
pub mod user;
