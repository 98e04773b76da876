pub mod hazard_report;
pub mod user;

pub use hazard_report::*;
pub use user::*;
