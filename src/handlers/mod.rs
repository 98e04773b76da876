pub mod auth;
pub mod common;
pub mod hazard_report;

pub use auth::{
    login, logout, refresh, register, AccessTokenResponse, LoginRequest, LoginResponse,
    MessageResponse, RefreshTokenRequest, RegisterRequest, RegisterResponse,
};
pub use common::ReportListParams;
pub use hazard_report::{
    create_report, delete_report, get_report, list_approved_reports, list_pending_reports,
    list_reports, update_report, CreateReportRequest, HazardReportResponse, UpdateReportRequest,
};
