// Library crate for the hazard-map backend
// Exports modules for use by the server binary and tests

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod middlewares;
pub mod migration;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod validation;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handlers::{
    create_report, delete_report, get_report, list_approved_reports, list_pending_reports,
    list_reports, login, logout, refresh, register, update_report,
};
use crate::middlewares::{auth_middleware, policy_middleware};
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    // Hazard report routes share one policy: anonymous read, authenticated
    // create, staff update/delete. The auth layer resolves the caller (if
    // any), the policy layer rules on the method.
    let report_routes = Router::new()
        .route("/", get(list_reports).post(create_report))
        .route("/pending", get(list_pending_reports))
        .route("/approve", get(list_approved_reports))
        .route(
            "/{id}",
            get(get_report)
                .put(update_report)
                .patch(update_report)
                .delete(delete_report),
        )
        .route_layer(middleware::from_fn(policy_middleware))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(|| async { "Hazard Map API" }))
        // Identity routes
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/refresh", post(refresh))
        // Hazard report routes
        .nest("/reports", report_routes)
        .with_state(state)
}
