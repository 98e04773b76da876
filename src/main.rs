use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use hazard_map::config::Config;
use hazard_map::handlers::{
    AccessTokenResponse, CreateReportRequest, HazardReportResponse, LoginRequest, LoginResponse,
    MessageResponse, RefreshTokenRequest, RegisterRequest, RegisterResponse, UpdateReportRequest,
};
use hazard_map::models::{LoginUserResponse, UserResponse};
use hazard_map::state::AppState;
use hazard_map::{build_router, handlers};

/// Security scheme for Bearer token
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::refresh,
        handlers::hazard_report::list_reports,
        handlers::hazard_report::list_pending_reports,
        handlers::hazard_report::list_approved_reports,
        handlers::hazard_report::get_report,
        handlers::hazard_report::create_report,
        handlers::hazard_report::update_report,
        handlers::hazard_report::delete_report,
    ),
    components(schemas(
        RegisterRequest,
        RegisterResponse,
        LoginRequest,
        LoginResponse,
        RefreshTokenRequest,
        MessageResponse,
        AccessTokenResponse,
        UserResponse,
        LoginUserResponse,
        CreateReportRequest,
        UpdateReportRequest,
        HazardReportResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration, login and token lifecycle"),
        (name = "Hazard Reports", description = "Geolocated hazard reports with moderation status")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    let addr = config.server_addr();

    // Initialize application state (connects to the database and migrates)
    tracing::info!("Connecting to database...");
    let state = AppState::new(config)
        .await
        .expect("Failed to initialize application state");
    tracing::info!("Database connection established");

    // Build the main application router
    let app = build_router(state)
        // Add Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(listener, app).await.unwrap();
}
