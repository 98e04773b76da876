use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::ReportListParams;
use crate::middlewares::AuthUser;
use crate::models::{CreateHazardReport, HazardReport, UpdateHazardReport};
use crate::repositories::{HazardReportRepository, Repository, UserRepository};
use crate::state::AppState;
use crate::validation;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReportRequest {
    /// Reporting user's UUID; taken from the body, not the session
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub street_name: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub report_type: Option<String>,
    pub status: Option<String>,
    pub severity: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateReportRequest {
    pub name: Option<String>,
    pub street_name: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub report_type: Option<String>,
    pub status: Option<String>,
    pub severity: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HazardReportResponse {
    pub id: Uuid,
    pub name: String,
    pub street_name: String,
    pub latitude: String,
    pub longitude: String,
    pub description: String,
    #[serde(rename = "type")]
    pub report_type: String,
    pub status: String,
    pub severity: String,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub updated_at: time::OffsetDateTime,
}

// `user_id` is write-only: accepted on create, never serialized back
impl From<HazardReport> for HazardReportResponse {
    fn from(r: HazardReport) -> Self {
        Self {
            id: r.id,
            name: r.name,
            street_name: r.street_name,
            latitude: r.latitude,
            longitude: r.longitude,
            description: r.description,
            report_type: r.report_type,
            status: r.status,
            severity: r.severity,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

fn to_response_list(reports: Vec<HazardReport>) -> Json<Vec<HazardReportResponse>> {
    Json(reports.into_iter().map(|r| r.into()).collect())
}

// ============ Handlers ============

/// List hazard reports with optional search, ordering and user filter
#[utoipa::path(
    get,
    path = "/reports",
    params(ReportListParams),
    responses(
        (status = 200, description = "List of hazard reports", body = [HazardReportResponse]),
        (status = 400, description = "Malformed user_id or ordering field")
    ),
    tag = "Hazard Reports"
)]
pub async fn list_reports(
    State(state): State<AppState>,
    Query(params): Query<ReportListParams>,
) -> AppResult<Json<Vec<HazardReportResponse>>> {
    let filter = params.into_filter(None)?;
    let reports = HazardReportRepository::list(&state.db, &filter).await?;
    Ok(to_response_list(reports))
}

/// List hazard reports awaiting moderation
#[utoipa::path(
    get,
    path = "/reports/pending",
    params(ReportListParams),
    responses(
        (status = 200, description = "Pending hazard reports", body = [HazardReportResponse]),
        (status = 400, description = "Malformed user_id or ordering field")
    ),
    tag = "Hazard Reports"
)]
pub async fn list_pending_reports(
    State(state): State<AppState>,
    Query(params): Query<ReportListParams>,
) -> AppResult<Json<Vec<HazardReportResponse>>> {
    let filter = params.into_filter(Some("pending"))?;
    let reports = HazardReportRepository::list(&state.db, &filter).await?;
    Ok(to_response_list(reports))
}

/// List hazard reports that passed moderation
#[utoipa::path(
    get,
    path = "/reports/approve",
    params(ReportListParams),
    responses(
        (status = 200, description = "Approved hazard reports", body = [HazardReportResponse]),
        (status = 400, description = "Malformed user_id or ordering field")
    ),
    tag = "Hazard Reports"
)]
pub async fn list_approved_reports(
    State(state): State<AppState>,
    Query(params): Query<ReportListParams>,
) -> AppResult<Json<Vec<HazardReportResponse>>> {
    let filter = params.into_filter(Some("approved"))?;
    let reports = HazardReportRepository::list(&state.db, &filter).await?;
    Ok(to_response_list(reports))
}

/// Get a hazard report by ID
#[utoipa::path(
    get,
    path = "/reports/{id}",
    params(
        ("id" = Uuid, Path, description = "Hazard report ID")
    ),
    responses(
        (status = 200, description = "Hazard report details", body = HazardReportResponse),
        (status = 404, description = "Hazard report not found")
    ),
    tag = "Hazard Reports"
)]
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<HazardReportResponse>> {
    let report = HazardReportRepository::find_by_id(&state.db, id).await?;
    Ok(Json(report.into()))
}

/// Create a new hazard report
#[utoipa::path(
    post,
    path = "/reports",
    request_body = CreateReportRequest,
    responses(
        (status = 201, description = "Hazard report created", body = HazardReportResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Hazard Reports"
)]
pub async fn create_report(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateReportRequest>,
) -> AppResult<(StatusCode, Json<HazardReportResponse>)> {
    let latitude = payload.latitude.unwrap_or_default();
    let longitude = payload.longitude.unwrap_or_default();

    let mut errors: Vec<validation::FieldError> = [
        validation::required("latitude", &latitude),
        validation::required("longitude", &longitude),
    ]
    .into_iter()
    .flatten()
    .collect();
    if errors.is_empty() {
        errors.extend(validation::coordinate_pair(
            Some(latitude.as_str()),
            Some(longitude.as_str()),
        ));
    }
    validation::ensure(errors)?;

    // Ownership is taken from the payload, not derived from the session
    let user_id = match payload.user_id.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => {
            let id = Uuid::parse_str(raw)
                .map_err(|_| AppError::Validation("user_id must be a valid UUID".to_string()))?;
            if !UserRepository::exists(&state.db, id).await? {
                return Err(AppError::Validation(
                    "user_id does not reference an existing user".to_string(),
                ));
            }
            Some(id)
        }
        None => None,
    };

    let create_report = CreateHazardReport {
        user_id,
        name: payload.name.unwrap_or_default(),
        street_name: payload.street_name.unwrap_or_default(),
        latitude,
        longitude,
        description: payload.description.unwrap_or_default(),
        report_type: payload.report_type.unwrap_or_default(),
        status: payload.status.unwrap_or_else(|| "pending".to_string()),
        severity: payload.severity.unwrap_or_default(),
    };

    let report = HazardReportRepository::create(&state.db, &create_report).await?;
    Ok((StatusCode::CREATED, Json(report.into())))
}

/// Update a hazard report (full or partial, admin only)
#[utoipa::path(
    put,
    path = "/reports/{id}",
    params(
        ("id" = Uuid, Path, description = "Hazard report ID")
    ),
    request_body = UpdateReportRequest,
    responses(
        (status = 200, description = "Hazard report updated", body = HazardReportResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Hazard report not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Hazard Reports"
)]
pub async fn update_report(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateReportRequest>,
) -> AppResult<Json<HazardReportResponse>> {
    // Range check only applies when the payload carries both coordinates
    validation::ensure(validation::coordinate_pair(
        payload.latitude.as_deref(),
        payload.longitude.as_deref(),
    ))?;

    let update_report = UpdateHazardReport {
        name: payload.name,
        street_name: payload.street_name,
        latitude: payload.latitude,
        longitude: payload.longitude,
        description: payload.description,
        report_type: payload.report_type,
        status: payload.status,
        severity: payload.severity,
    };

    let report = HazardReportRepository::update(&state.db, id, &update_report).await?;
    Ok(Json(report.into()))
}

/// Delete a hazard report (admin only)
#[utoipa::path(
    delete,
    path = "/reports/{id}",
    params(
        ("id" = Uuid, Path, description = "Hazard report ID")
    ),
    responses(
        (status = 204, description = "Hazard report deleted"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Hazard report not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Hazard Reports"
)]
pub async fn delete_report(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    HazardReportRepository::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
