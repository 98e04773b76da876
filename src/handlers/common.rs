use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{ReportFilter, ReportOrdering};

/// Query parameters accepted by the report list views
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ReportListParams {
    /// Case-insensitive substring match across name, street_name,
    /// description, type, status and severity
    pub search: Option<String>,
    /// One of created_at, updated_at, street_name, status; '-' prefix for
    /// descending. Defaults to -created_at.
    pub ordering: Option<String>,
    /// Exact filter on the reporting user's UUID
    pub user_id: Option<String>,
}

impl ReportListParams {
    /// Validate the raw query parameters into a repository filter
    pub fn into_filter(self, status: Option<&str>) -> AppResult<ReportFilter> {
        let user_id = match self.user_id.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => Some(
                Uuid::parse_str(raw)
                    .map_err(|_| AppError::Validation("user_id must be a valid UUID".to_string()))?,
            ),
            None => None,
        };

        let ordering = match self.ordering.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => Some(ReportOrdering::parse(raw).map_err(AppError::Validation)?),
            None => None,
        };

        Ok(ReportFilter {
            status: status.map(str::to_string),
            user_id,
            search: self.search.filter(|s| !s.is_empty()),
            ordering,
        })
    }
}
