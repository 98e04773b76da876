use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardReport {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub street_name: String,
    pub latitude: String,
    pub longitude: String,
    pub description: String,
    pub report_type: String,
    pub status: String,
    pub severity: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateHazardReport {
    pub user_id: Option<Uuid>,
    pub name: String,
    pub street_name: String,
    pub latitude: String,
    pub longitude: String,
    pub description: String,
    pub report_type: String,
    pub status: String,
    pub severity: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateHazardReport {
    pub name: Option<String>,
    pub street_name: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub description: Option<String>,
    pub report_type: Option<String>,
    pub status: Option<String>,
    pub severity: Option<String>,
}

/// Fields a caller may order report listings by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    StreetName,
    Status,
}

/// Parsed `ordering` query parameter (`-` prefix for descending)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOrdering {
    pub field: SortField,
    pub descending: bool,
}

impl Default for ReportOrdering {
    fn default() -> Self {
        // Newest reports first
        Self {
            field: SortField::CreatedAt,
            descending: true,
        }
    }
}

impl ReportOrdering {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let (name, descending) = match raw.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (raw, false),
        };

        let field = match name {
            "created_at" => SortField::CreatedAt,
            "updated_at" => SortField::UpdatedAt,
            "street_name" => SortField::StreetName,
            "status" => SortField::Status,
            _ => {
                return Err(format!(
                    "ordering must be one of created_at, updated_at, street_name, status \
                     (optionally prefixed with '-'), got '{}'",
                    raw
                ))
            }
        };

        Ok(Self { field, descending })
    }
}

/// Query shape for report listings
#[derive(Debug, Default)]
pub struct ReportFilter {
    /// Hard filter applied by the moderation list views
    pub status: Option<String>,
    pub user_id: Option<Uuid>,
    pub search: Option<String>,
    pub ordering: Option<ReportOrdering>,
}
