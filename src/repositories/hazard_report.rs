use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order, QueryFilter,
    QueryOrder, Set,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entity::hazard_report::{self, ActiveModel, Column, Entity as ReportEntity};
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateHazardReport, HazardReport, ReportFilter, ReportOrdering, SortField, UpdateHazardReport,
};
use crate::repositories::Repository;

/// Hazard report repository for database operations
pub struct HazardReportRepository;

#[async_trait]
impl Repository<HazardReport> for HazardReportRepository {
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<HazardReport> {
        let model = ReportEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Hazard report".to_string()))?;

        Ok(model.into())
    }

    async fn delete(db: &DatabaseConnection, id: Uuid) -> AppResult<()> {
        let result = ReportEntity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Hazard report".to_string()));
        }

        Ok(())
    }
}

impl HazardReportRepository {
    /// Create a new hazard report
    pub async fn create(
        db: &DatabaseConnection,
        input: &CreateHazardReport,
    ) -> AppResult<HazardReport> {
        // A single timestamp so created_at == updated_at on a fresh row
        let now = OffsetDateTime::now_utc();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            name: Set(input.name.clone()),
            street_name: Set(input.street_name.clone()),
            latitude: Set(input.latitude.clone()),
            longitude: Set(input.longitude.clone()),
            description: Set(input.description.clone()),
            report_type: Set(input.report_type.clone()),
            status: Set(input.status.clone()),
            severity: Set(input.severity.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }

    /// List reports matching a filter; no pagination, the full result set
    /// comes back in one call.
    pub async fn list(db: &DatabaseConnection, filter: &ReportFilter) -> AppResult<Vec<HazardReport>> {
        let mut query = ReportEntity::find();

        if let Some(status) = &filter.status {
            query = query.filter(Column::Status.eq(status.as_str()));
        }

        if let Some(user_id) = filter.user_id {
            query = query.filter(Column::UserId.eq(user_id));
        }

        if let Some(term) = filter.search.as_deref().filter(|t| !t.is_empty()) {
            let mut any = Condition::any();
            for column in [
                Column::Name,
                Column::StreetName,
                Column::Description,
                Column::ReportType,
                Column::Status,
                Column::Severity,
            ] {
                any = any.add(contains_ci(column, term));
            }
            query = query.filter(any);
        }

        let ordering = filter.ordering.unwrap_or_default();
        let (column, order) = order_by(ordering);
        query = query.order_by(column, order);

        let models = query.all(db).await?;
        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Update a report (full or partial); refreshes `updated_at`
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        input: &UpdateHazardReport,
    ) -> AppResult<HazardReport> {
        let model = ReportEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Hazard report".to_string()))?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = &input.name {
            active.name = Set(name.clone());
        }
        if let Some(street_name) = &input.street_name {
            active.street_name = Set(street_name.clone());
        }
        if let Some(latitude) = &input.latitude {
            active.latitude = Set(latitude.clone());
        }
        if let Some(longitude) = &input.longitude {
            active.longitude = Set(longitude.clone());
        }
        if let Some(description) = &input.description {
            active.description = Set(description.clone());
        }
        if let Some(report_type) = &input.report_type {
            active.report_type = Set(report_type.clone());
        }
        if let Some(status) = &input.status {
            active.status = Set(status.clone());
        }
        if let Some(severity) = &input.severity {
            active.severity = Set(severity.clone());
        }
        active.updated_at = Set(OffsetDateTime::now_utc());

        let result = active.update(db).await?;
        Ok(result.into())
    }
}

/// Case-insensitive literal substring match, portable across Postgres and
/// SQLite. Wildcard characters in the term are escaped so `%` and `_`
/// match themselves.
fn contains_ci(column: Column, term: &str) -> SimpleExpr {
    let escaped = term
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");

    Expr::expr(Func::lower(Expr::col(column)))
        .like(LikeExpr::new(format!("%{}%", escaped)).escape('\\'))
}

fn order_by(ordering: ReportOrdering) -> (Column, Order) {
    let column = match ordering.field {
        SortField::CreatedAt => Column::CreatedAt,
        SortField::UpdatedAt => Column::UpdatedAt,
        SortField::StreetName => Column::StreetName,
        SortField::Status => Column::Status,
    };

    let order = if ordering.descending {
        Order::Desc
    } else {
        Order::Asc
    };

    (column, order)
}

// Conversion from SeaORM model to our domain model
impl From<hazard_report::Model> for HazardReport {
    fn from(m: hazard_report::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            name: m.name,
            street_name: m.street_name,
            latitude: m.latitude,
            longitude: m.longitude,
            description: m.description,
            report_type: m.report_type,
            status: m.status,
            severity: m.severity,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
