use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    /// Surrogate primary key; `user_id` below identifies the same row
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC string, never plaintext
    pub password: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::hazard_report::Entity")]
    HazardReports,
}

impl Related<super::hazard_report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HazardReports.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
