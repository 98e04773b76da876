use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create user table
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(uuid_uniq(User::UserId))
                    .col(string_uniq(User::Email))
                    .col(string(User::Password))
                    .col(string_null(User::Name))
                    .col(string_null(User::Role))
                    .col(boolean(User::IsActive).default(true))
                    .col(boolean(User::IsStaff).default(false))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_email")
                    .table(User::Table)
                    .col(User::Email)
                    .to_owned(),
            )
            .await?;

        // Create hazard_report table
        manager
            .create_table(
                Table::create()
                    .table(HazardReport::Table)
                    .if_not_exists()
                    .col(pk_uuid(HazardReport::Id))
                    .col(uuid_null(HazardReport::UserId))
                    .col(text(HazardReport::Name).default(""))
                    .col(text(HazardReport::StreetName).default(""))
                    .col(text(HazardReport::Latitude).default(""))
                    .col(text(HazardReport::Longitude).default(""))
                    .col(text(HazardReport::Description).default(""))
                    .col(text(HazardReport::Type).default(""))
                    .col(text(HazardReport::Status).default("pending"))
                    .col(text(HazardReport::Severity).default(""))
                    .col(timestamp_with_time_zone(HazardReport::CreatedAt))
                    .col(timestamp_with_time_zone(HazardReport::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_hazard_report_user")
                            .from(HazardReport::Table, HazardReport::UserId)
                            .to(User::Table, User::UserId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_hazard_report_street_name")
                    .table(HazardReport::Table)
                    .col(HazardReport::StreetName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_hazard_report_created_at")
                    .table(HazardReport::Table)
                    .col(HazardReport::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Create revoked_token table (refresh token denylist)
        manager
            .create_table(
                Table::create()
                    .table(RevokedToken::Table)
                    .if_not_exists()
                    .col(pk_uuid(RevokedToken::Jti))
                    .col(timestamp_with_time_zone(RevokedToken::ExpiresAt))
                    .col(timestamp_with_time_zone(RevokedToken::RevokedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RevokedToken::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HazardReport::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    UserId,
    Email,
    Password,
    Name,
    Role,
    IsActive,
    IsStaff,
}

#[derive(DeriveIden)]
enum HazardReport {
    Table,
    Id,
    UserId,
    Name,
    StreetName,
    Latitude,
    Longitude,
    Description,
    Type,
    Status,
    Severity,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum RevokedToken {
    Table,
    Jti,
    ExpiresAt,
    RevokedAt,
}
