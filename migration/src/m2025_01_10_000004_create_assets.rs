//! Migration to create the assets table.
//!
//! The current_assignee column is the asset's pointer half of the assignment
//! invariant; only the assignment service writes it.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Assets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Assets::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Assets::Name).text().not_null())
                    .col(ColumnDef::new(Assets::Description).text().not_null())
                    .col(ColumnDef::new(Assets::TypeId).uuid().not_null())
                    .col(ColumnDef::new(Assets::SerialNo).text().not_null())
                    .col(
                        ColumnDef::new(Assets::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Assets::CurrentAssignee).uuid().null())
                    .col(
                        ColumnDef::new(Assets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Assets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assets_type_id")
                            .from(Assets::Table, Assets::TypeId)
                            .to(AssetTypes::Table, AssetTypes::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assets_current_assignee")
                            .from(Assets::Table, Assets::CurrentAssignee)
                            .to(Employees::Table, Employees::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assets_current_assignee")
                    .table(Assets::Table)
                    .col(Assets::CurrentAssignee)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Assets::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Assets {
    Table,
    Id,
    Name,
    Description,
    TypeId,
    SerialNo,
    IsActive,
    CurrentAssignee,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AssetTypes {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
}
