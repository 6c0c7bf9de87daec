//! Migration to create the assignment_history ledger table.
//!
//! Rows are append-only; there is no update path in the application and no
//! cascade from employee deletion.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AssignmentHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssignmentHistory::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AssignmentHistory::AssetId).uuid().not_null())
                    .col(
                        ColumnDef::new(AssignmentHistory::PreviousAssignee)
                            .uuid()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentHistory::CurrentAssignee)
                            .uuid()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentHistory::AssignedDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assignment_history_asset_id")
                            .from(AssignmentHistory::Table, AssignmentHistory::AssetId)
                            .to(Assets::Table, Assets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // History queries always filter by asset and order by date.
        manager
            .create_index(
                Index::create()
                    .name("idx_assignment_history_asset_date")
                    .table(AssignmentHistory::Table)
                    .col(AssignmentHistory::AssetId)
                    .col(AssignmentHistory::AssignedDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AssignmentHistory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AssignmentHistory {
    Table,
    Id,
    AssetId,
    PreviousAssignee,
    CurrentAssignee,
    AssignedDate,
}

#[derive(DeriveIden)]
enum Assets {
    Table,
    Id,
}
