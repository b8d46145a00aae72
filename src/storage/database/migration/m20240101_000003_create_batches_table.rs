use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Batches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Batches::Id)
                            .string_len(255)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Batches::Object).string_len(50).not_null())
                    .col(ColumnDef::new(Batches::Endpoint).string_len(255).not_null())
                    .col(ColumnDef::new(Batches::InputFileId).string_len(255).null())
                    .col(
                        ColumnDef::new(Batches::CompletionWindow)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Batches::Status)
                            .string_len(50)
                            .not_null()
                            .default("validating"),
                    )
                    .col(ColumnDef::new(Batches::OutputFileId).string_len(255).null())
                    .col(ColumnDef::new(Batches::ErrorFileId).string_len(255).null())
                    .col(
                        ColumnDef::new(Batches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Batches::InProgressAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Batches::FinalizingAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Batches::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Batches::FailedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Batches::ExpiredAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Batches::CancellingAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Batches::CancelledAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Batches::RequestCountsTotal)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Batches::RequestCountsCompleted)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Batches::RequestCountsFailed)
                            .integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Batches::Metadata).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_batches_status")
                    .table(Batches::Table)
                    .col(Batches::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Batches::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Batches {
    Table,
    Id,
    Object,
    Endpoint,
    InputFileId,
    CompletionWindow,
    Status,
    OutputFileId,
    ErrorFileId,
    CreatedAt,
    InProgressAt,
    FinalizingAt,
    CompletedAt,
    FailedAt,
    ExpiredAt,
    CancellingAt,
    CancelledAt,
    RequestCountsTotal,
    RequestCountsCompleted,
    RequestCountsFailed,
    Metadata,
}
