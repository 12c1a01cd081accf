use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UsageEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UsageEvents::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UsageEvents::ActorId).string().not_null())
                    .col(ColumnDef::new(UsageEvents::Provider).string().not_null())
                    .col(ColumnDef::new(UsageEvents::Model).string().not_null())
                    .col(ColumnDef::new(UsageEvents::RequestType).string().not_null())
                    .col(ColumnDef::new(UsageEvents::InputTokens).integer().not_null())
                    .col(ColumnDef::new(UsageEvents::OutputTokens).integer().not_null())
                    .col(ColumnDef::new(UsageEvents::CostUsd).double().not_null())
                    .col(ColumnDef::new(UsageEvents::LatencyMs).big_integer().not_null())
                    .col(ColumnDef::new(UsageEvents::Success).boolean().not_null())
                    .col(
                        ColumnDef::new(UsageEvents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_usage_events_provider_created_at")
                    .table(UsageEvents::Table)
                    .col(UsageEvents::Provider)
                    .col(UsageEvents::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_usage_events_actor_id")
                    .table(UsageEvents::Table)
                    .col(UsageEvents::ActorId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UsageEvents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UsageEvents {
    Table,
    Id,
    ActorId,
    Provider,
    Model,
    RequestType,
    InputTokens,
    OutputTokens,
    CostUsd,
    LatencyMs,
    Success,
    CreatedAt,
}
