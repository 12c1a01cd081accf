use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProviderHealth::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProviderHealth::Provider)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProviderHealth::Status).string().not_null())
                    .col(
                        ColumnDef::new(ProviderHealth::UptimePercent)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProviderHealth::ErrorRatePercent)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProviderHealth::AvgLatencyMs)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProviderHealth::LastCheckedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProviderHealth::LastIncidentAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ProviderHealth::IncidentDescription)
                            .text()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProviderHealth::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProviderHealth {
    Table,
    Provider,
    Status,
    UptimePercent,
    ErrorRatePercent,
    AvgLatencyMs,
    LastCheckedAt,
    LastIncidentAt,
    IncidentDescription,
}
