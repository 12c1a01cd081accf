use super::SeaOrmStore;
use super::entities::{self, health_record};
use crate::core::health::ProviderHealthRecord;
use crate::storage::HealthRecordStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{EntityTrait, QueryOrder};
use tracing::{debug, warn};

#[async_trait]
impl HealthRecordStore for SeaOrmStore {
    async fn save_health_record(&self, record: &ProviderHealthRecord) -> Result<()> {
        debug!("Saving health record for {}", record.provider);

        let active_model = health_record::Model::from_domain(record);
        entities::HealthRecord::insert(active_model)
            .on_conflict(
                OnConflict::column(health_record::Column::Provider)
                    .update_columns([
                        health_record::Column::Status,
                        health_record::Column::UptimePercent,
                        health_record::Column::ErrorRatePercent,
                        health_record::Column::AvgLatencyMs,
                        health_record::Column::LastCheckedAt,
                        health_record::Column::LastIncidentAt,
                        health_record::Column::IncidentDescription,
                    ])
                    .to_owned(),
            )
            .exec(self.connection())
            .await?;
        Ok(())
    }

    async fn load_health_records(&self) -> Result<Vec<ProviderHealthRecord>> {
        let models = entities::HealthRecord::find()
            .order_by_asc(health_record::Column::Provider)
            .all(self.connection())
            .await?;

        // A row naming a provider this build does not know is skipped
        let mut records = Vec::with_capacity(models.len());
        for model in models {
            match model.to_domain() {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping unreadable health record: {}", e),
            }
        }
        Ok(records)
    }
}
