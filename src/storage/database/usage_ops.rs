use super::SeaOrmStore;
use super::entities::{self, usage_event};
use crate::core::analytics::{UsageEvent, UsageSink};
use crate::utils::error::Result;
use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use tracing::debug;

#[async_trait]
impl UsageSink for SeaOrmStore {
    async fn record_usage(&self, event: &UsageEvent) -> Result<()> {
        debug!("Recording usage event {} for {}", event.id, event.provider);

        entities::UsageEvent::insert(usage_event::Model::from_domain(event))
            .exec_without_returning(self.connection())
            .await?;
        Ok(())
    }
}

impl SeaOrmStore {
    /// Most recent usage rows, newest first
    pub async fn recent_usage(&self, limit: u64) -> Result<Vec<usage_event::Model>> {
        let rows = entities::UsageEvent::find()
            .order_by_desc(usage_event::Column::CreatedAt)
            .limit(limit)
            .all(self.connection())
            .await?;
        Ok(rows)
    }

    /// Number of usage rows attributed to `actor_id`
    pub async fn usage_count_for_actor(&self, actor_id: &str) -> Result<u64> {
        let count = entities::UsageEvent::find()
            .filter(usage_event::Column::ActorId.eq(actor_id))
            .count(self.connection())
            .await?;
        Ok(count)
    }
}
