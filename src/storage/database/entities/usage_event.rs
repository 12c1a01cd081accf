use crate::core::analytics::UsageEvent;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One metered provider call
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "usage_events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub actor_id: String,

    pub provider: String,

    pub model: String,

    /// health_check or user_request
    pub request_type: String,

    pub input_tokens: i32,

    pub output_tokens: i32,

    pub cost_usd: f64,

    pub latency_ms: i64,

    pub success: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn from_domain(event: &UsageEvent) -> ActiveModel {
        ActiveModel {
            id: Set(event.id),
            actor_id: Set(event.actor_id.clone()),
            provider: Set(event.provider.as_str().to_string()),
            model: Set(event.model.clone()),
            request_type: Set(event.request_type.as_str().to_string()),
            input_tokens: Set(i32::try_from(event.input_tokens).unwrap_or(i32::MAX)),
            output_tokens: Set(i32::try_from(event.output_tokens).unwrap_or(i32::MAX)),
            cost_usd: Set(event.cost_usd),
            latency_ms: Set(i64::try_from(event.latency_ms).unwrap_or(i64::MAX)),
            success: Set(event.success),
            created_at: Set(event.created_at.into()),
        }
    }
}
