use crate::core::health::{HealthStatus, ProviderHealthRecord};
use crate::core::providers::ProviderKind;
use crate::utils::error::HealthError;
use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Latest health snapshot of one provider
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "provider_health")]
pub struct Model {
    /// Provider name, one row per provider
    #[sea_orm(primary_key, auto_increment = false)]
    pub provider: String,

    /// operational, degraded or outage
    pub status: String,

    pub uptime_percent: f64,

    pub error_rate_percent: f64,

    pub avg_latency_ms: f64,

    pub last_checked_at: DateTimeWithTimeZone,

    pub last_incident_at: Option<DateTimeWithTimeZone>,

    pub incident_description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain record
    pub fn to_domain(&self) -> crate::utils::error::Result<ProviderHealthRecord> {
        let provider: ProviderKind = self.provider.parse()?;
        let status = HealthStatus::parse(&self.status).ok_or_else(|| {
            HealthError::storage(format!(
                "Unknown health status '{}' for provider {}",
                self.status, self.provider
            ))
        })?;

        Ok(ProviderHealthRecord {
            provider,
            status,
            uptime_percent: self.uptime_percent,
            error_rate_percent: self.error_rate_percent,
            avg_latency_ms: self.avg_latency_ms,
            last_checked_at: self.last_checked_at.with_timezone(&Utc),
            last_incident_at: self.last_incident_at.map(|t| t.with_timezone(&Utc)),
            incident_description: self.incident_description.clone(),
        })
    }

    /// Build an active model from the domain record
    pub fn from_domain(record: &ProviderHealthRecord) -> ActiveModel {
        ActiveModel {
            provider: Set(record.provider.as_str().to_string()),
            status: Set(record.status.as_str().to_string()),
            uptime_percent: Set(record.uptime_percent),
            error_rate_percent: Set(record.error_rate_percent),
            avg_latency_ms: Set(record.avg_latency_ms),
            last_checked_at: Set(record.last_checked_at.into()),
            last_incident_at: Set(record.last_incident_at.map(Into::into)),
            incident_description: Set(record.incident_description.clone()),
        }
    }
}
