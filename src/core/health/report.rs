//! Point-in-time health report across providers

use super::circuit_breaker::{CircuitBreakerState, CircuitState};
use super::latency::LatencyStats;
use super::monitor::HealthMonitor;
use super::types::{HealthStatus, ProviderHealthRecord};
use crate::core::providers::ProviderKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Health of one provider at report time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderReport {
    pub provider: ProviderKind,
    /// Whether the monitor probes this provider
    pub enabled: bool,
    /// `None` until the provider has been checked
    pub status: Option<HealthStatus>,
    pub record: Option<ProviderHealthRecord>,
    pub latency: LatencyStats,
    pub uptime_percent: f64,
    pub error_rate_percent: f64,
    pub circuit_state: CircuitState,
    pub circuit: CircuitBreakerState,
}

/// Snapshot of every known provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub providers: Vec<ProviderReport>,
    pub overall_status: HealthStatus,
    pub generated_at: DateTime<Utc>,
}

impl HealthReport {
    pub fn provider(&self, provider: ProviderKind) -> Option<&ProviderReport> {
        self.providers.iter().find(|p| p.provider == provider)
    }
}

impl HealthMonitor {
    /// Build a report from persisted records and live tracker state.
    ///
    /// Each provider shows whichever of its persisted and in-memory records
    /// was checked last, so a failed write never hides a newer check.
    pub async fn get_health_report(&self) -> HealthReport {
        let persisted: HashMap<ProviderKind, ProviderHealthRecord> =
            match self.store.load_health_records().await {
                Ok(records) => records.into_iter().map(|r| (r.provider, r)).collect(),
                Err(e) => {
                    warn!("Failed to load health records, using in-memory state: {}", e);
                    HashMap::new()
                }
            };

        let enabled = self.enabled_providers();
        let providers: Vec<ProviderReport> = ProviderKind::ALL
            .into_iter()
            .map(|provider| {
                let record = latest_record(
                    persisted.get(&provider).cloned(),
                    self.registry.last_record(provider),
                );
                let circuit = self.registry.breaker.snapshot(provider);
                ProviderReport {
                    provider,
                    enabled: enabled.contains(&provider),
                    status: record.as_ref().map(|r| r.status),
                    record,
                    latency: self.registry.latency.stats(provider),
                    uptime_percent: self.registry.errors.uptime(provider),
                    error_rate_percent: self.registry.errors.error_rate(provider),
                    circuit_state: circuit.state(),
                    circuit,
                }
            })
            .collect();

        let overall_status = HealthStatus::worst(providers.iter().filter_map(|p| p.status))
            .unwrap_or(HealthStatus::Operational);

        HealthReport {
            providers,
            overall_status,
            generated_at: self.clock.now(),
        }
    }
}

fn latest_record(
    persisted: Option<ProviderHealthRecord>,
    in_memory: Option<ProviderHealthRecord>,
) -> Option<ProviderHealthRecord> {
    match (persisted, in_memory) {
        (Some(stored), Some(live)) if live.last_checked_at > stored.last_checked_at => Some(live),
        (Some(stored), _) => Some(stored),
        (None, live) => live,
    }
}
