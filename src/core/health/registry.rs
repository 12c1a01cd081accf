//! Per-provider health state owned by one monitor

use super::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig};
use super::clock::Clock;
use super::error_rate::ErrorRateTracker;
use super::latency::LatencyTracker;
use super::types::ProviderHealthRecord;
use crate::core::providers::ProviderKind;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Trackers, breaker and last records, keyed by provider
pub struct HealthRegistry {
    pub(crate) latency: LatencyTracker,
    pub(crate) errors: ErrorRateTracker,
    pub(crate) breaker: CircuitBreaker,
    last_records: DashMap<ProviderKind, ProviderHealthRecord>,
    check_locks: DashMap<ProviderKind, Arc<Mutex<()>>>,
}

impl HealthRegistry {
    pub fn new(
        latency_window: usize,
        error_window: usize,
        breaker_config: CircuitBreakerConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            latency: LatencyTracker::new(latency_window),
            errors: ErrorRateTracker::new(error_window, clock.clone()),
            breaker: CircuitBreaker::new(breaker_config, clock),
            last_records: DashMap::new(),
            check_locks: DashMap::new(),
        }
    }

    pub fn latency(&self) -> &LatencyTracker {
        &self.latency
    }

    pub fn errors(&self) -> &ErrorRateTracker {
        &self.errors
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    pub fn last_record(&self, provider: ProviderKind) -> Option<ProviderHealthRecord> {
        self.last_records.get(&provider).map(|r| r.value().clone())
    }

    pub(crate) fn store_record(&self, record: ProviderHealthRecord) {
        self.last_records.insert(record.provider, record);
    }

    /// Lock serializing checks of one provider
    pub(crate) fn check_lock(&self, provider: ProviderKind) -> Arc<Mutex<()>> {
        self.check_locks
            .entry(provider)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone()
    }
}
