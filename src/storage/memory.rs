//! In-memory store for health records and usage events

use super::HealthRecordStore;
use crate::core::analytics::{UsageEvent, UsageSink};
use crate::core::health::ProviderHealthRecord;
use crate::core::providers::ProviderKind;
use crate::utils::error::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;

/// Process-local store, lost on restart
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: DashMap<ProviderKind, ProviderHealthRecord>,
    usage: RwLock<Vec<UsageEvent>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, provider: ProviderKind) -> Option<ProviderHealthRecord> {
        self.records.get(&provider).map(|r| r.value().clone())
    }

    /// Usage events in arrival order
    pub fn usage_events(&self) -> Vec<UsageEvent> {
        self.usage.read().clone()
    }

    pub fn usage_count(&self) -> usize {
        self.usage.read().len()
    }
}

#[async_trait]
impl HealthRecordStore for InMemoryStore {
    async fn save_health_record(&self, record: &ProviderHealthRecord) -> Result<()> {
        self.records.insert(record.provider, record.clone());
        Ok(())
    }

    async fn load_health_records(&self) -> Result<Vec<ProviderHealthRecord>> {
        let mut records: Vec<_> = self.records.iter().map(|r| r.value().clone()).collect();
        records.sort_by_key(|r| r.provider);
        Ok(records)
    }
}

#[async_trait]
impl UsageSink for InMemoryStore {
    async fn record_usage(&self, event: &UsageEvent) -> Result<()> {
        self.usage.write().push(event.clone());
        Ok(())
    }
}
