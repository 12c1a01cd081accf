//! Storage layer for the health monitor
//!
//! With a database URL, health records and usage events go to SeaORM.
//! Otherwise records stay in memory and usage events are logged.

/// Database storage module
pub mod database;
/// In-memory storage module
pub mod memory;

pub use database::SeaOrmStore;
pub use memory::InMemoryStore;

use crate::config::StorageConfig;
use crate::core::analytics::{TracingUsageSink, UsageSink};
use crate::core::health::ProviderHealthRecord;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Persistence for the latest record of each provider
#[async_trait]
pub trait HealthRecordStore: Send + Sync {
    /// Insert or overwrite the record keyed by its provider
    async fn save_health_record(&self, record: &ProviderHealthRecord) -> Result<()>;

    async fn load_health_records(&self) -> Result<Vec<ProviderHealthRecord>>;
}

/// Storage backends selected from configuration
#[derive(Clone)]
pub struct StorageLayer {
    pub records: Arc<dyn HealthRecordStore>,
    pub usage: Arc<dyn UsageSink>,
}

impl StorageLayer {
    /// Connect the configured backend
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        if config.database_url.is_some() {
            let store = Arc::new(SeaOrmStore::connect(config).await?);
            Ok(Self {
                records: store.clone(),
                usage: store,
            })
        } else {
            info!("No database configured, keeping health records in memory");
            Ok(Self {
                records: Arc::new(InMemoryStore::new()),
                usage: Arc::new(TracingUsageSink),
            })
        }
    }
}
