//! SeaORM store tests on in-memory SQLite

#[cfg(test)]
mod tests {
    use crate::common::fixtures::epoch;
    use crate::common::{MonitorHarness, RecordFactory, TestDatabase};
    use chrono::Duration as ChronoDuration;
    use provider_health::core::analytics::{RequestType, UsageEvent, UsageSink};
    use provider_health::core::health::{HealthMonitorConfig, HealthStatus};
    use provider_health::storage::{HealthRecordStore, InMemoryStore, StorageLayer};
    use provider_health::config::StorageConfig;
    use provider_health::{ProviderError, ProviderKind};
    use std::sync::Arc;
    use tokio_test::assert_ok;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_record_upsert_keeps_one_row_per_provider() {
        let db = TestDatabase::new().await;
        let store = db.store();

        let mut record = RecordFactory::operational(ProviderKind::OpenAi);
        assert_ok!(store.save_health_record(&record).await);

        record.status = HealthStatus::Outage;
        record.error_rate_percent = 60.0;
        record.uptime_percent = 40.0;
        record.last_incident_at = Some(epoch() + ChronoDuration::minutes(3));
        record.incident_description = Some("Request timeout for openai".to_string());
        store.save_health_record(&record).await.unwrap();
        store
            .save_health_record(&RecordFactory::operational(ProviderKind::DeepSeek))
            .await
            .unwrap();

        let records = store.load_health_records().await.unwrap();
        assert_eq!(records.len(), 2);
        let openai = records
            .iter()
            .find(|r| r.provider == ProviderKind::OpenAi)
            .unwrap();
        assert_eq!(openai, &record);
    }

    #[tokio::test]
    async fn test_empty_database_loads_nothing() {
        let db = TestDatabase::new().await;
        assert!(db.store().load_health_records().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_usage_events_are_inserted() {
        let db = TestDatabase::new().await;
        let store = db.store();

        for actor in ["system", "system", "user-1"] {
            let event = UsageEvent {
                id: Uuid::new_v4(),
                actor_id: actor.to_string(),
                provider: ProviderKind::Gemini,
                model: "gemini-1.5-flash".to_string(),
                request_type: RequestType::HealthCheck,
                input_tokens: 1,
                output_tokens: 2,
                cost_usd: 0.000_000_675,
                latency_ms: 210,
                success: true,
                created_at: epoch(),
            };
            assert_ok!(store.record_usage(&event).await);
        }

        assert_eq!(store.usage_count_for_actor("system").await.unwrap(), 2);
        let recent = store.recent_usage(10).await.unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].request_type, "health_check");
        assert_eq!(recent[0].provider, "gemini");
    }

    #[tokio::test]
    async fn test_monitor_persists_through_database() {
        let db = TestDatabase::new().await;
        let h = MonitorHarness::with_store(
            HealthMonitorConfig::default(),
            &[ProviderKind::OpenAi, ProviderKind::Anthropic],
            db.store_arc(),
            Arc::new(InMemoryStore::new()),
        );
        h.client.fail_with(
            ProviderKind::Anthropic,
            ProviderError::rate_limit("anthropic", "429 Too Many Requests"),
        );

        h.monitor.check_all_providers_health("system").await;

        let records = db.store().load_health_records().await.unwrap();
        assert_eq!(records.len(), 2);
        let anthropic = records
            .iter()
            .find(|r| r.provider == ProviderKind::Anthropic)
            .unwrap();
        assert_eq!(anthropic.status, HealthStatus::Outage);
        assert_eq!(anthropic.last_incident_at, Some(epoch()));

        // A fresh monitor over the same database sees the last records
        let restarted = MonitorHarness::with_store(
            HealthMonitorConfig::default(),
            &[ProviderKind::OpenAi],
            db.store_arc(),
            Arc::new(InMemoryStore::new()),
        );
        assert_eq!(restarted.monitor.hydrate_from_store().await.unwrap(), 2);
        assert_eq!(
            restarted
                .monitor
                .registry()
                .last_record(ProviderKind::Anthropic)
                .map(|r| r.status),
            Some(HealthStatus::Outage)
        );
    }

    #[tokio::test]
    async fn test_storage_layer_defaults_to_memory() {
        let layer = StorageLayer::new(&StorageConfig::default()).await.unwrap();
        layer
            .records
            .save_health_record(&RecordFactory::operational(ProviderKind::OpenRouter))
            .await
            .unwrap();
        assert_eq!(layer.records.load_health_records().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_storage_layer_connects_sqlite() {
        let config = StorageConfig {
            database_url: Some("sqlite::memory:".to_string()),
            max_connections: 5,
        };
        let layer = assert_ok!(StorageLayer::new(&config).await);
        assert!(assert_ok!(layer.records.load_health_records().await).is_empty());
    }
}
