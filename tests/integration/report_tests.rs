//! Health report aggregation

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;
    use crate::common::assertions::HealthReportAssertions;
    use crate::common::fixtures::epoch;
    use crate::common::{MonitorHarness, RecordFactory};
    use provider_health::core::health::{CircuitState, HealthStatus};
    use provider_health::storage::HealthRecordStore;
    use provider_health::{ProviderError, ProviderKind};
    use std::time::Duration;

    #[tokio::test]
    async fn test_report_covers_every_provider() {
        let h = MonitorHarness::new(&[ProviderKind::OpenAi]);
        h.monitor.check_all_providers_health("system").await;

        let report = h.monitor.get_health_report().await;
        assert_eq!(report.providers.len(), ProviderKind::ALL.len());
        report.assert_status(ProviderKind::OpenAi, Some(HealthStatus::Operational));
        report.assert_status(ProviderKind::Anthropic, None);
        assert_eq!(report.overall_status, HealthStatus::Operational);
        assert_eq!(report.generated_at, epoch());
    }

    #[tokio::test]
    async fn test_overall_status_is_worst_known() {
        let h = MonitorHarness::new(&[ProviderKind::OpenAi, ProviderKind::Gemini]);
        h.store
            .save_health_record(&RecordFactory::at(
                ProviderKind::Gemini,
                HealthStatus::Degraded,
                epoch(),
            ))
            .await
            .unwrap();
        h.store
            .save_health_record(&RecordFactory::operational(ProviderKind::OpenAi))
            .await
            .unwrap();

        let report = h.monitor.get_health_report().await;
        assert_eq!(report.overall_status, HealthStatus::Degraded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_report_latency_and_error_figures() {
        let h = MonitorHarness::new(&[ProviderKind::DeepSeek]);
        for ms in [100, 200, 300, 400] {
            h.client
                .succeed_after(ProviderKind::DeepSeek, Duration::from_millis(ms));
        }
        h.client.fail_with(
            ProviderKind::DeepSeek,
            ProviderError::api_error("deepseek", 422, "bad request"),
        );
        for _ in 0..5 {
            h.monitor
                .check_provider_health(ProviderKind::DeepSeek, "system")
                .await;
        }

        let report = h.monitor.get_health_report().await;
        let deepseek = report.provider(ProviderKind::DeepSeek).unwrap();
        assert_approx_eq!(deepseek.latency.avg, 250.0);
        assert_eq!(deepseek.latency.p50, 200);
        assert_eq!(deepseek.latency.p95, 400);
        assert_eq!(deepseek.latency.min, 100);
        assert_approx_eq!(deepseek.uptime_percent, 80.0);
        assert_approx_eq!(deepseek.error_rate_percent, 20.0);
        assert_eq!(deepseek.circuit_state, CircuitState::Closed);
        assert_eq!(deepseek.circuit.failure_count, 1);
        assert_eq!(deepseek.status, Some(HealthStatus::Degraded));
        assert!(
            deepseek
                .record
                .as_ref()
                .and_then(|r| r.incident_description.as_deref())
                .is_some_and(|d| d.contains("bad request"))
        );
    }
}
