//! Monitor behaviour across several providers

#[cfg(test)]
mod tests {
    use crate::common::MonitorHarness;
    use crate::common::assertions::HealthReportAssertions;
    use provider_health::core::analytics::RequestType;
    use provider_health::core::health::{
        HealthMonitorConfig, HealthStatus, ProbeErrorKind, ProviderCheck, SkipReason,
    };
    use provider_health::{ProviderError, ProviderKind};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_cycle_checks_providers_concurrently() {
        let h = MonitorHarness::new(&[
            ProviderKind::OpenAi,
            ProviderKind::Anthropic,
            ProviderKind::Gemini,
        ]);
        for provider in [ProviderKind::OpenAi, ProviderKind::Anthropic, ProviderKind::Gemini] {
            h.client.succeed_after(provider, Duration::from_millis(400));
        }

        let started = tokio::time::Instant::now();
        let outcomes = h.monitor.check_all_providers_health("system").await;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(started.elapsed(), Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_provider_times_out_without_blocking_others() {
        let config = HealthMonitorConfig {
            probe_timeout: Duration::from_secs(2),
            ..HealthMonitorConfig::default()
        };
        let h = MonitorHarness::with_config(
            config,
            &[ProviderKind::DeepSeek, ProviderKind::OpenRouter],
        );
        h.client.hang(ProviderKind::DeepSeek);

        let outcomes = h.monitor.check_all_providers_health("system").await;

        for outcome in outcomes {
            let ProviderCheck::Completed { result, record } = outcome else {
                panic!("expected completed checks");
            };
            match record.provider {
                ProviderKind::DeepSeek => {
                    assert_eq!(result.error_type, Some(ProbeErrorKind::Timeout));
                    assert_eq!(result.latency_ms, 2_000);
                    assert_eq!(record.status, HealthStatus::Outage);
                }
                ProviderKind::OpenRouter => {
                    assert!(result.success);
                    assert_eq!(record.status, HealthStatus::Operational);
                }
                other => panic!("unexpected provider {}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_probe_request_shape() {
        let h = MonitorHarness::new(&[ProviderKind::Anthropic]);
        h.monitor
            .check_provider_health(ProviderKind::Anthropic, "system")
            .await;

        let requests = h.client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].prompt, "Hi");
        assert_eq!(requests[0].max_output_tokens, 5);
        assert_eq!(requests[0].credential, "key-anthropic");
        assert_eq!(requests[0].model, ProviderKind::Anthropic.default_model());
    }

    #[tokio::test]
    async fn test_open_circuit_stops_probes_and_usage() {
        let h = MonitorHarness::new(&[ProviderKind::Gemini]);
        for _ in 0..3 {
            h.client.fail_with(
                ProviderKind::Gemini,
                ProviderError::api_error("gemini", 500, "backend error"),
            );
        }

        for _ in 0..3 {
            h.monitor.check_all_providers_health("system").await;
        }
        let outcomes = h.monitor.check_all_providers_health("system").await;

        assert_eq!(
            outcomes,
            vec![ProviderCheck::Skipped {
                provider: ProviderKind::Gemini,
                reason: SkipReason::CircuitOpen
            }]
        );
        assert_eq!(h.client.calls_for(ProviderKind::Gemini), 3);
        assert_eq!(h.store.usage_count(), 3);
    }

    #[tokio::test]
    async fn test_failed_trial_restarts_cooldown() {
        let h = MonitorHarness::new(&[ProviderKind::OpenAi]);
        for _ in 0..4 {
            h.client.fail_with(
                ProviderKind::OpenAi,
                ProviderError::unavailable("openai", "overloaded"),
            );
        }
        for _ in 0..3 {
            h.monitor
                .check_provider_health(ProviderKind::OpenAi, "system")
                .await;
        }

        h.clock.advance(Duration::from_secs(300));
        let trial = h
            .monitor
            .check_provider_health(ProviderKind::OpenAi, "system")
            .await;
        assert!(!trial.is_skipped());
        assert!(h.monitor.registry().breaker().is_open(ProviderKind::OpenAi));

        h.clock.advance(Duration::from_secs(299));
        assert!(
            h.monitor
                .check_provider_health(ProviderKind::OpenAi, "system")
                .await
                .is_skipped()
        );

        h.clock.advance(Duration::from_secs(1));
        let recovered = h
            .monitor
            .check_provider_health(ProviderKind::OpenAi, "system")
            .await;
        assert!(!recovered.is_skipped());
        assert!(!h.monitor.registry().breaker().is_open(ProviderKind::OpenAi));
    }

    #[tokio::test]
    async fn test_custom_recovery_window() {
        let config = HealthMonitorConfig {
            recovery_window: Duration::from_secs(30),
            ..HealthMonitorConfig::default()
        };
        let h = MonitorHarness::with_config(config, &[ProviderKind::OpenAi]);
        for _ in 0..3 {
            h.client.fail_with(
                ProviderKind::OpenAi,
                ProviderError::network("openai", "reset by peer"),
            );
            h.monitor
                .check_provider_health(ProviderKind::OpenAi, "system")
                .await;
        }

        h.clock.advance(Duration::from_secs(30));
        assert!(
            !h.monitor
                .check_provider_health(ProviderKind::OpenAi, "system")
                .await
                .is_skipped()
        );
    }

    #[tokio::test]
    async fn test_usage_events_carry_costs() {
        let h = MonitorHarness::new(&[ProviderKind::OpenAi, ProviderKind::Anthropic]);
        h.monitor.check_all_providers_health("user-9").await;

        let events = h.store.usage_events();
        assert_eq!(events.len(), 2);
        for event in &events {
            assert_eq!(event.actor_id, "user-9");
            assert_eq!(event.request_type, RequestType::HealthCheck);
            assert!(event.success);
            assert_eq!(event.total_tokens(), 3);
            assert!(event.cost_usd > 0.0);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduler_skips_missed_ticks() {
        let config = HealthMonitorConfig {
            check_interval: Duration::from_secs(10),
            probe_timeout: Duration::from_secs(60),
            ..HealthMonitorConfig::default()
        };
        let h = MonitorHarness::with_config(config, &[ProviderKind::OpenAi]);
        // First cycle overruns three intervals
        h.client
            .succeed_after(ProviderKind::OpenAi, Duration::from_secs(35));

        assert!(h.monitor.start("system"));

        // One catch-up cycle at t=35, not a burst for 10, 20 and 30
        tokio::time::sleep(Duration::from_secs(36)).await;
        assert_eq!(h.client.calls_for(ProviderKind::OpenAi), 2);

        // Back on the 10s grid: t=40
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(h.client.calls_for(ProviderKind::OpenAi), 3);

        assert!(h.monitor.stop().await);
        h.monitor
            .get_health_report()
            .await
            .assert_status(ProviderKind::OpenAi, Some(HealthStatus::Operational));
    }
}
