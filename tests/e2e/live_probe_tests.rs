//! Live probes through the real HTTP client

#[cfg(test)]
mod tests {
    use crate::skip_without_api_key;
    use provider_health::core::health::{
        HealthMonitor, HealthMonitorConfig, HealthStatus, ProviderTarget,
    };
    use provider_health::storage::InMemoryStore;
    use provider_health::{HttpProbeClient, ProviderCheck, ProviderKind};
    use std::sync::Arc;

    async fn live_check(provider: ProviderKind) {
        skip_without_api_key!(provider);
        let key = std::env::var(provider.api_key_env()).unwrap();

        let config = HealthMonitorConfig::default();
        let client = HttpProbeClient::new(config.probe_timeout).unwrap();
        let store = Arc::new(InMemoryStore::new());
        let monitor = HealthMonitor::new(
            config,
            vec![ProviderTarget::new(provider, key)],
            Arc::new(client),
            store.clone(),
            store.clone(),
        );

        let check = monitor.check_provider_health(provider, "e2e").await;
        match check {
            ProviderCheck::Completed { result, record } => {
                assert!(result.success, "{} probe failed: {:?}", provider, result.error_message);
                assert_eq!(record.status, HealthStatus::Operational);
                assert!(result.latency_ms > 0);
            }
            other => panic!("{} probe was skipped: {:?}", provider, other),
        }
        assert_eq!(store.usage_count(), 1);
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_openai() {
        live_check(ProviderKind::OpenAi).await;
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_anthropic() {
        live_check(ProviderKind::Anthropic).await;
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_gemini() {
        live_check(ProviderKind::Gemini).await;
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_deepseek() {
        live_check(ProviderKind::DeepSeek).await;
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_openrouter() {
        live_check(ProviderKind::OpenRouter).await;
    }
}
