//! Loading configuration files from disk

#[cfg(test)]
mod tests {
    use provider_health::config::Config;
    use provider_health::{HealthError, ProviderKind};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let file = write_config(
            r#"
monitor:
  check_interval_secs: 60
  probe_timeout_ms: 5000
  recovery_window_secs: 90
  degraded_error_rate: 10.0
providers:
  - provider: openai
    api_key: sk-file
  - provider: gemini
    base_url: http://localhost:9999/v1beta
storage:
  database_url: "sqlite::memory:"
"#,
        );

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.monitor.check_interval_secs, 60);
        assert_eq!(config.monitor.recovery_window_secs(), 90);
        assert!(config.storage.is_persistent());
        assert_eq!(
            config.base_urls(),
            vec![(ProviderKind::Gemini, "http://localhost:9999/v1beta".to_string())]
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(dir.path().join("absent.yaml"))
            .await
            .unwrap_err();
        assert!(matches!(err, HealthError::Config(_)));
    }

    #[tokio::test]
    async fn test_invalid_thresholds_rejected() {
        let file = write_config(
            r#"
monitor:
  degraded_error_rate: 60.0
  outage_error_rate: 50.0
"#,
        );
        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("Monitor config error"));
    }

    #[tokio::test]
    async fn test_duplicate_providers_rejected() {
        let file = write_config(
            r#"
providers:
  - provider: gemini
  - provider: gemini
"#,
        );
        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("Duplicate provider: gemini"));
    }

    #[tokio::test]
    async fn test_shipped_example_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/monitor.yaml.example");
        let config = Config::from_file(path).await.unwrap();
        assert_eq!(config.providers.len(), ProviderKind::ALL.len());
    }
}
