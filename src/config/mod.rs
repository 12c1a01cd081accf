//! Configuration management for the health monitor
//!
//! This module handles loading, validation, and management of all monitor configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::core::health::ProviderTarget;
use crate::core::providers::ProviderKind;
use crate::utils::error::{HealthError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Main configuration struct for the health monitor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| HealthError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate YAML
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| HealthError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from a variable lookup.
    ///
    /// Without `HEALTH_PROVIDERS`, every provider whose API key variable is
    /// set gets monitored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = parse_var(&lookup, "HEALTH_CHECK_INTERVAL_SECS")? {
            config.monitor.check_interval_secs = v;
        }
        if let Some(v) = parse_var(&lookup, "HEALTH_PROBE_TIMEOUT_MS")? {
            config.monitor.probe_timeout_ms = v;
        }
        if let Some(v) = parse_var(&lookup, "HEALTH_FAILURE_THRESHOLD")? {
            config.monitor.failure_threshold = v;
        }
        if let Some(v) = parse_var(&lookup, "HEALTH_RECOVERY_WINDOW_SECS")? {
            config.monitor.recovery_window_secs = Some(v);
        }
        if let Some(url) = lookup("HEALTH_DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            config.storage.database_url = Some(url);
        }
        if let Some(host) = lookup("HEALTH_SERVER_HOST").filter(|v| !v.trim().is_empty()) {
            config.server.host = host;
        }
        if let Some(port) = parse_var(&lookup, "HEALTH_SERVER_PORT")? {
            config.server.port = port;
        }

        config.providers = match lookup("HEALTH_PROVIDERS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(|name| Ok(ProviderConfig::new(name.parse::<ProviderKind>()?)))
                .collect::<Result<Vec<_>>>()?,
            None => ProviderKind::ALL
                .into_iter()
                .filter(|kind| lookup(kind.api_key_env()).is_some())
                .map(ProviderConfig::new)
                .collect(),
        };
        for provider in &mut config.providers {
            if provider.api_key.is_none() {
                provider.api_key = lookup(provider.provider.api_key_env());
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.monitor
            .validate()
            .map_err(|e| HealthError::Config(format!("Monitor config error: {}", e)))?;
        self.providers
            .validate()
            .map_err(|e| HealthError::Config(format!("Provider config error: {}", e)))?;
        self.storage
            .validate()
            .map_err(|e| HealthError::Config(format!("Storage config error: {}", e)))?;
        self.server
            .validate()
            .map_err(|e| HealthError::Config(format!("Server config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Probe targets for every configured provider
    pub fn targets(&self) -> Vec<ProviderTarget> {
        self.providers.iter().map(ProviderConfig::to_target).collect()
    }

    /// Base URL overrides for the HTTP probe client
    pub fn base_urls(&self) -> Vec<(ProviderKind, String)> {
        self.providers
            .iter()
            .filter_map(|p| p.base_url.clone().map(|url| (p.provider, url)))
            .collect()
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| HealthError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

fn parse_var<F, T>(lookup: &F, name: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| HealthError::Config(format!("Invalid {}='{}': {}", name, raw, e))),
        _ => Ok(None),
    }
}
