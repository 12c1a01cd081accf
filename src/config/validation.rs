//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.

use super::models::*;
use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for MonitorConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating monitor configuration");

        if self.check_interval_secs == 0 {
            return Err("check_interval_secs must be greater than 0".to_string());
        }
        if self.probe_timeout_ms == 0 {
            return Err("probe_timeout_ms must be greater than 0".to_string());
        }
        if self.failure_threshold == 0 {
            return Err("failure_threshold must be greater than 0".to_string());
        }
        if self.recovery_window_secs == Some(0) {
            return Err("recovery_window_secs must be greater than 0".to_string());
        }
        if self.latency_window == 0 || self.error_window == 0 {
            return Err("latency_window and error_window must be greater than 0".to_string());
        }
        if self.spike_multiplier.is_nan() || self.spike_multiplier <= 1.0 {
            return Err("spike_multiplier must be greater than 1.0".to_string());
        }
        let ordered = self.degraded_error_rate > 0.0
            && self.degraded_error_rate < self.outage_error_rate
            && self.outage_error_rate <= 100.0;
        if !ordered {
            return Err(format!(
                "error rate thresholds must satisfy 0 < degraded ({}) < outage ({}) <= 100",
                self.degraded_error_rate, self.outage_error_rate
            ));
        }
        if self.probe_prompt.trim().is_empty() {
            return Err("probe_prompt cannot be empty".to_string());
        }
        if self.probe_max_tokens == 0 {
            return Err("probe_max_tokens must be greater than 0".to_string());
        }
        if self.actor_id.trim().is_empty() {
            return Err("actor_id cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Validate for ProviderConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(model) = &self.model {
            if model.trim().is_empty() {
                return Err(format!("{}: model cannot be empty", self.provider));
            }
        }
        if let Some(base_url) = &self.base_url {
            let url = Url::parse(base_url)
                .map_err(|e| format!("{}: invalid base_url '{}': {}", self.provider, base_url, e))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(format!(
                    "{}: base_url must use http:// or https://, got {}",
                    self.provider,
                    url.scheme()
                ));
            }
        }
        Ok(())
    }
}

impl Validate for [ProviderConfig] {
    fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for provider in self {
            if !seen.insert(provider.provider) {
                return Err(format!("Duplicate provider: {}", provider.provider));
            }
            provider.validate()?;
        }
        Ok(())
    }
}

impl Validate for StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(url) = &self.database_url {
            if url.trim().is_empty() {
                return Err("database_url cannot be empty".to_string());
            }
        }
        if self.max_connections == 0 {
            return Err("max_connections must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Server host cannot be empty".to_string());
        }
        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        Ok(())
    }
}
