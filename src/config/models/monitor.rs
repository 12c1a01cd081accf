//! Monitor configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Scheduling, breaker and status thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Seconds between check cycles
    #[serde(default = "default_check_interval_secs")]
    pub check_interval_secs: u64,
    /// Upper bound on one probe in milliseconds
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
    /// Consecutive failures before a circuit opens
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,
    /// Cool-down of an open circuit, defaults to the check interval
    #[serde(default)]
    pub recovery_window_secs: Option<u64>,
    #[serde(default = "default_latency_window")]
    pub latency_window: usize,
    #[serde(default = "default_error_window")]
    pub error_window: usize,
    #[serde(default = "default_spike_multiplier")]
    pub spike_multiplier: f64,
    #[serde(default = "default_degraded_error_rate")]
    pub degraded_error_rate: f64,
    #[serde(default = "default_outage_error_rate")]
    pub outage_error_rate: f64,
    #[serde(default = "default_probe_prompt")]
    pub probe_prompt: String,
    #[serde(default = "default_probe_max_tokens")]
    pub probe_max_tokens: u32,
    /// Start the scheduler when the service boots
    #[serde(default = "default_true")]
    pub auto_start: bool,
    #[serde(default = "default_actor_id")]
    pub actor_id: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: default_check_interval_secs(),
            probe_timeout_ms: default_probe_timeout_ms(),
            failure_threshold: default_failure_threshold(),
            recovery_window_secs: None,
            latency_window: default_latency_window(),
            error_window: default_error_window(),
            spike_multiplier: default_spike_multiplier(),
            degraded_error_rate: default_degraded_error_rate(),
            outage_error_rate: default_outage_error_rate(),
            probe_prompt: default_probe_prompt(),
            probe_max_tokens: default_probe_max_tokens(),
            auto_start: true,
            actor_id: default_actor_id(),
        }
    }
}

impl MonitorConfig {
    /// Effective breaker cool-down in seconds
    pub fn recovery_window_secs(&self) -> u64 {
        self.recovery_window_secs.unwrap_or(self.check_interval_secs)
    }
}
