//! Configuration data models
//!
//! This module defines all configuration structures used by the monitor.

pub mod monitor;
pub mod provider;
pub mod server;
pub mod storage;

pub use monitor::*;
pub use provider::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_check_interval_secs() -> u64 {
    300
}

pub fn default_probe_timeout_ms() -> u64 {
    10_000
}

pub fn default_failure_threshold() -> u32 {
    3
}

pub fn default_latency_window() -> usize {
    100
}

pub fn default_error_window() -> usize {
    20
}

pub fn default_spike_multiplier() -> f64 {
    2.0
}

pub fn default_degraded_error_rate() -> f64 {
    20.0
}

pub fn default_outage_error_rate() -> f64 {
    50.0
}

pub fn default_probe_prompt() -> String {
    "Hi".to_string()
}

pub fn default_probe_max_tokens() -> u32 {
    5
}

/// Actor probes are attributed to when nobody asked for them
pub fn default_actor_id() -> String {
    "system".to_string()
}

pub fn default_host() -> String {
    "127.0.0.1".to_string()
}

pub fn default_port() -> u16 {
    8090
}

pub fn default_max_connections() -> u32 {
    5
}

pub fn default_true() -> bool {
    true
}
