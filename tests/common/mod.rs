//! Common test utilities for provider-health-monitor
//!
//! - In-memory SQLite store
//! - Scripted probe client and record factories
//! - Custom assertions and helpers

pub mod fixtures;

pub use database::TestDatabase;
pub use fixtures::{MonitorHarness, RecordFactory, ScriptedProbeClient};

/// Skip test if API key is not available
#[macro_export]
macro_rules! skip_without_api_key {
    ($provider:expr) => {
        let key_var = $provider.api_key_env();
        if std::env::var(key_var).is_err() {
            eprintln!("Skipping test: {} not set for {} provider", key_var, $provider);
            return;
        }
    };
}
