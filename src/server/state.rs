//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::health::HealthMonitor;
use std::sync::Arc;

/// HTTP server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration (shared read-only)
    pub config: Arc<Config>,
    pub monitor: Arc<HealthMonitor>,
}

impl AppState {
    pub fn new(config: Config, monitor: Arc<HealthMonitor>) -> Self {
        Self {
            config: Arc::new(config),
            monitor,
        }
    }

    /// Actor used when a request does not name one
    pub fn default_actor(&self) -> &str {
        &self.config.monitor.actor_id
    }
}
