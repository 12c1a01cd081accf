//! # provider-health-monitor
//!
//! Health monitoring for AI text-generation providers.
//!
//! ## Features
//!
//! - **Synthetic probes**: one tiny prompt per provider per interval, bounded by a timeout
//! - **Latency percentiles**: rolling p50/p95/p99 per provider
//! - **Rolling error rates**: uptime and error percentages over recent checks
//! - **Circuit breakers**: stop probing a failing provider until its cool-down elapses
//! - **Persistence**: latest record per provider in memory, SQLite or PostgreSQL
//! - **Control surface**: HTTP endpoints to read the report and drive the monitor
//!
//! ## Embedding the monitor
//!
//! ```rust,no_run
//! use provider_health::{Config, HealthService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/monitor.yaml").await?;
//!     let service = HealthService::new(config).await?;
//!
//!     let report = service.monitor().get_health_report().await;
//!     println!("overall: {}", report.overall_status);
//!
//!     service.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use core::health::{
    HealthMonitor, HealthMonitorConfig, HealthReport, HealthStatus, ProviderCheck, ProviderTarget,
};
pub use core::providers::{HttpProbeClient, ProbeClient, ProviderError, ProviderKind};
pub use utils::error::{HealthError, Result};

use std::sync::Arc;
use storage::StorageLayer;
use tracing::{info, warn};

/// Monitor wired to storage and the HTTP control surface
pub struct HealthService {
    state: server::AppState,
}

impl HealthService {
    /// Connect storage and build the monitor from configuration
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating health monitor service");

        let storage = StorageLayer::new(&config.storage).await?;
        let monitor_config = HealthMonitorConfig::from(&config.monitor);

        let mut client = HttpProbeClient::new(monitor_config.probe_timeout)?;
        for (provider, base_url) in config.base_urls() {
            client = client.with_base_url(provider, base_url);
        }

        let targets = config.targets();
        for target in &targets {
            if target.enabled && target.usable_credential().is_none() {
                warn!(
                    "No API key for {}, set {} to monitor it",
                    target.provider,
                    target.provider.api_key_env()
                );
            }
        }

        let monitor = Arc::new(HealthMonitor::new(
            monitor_config,
            targets,
            Arc::new(client),
            storage.records,
            storage.usage,
        ));
        if let Err(e) = monitor.hydrate_from_store().await {
            warn!("Could not load persisted health records: {}", e);
        }

        Ok(Self {
            state: server::AppState::new(config, monitor),
        })
    }

    pub fn monitor(&self) -> &Arc<HealthMonitor> {
        &self.state.monitor
    }

    pub fn config(&self) -> &Config {
        &self.state.config
    }

    /// Start the scheduler if configured, then serve until shutdown
    pub async fn run(self) -> Result<()> {
        let monitor = Arc::clone(&self.state.monitor);
        if self.state.config.monitor.auto_start {
            monitor.start(self.state.config.monitor.actor_id.clone());
        }

        let result = server::HttpServer::new(self.state).start().await;
        monitor.stop().await;
        result
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
