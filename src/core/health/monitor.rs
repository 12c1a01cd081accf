//! Health monitor implementation
//!
//! This module provides the main HealthMonitor struct, its configuration and
//! the scheduler that drives periodic check cycles.

use super::circuit_breaker::CircuitBreakerConfig;
use super::clock::{Clock, SystemClock};
use super::evaluator::{StatusEvaluator, StatusThresholds};
use super::probe::{ProbeExecutor, ProbeSettings};
use super::registry::HealthRegistry;
use crate::config::MonitorConfig;
use crate::core::analytics::UsageSink;
use crate::core::providers::{ProbeClient, ProviderKind};
use crate::storage::HealthRecordStore;
use crate::utils::error::Result;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

/// Health monitor configuration
#[derive(Debug, Clone)]
pub struct HealthMonitorConfig {
    /// Interval between check cycles
    pub check_interval: Duration,
    /// Upper bound on a single probe
    pub probe_timeout: Duration,
    /// Consecutive failures before the circuit opens
    pub failure_threshold: u32,
    /// Cool-down before an open circuit allows a trial probe
    pub recovery_window: Duration,
    /// Latency samples kept per provider
    pub latency_window: usize,
    /// Check outcomes kept per provider
    pub error_window: usize,
    pub thresholds: StatusThresholds,
    pub probe_prompt: String,
    pub probe_max_tokens: u32,
}

impl Default for HealthMonitorConfig {
    fn default() -> Self {
        let check_interval = Duration::from_secs(300);
        Self {
            check_interval,
            probe_timeout: Duration::from_secs(10),
            failure_threshold: 3,
            recovery_window: check_interval,
            latency_window: super::latency::DEFAULT_LATENCY_WINDOW,
            error_window: super::error_rate::DEFAULT_ERROR_WINDOW,
            thresholds: StatusThresholds::default(),
            probe_prompt: "Hi".to_string(),
            probe_max_tokens: 5,
        }
    }
}

impl From<&MonitorConfig> for HealthMonitorConfig {
    fn from(config: &MonitorConfig) -> Self {
        let check_interval = Duration::from_secs(config.check_interval_secs);
        Self {
            check_interval,
            probe_timeout: Duration::from_millis(config.probe_timeout_ms),
            failure_threshold: config.failure_threshold,
            recovery_window: config
                .recovery_window_secs
                .map(Duration::from_secs)
                .unwrap_or(check_interval),
            latency_window: config.latency_window,
            error_window: config.error_window,
            thresholds: StatusThresholds {
                degraded_error_rate: config.degraded_error_rate,
                outage_error_rate: config.outage_error_rate,
                spike_multiplier: config.spike_multiplier,
            },
            probe_prompt: config.probe_prompt.clone(),
            probe_max_tokens: config.probe_max_tokens,
        }
    }
}

/// A provider the monitor may probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderTarget {
    pub provider: ProviderKind,
    pub enabled: bool,
    pub model: String,
    /// API key; a target without one is never probed
    pub credential: Option<String>,
}

impl ProviderTarget {
    pub fn new(provider: ProviderKind, credential: impl Into<String>) -> Self {
        Self {
            provider,
            enabled: true,
            model: provider.default_model().to_string(),
            credential: Some(credential.into()),
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Credential usable for a probe, if the target is enabled
    pub fn usable_credential(&self) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        self.credential
            .as_deref()
            .filter(|credential| !credential.trim().is_empty())
    }
}

struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
    actor_id: String,
}

/// Health monitor for tracking provider health
pub struct HealthMonitor {
    pub(crate) config: HealthMonitorConfig,
    pub(crate) targets: BTreeMap<ProviderKind, ProviderTarget>,
    pub(crate) registry: HealthRegistry,
    pub(crate) executor: ProbeExecutor,
    pub(crate) evaluator: StatusEvaluator,
    pub(crate) store: Arc<dyn HealthRecordStore>,
    pub(crate) usage: Arc<dyn UsageSink>,
    pub(crate) clock: Arc<dyn Clock>,
    scheduler: parking_lot::Mutex<Option<SchedulerHandle>>,
}

impl HealthMonitor {
    /// Create a new health monitor on the system clock
    pub fn new(
        config: HealthMonitorConfig,
        targets: Vec<ProviderTarget>,
        client: Arc<dyn ProbeClient>,
        store: Arc<dyn HealthRecordStore>,
        usage: Arc<dyn UsageSink>,
    ) -> Self {
        Self::with_clock(config, targets, client, store, usage, Arc::new(SystemClock))
    }

    /// Create a new health monitor reading wall time from `clock`
    pub fn with_clock(
        config: HealthMonitorConfig,
        targets: Vec<ProviderTarget>,
        client: Arc<dyn ProbeClient>,
        store: Arc<dyn HealthRecordStore>,
        usage: Arc<dyn UsageSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let registry = HealthRegistry::new(
            config.latency_window,
            config.error_window,
            CircuitBreakerConfig {
                failure_threshold: config.failure_threshold,
                recovery_window: config.recovery_window,
            },
            clock.clone(),
        );
        let executor = ProbeExecutor::new(
            client,
            ProbeSettings {
                prompt: config.probe_prompt.clone(),
                max_output_tokens: config.probe_max_tokens,
                timeout: config.probe_timeout,
            },
            clock.clone(),
        );
        let evaluator = StatusEvaluator::new(config.thresholds);
        let targets = targets
            .into_iter()
            .map(|target| (target.provider, target))
            .collect();

        Self {
            config,
            targets,
            registry,
            executor,
            evaluator,
            store,
            usage,
            clock,
            scheduler: parking_lot::Mutex::new(None),
        }
    }

    pub fn config(&self) -> &HealthMonitorConfig {
        &self.config
    }

    pub fn registry(&self) -> &HealthRegistry {
        &self.registry
    }

    pub fn target(&self, provider: ProviderKind) -> Option<&ProviderTarget> {
        self.targets.get(&provider)
    }

    /// Providers that are enabled and carry a credential
    pub fn enabled_providers(&self) -> Vec<ProviderKind> {
        self.targets
            .values()
            .filter(|target| target.usable_credential().is_some())
            .map(|target| target.provider)
            .collect()
    }

    /// Start periodic checks attributed to `actor_id`.
    ///
    /// Runs one cycle immediately, then one per interval. Returns `false`
    /// and changes nothing when already running.
    pub fn start(self: &Arc<Self>, actor_id: impl Into<String>) -> bool {
        let actor_id = actor_id.into();
        let mut scheduler = self.scheduler.lock();
        if let Some(handle) = scheduler.as_ref() {
            if !handle.task.is_finished() {
                warn!(
                    running_actor = %handle.actor_id,
                    "Health monitor already running, ignoring start"
                );
                return false;
            }
        }

        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let monitor = Arc::clone(self);
        let period = self.config.check_interval;
        let cycle_actor = actor_id.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        debug!(actor_id = %cycle_actor, "Running health check cycle");
                        monitor.check_all_providers_health(&cycle_actor).await;
                    }
                }
            }
            debug!("Health check scheduler exited");
        });

        info!(
            actor_id = %actor_id,
            interval_secs = period.as_secs(),
            providers = self.enabled_providers().len(),
            "Health monitor started"
        );
        *scheduler = Some(SchedulerHandle {
            shutdown,
            task,
            actor_id,
        });
        true
    }

    /// Stop periodic checks, letting an in-flight cycle finish.
    ///
    /// Returns `false` when the monitor was not running.
    pub async fn stop(&self) -> bool {
        let handle = self.scheduler.lock().take();
        let Some(handle) = handle else {
            debug!("Health monitor not running, ignoring stop");
            return false;
        };

        let _ = handle.shutdown.send(true);
        if let Err(e) = handle.task.await {
            error!("Health check scheduler terminated abnormally: {}", e);
        }
        info!(actor_id = %handle.actor_id, "Health monitor stopped");
        true
    }

    pub fn is_running(&self) -> bool {
        self.scheduler
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.task.is_finished())
    }

    /// Actor the running scheduler attributes its probes to
    pub fn running_actor(&self) -> Option<String> {
        self.scheduler
            .lock()
            .as_ref()
            .filter(|handle| !handle.task.is_finished())
            .map(|handle| handle.actor_id.clone())
    }

    /// Administrative override closing the circuit for `provider`
    pub fn reset_circuit_breaker(&self, provider: ProviderKind) {
        self.registry.breaker.reset(provider);
    }

    /// Seed last known records from the store, returns how many were loaded
    pub async fn hydrate_from_store(&self) -> Result<usize> {
        let records = self.store.load_health_records().await?;
        let count = records.len();
        for record in records {
            self.registry.store_record(record);
        }
        info!("Loaded {} persisted health records", count);
        Ok(count)
    }
}
