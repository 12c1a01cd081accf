//! Test fixtures and factories

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use provider_health::core::analytics::UsageSink;
use provider_health::core::health::{
    HealthMonitor, HealthMonitorConfig, HealthStatus, ManualClock, ProviderHealthRecord,
    ProviderTarget,
};
use provider_health::core::providers::{ProbeClient, ProbeRequest, ProviderError, ProviderKind};
use provider_health::storage::{HealthRecordStore, InMemoryStore};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

type Reply = (Duration, Result<String, ProviderError>);

/// Probe client answering from per-provider scripts.
///
/// Providers without a script answer "Hello" immediately.
#[derive(Default)]
pub struct ScriptedProbeClient {
    scripts: Mutex<HashMap<ProviderKind, VecDeque<Reply>>>,
    requests: Mutex<Vec<ProbeRequest>>,
}

impl ScriptedProbeClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn succeed_after(&self, provider: ProviderKind, delay: Duration) {
        self.push(provider, delay, Ok("Hello".to_string()));
    }

    pub fn fail_with(&self, provider: ProviderKind, error: ProviderError) {
        self.push(provider, Duration::ZERO, Err(error));
    }

    pub fn hang(&self, provider: ProviderKind) {
        self.push(provider, Duration::from_secs(3600), Ok(String::new()));
    }

    fn push(&self, provider: ProviderKind, delay: Duration, reply: Result<String, ProviderError>) {
        self.scripts
            .lock()
            .entry(provider)
            .or_default()
            .push_back((delay, reply));
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ProbeRequest> {
        self.requests.lock().clone()
    }

    pub fn calls_for(&self, provider: ProviderKind) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.provider == provider)
            .count()
    }
}

#[async_trait]
impl ProbeClient for ScriptedProbeClient {
    async fn invoke(&self, request: &ProbeRequest) -> Result<String, ProviderError> {
        self.requests.lock().push(request.clone());
        let step = self
            .scripts
            .lock()
            .get_mut(&request.provider)
            .and_then(VecDeque::pop_front);
        let (delay, reply) = step.unwrap_or((Duration::ZERO, Ok("Hello".to_string())));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        reply
    }
}

/// Factory for health records
pub struct RecordFactory;

impl RecordFactory {
    pub fn at(provider: ProviderKind, status: HealthStatus, checked_at: DateTime<Utc>) -> ProviderHealthRecord {
        ProviderHealthRecord {
            provider,
            status,
            uptime_percent: 100.0,
            error_rate_percent: 0.0,
            avg_latency_ms: 150.0,
            last_checked_at: checked_at,
            last_incident_at: None,
            incident_description: None,
        }
    }

    pub fn operational(provider: ProviderKind) -> ProviderHealthRecord {
        Self::at(provider, HealthStatus::Operational, epoch())
    }
}

/// Fixed start time for manual clocks
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
}

/// Monitor over a scripted client, manual clock and in-memory store
pub struct MonitorHarness {
    pub monitor: Arc<HealthMonitor>,
    pub client: Arc<ScriptedProbeClient>,
    pub store: Arc<InMemoryStore>,
    pub clock: Arc<ManualClock>,
}

impl MonitorHarness {
    pub fn new(providers: &[ProviderKind]) -> Self {
        Self::with_config(HealthMonitorConfig::default(), providers)
    }

    pub fn with_config(config: HealthMonitorConfig, providers: &[ProviderKind]) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::with_store(config, providers, store.clone(), store)
    }

    /// Harness persisting through `records`, keeping usage in memory
    pub fn with_store(
        config: HealthMonitorConfig,
        providers: &[ProviderKind],
        records: Arc<dyn HealthRecordStore>,
        store: Arc<InMemoryStore>,
    ) -> Self {
        let client = ScriptedProbeClient::new();
        let clock = Arc::new(ManualClock::new(epoch()));
        let targets = providers
            .iter()
            .map(|p| ProviderTarget::new(*p, format!("key-{}", p)))
            .collect();
        let usage: Arc<dyn UsageSink> = store.clone();
        let monitor = Arc::new(HealthMonitor::with_clock(
            config,
            targets,
            client.clone(),
            records,
            usage,
            clock.clone(),
        ));
        Self {
            monitor,
            client,
            store,
            clock,
        }
    }
}
