//! Per-provider circuit breaker gating probe attempts
//!
//! Two states: **Closed** lets every probe through; **Open** suppresses probes
//! until `recovery_window` has elapsed since the last failure, then lets one
//! trial probe through per window. A success closes the circuit immediately.

use super::clock::Clock;
use crate::core::providers::ProviderKind;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Circuit breaker state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircuitState {
    /// Probes flow normally
    Closed,
    /// Probes are suppressed pending cool-down
    Open,
}

/// Circuit breaker configuration
#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures that open the circuit
    pub failure_threshold: u32,
    /// Time after the last failure before a trial probe is allowed
    pub recovery_window: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            recovery_window: Duration::from_secs(300),
        }
    }
}

/// Breaker bookkeeping for one provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitBreakerState {
    pub failure_count: u32,
    pub last_failure_time: Option<DateTime<Utc>>,
    pub is_open: bool,
}

impl CircuitBreakerState {
    pub fn state(&self) -> CircuitState {
        if self.is_open {
            CircuitState::Open
        } else {
            CircuitState::Closed
        }
    }
}

/// Circuit breakers for every provider, created lazily on first use
#[derive(Debug)]
pub struct CircuitBreaker {
    config: CircuitBreakerConfig,
    states: DashMap<ProviderKind, CircuitBreakerState>,
    clock: Arc<dyn Clock>,
}

impl CircuitBreaker {
    pub fn new(config: CircuitBreakerConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            states: DashMap::new(),
            clock,
        }
    }

    pub fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }

    /// Whether a probe may be sent to `provider` right now
    pub fn should_attempt(&self, provider: ProviderKind) -> bool {
        let Some(state) = self.states.get(&provider) else {
            return true;
        };
        if !state.is_open {
            return true;
        }

        let Some(last_failure) = state.last_failure_time else {
            return true;
        };
        let elapsed = self.clock.now().signed_duration_since(last_failure);
        match chrono::Duration::from_std(self.config.recovery_window) {
            Ok(window) => elapsed >= window,
            Err(_) => false,
        }
    }

    /// Record a successful probe. Returns `true` when this closed an open circuit.
    pub fn record_success(&self, provider: ProviderKind) -> bool {
        let mut state = self.states.entry(provider).or_default();
        let was_open = state.is_open;
        state.failure_count = 0;
        state.last_failure_time = None;
        state.is_open = false;

        if was_open {
            info!(provider = %provider, "Circuit breaker closed, provider recovered");
        }
        was_open
    }

    /// Record a failed probe. Returns `true` when this opened the circuit.
    pub fn record_failure(&self, provider: ProviderKind) -> bool {
        let now = self.clock.now();
        let mut state = self.states.entry(provider).or_default();
        state.failure_count = state.failure_count.saturating_add(1);
        state.last_failure_time = Some(now);

        if state.is_open {
            debug!(
                provider = %provider,
                failure_count = state.failure_count,
                "Trial probe failed, circuit stays open"
            );
            return false;
        }

        if state.failure_count >= self.config.failure_threshold {
            state.is_open = true;
            warn!(
                provider = %provider,
                failure_count = state.failure_count,
                "Circuit breaker opened"
            );
            return true;
        }
        false
    }

    pub fn is_open(&self, provider: ProviderKind) -> bool {
        self.states
            .get(&provider)
            .map(|s| s.is_open)
            .unwrap_or(false)
    }

    pub fn snapshot(&self, provider: ProviderKind) -> CircuitBreakerState {
        self.states
            .get(&provider)
            .map(|s| s.value().clone())
            .unwrap_or_default()
    }

    /// Administrative override: forget everything about `provider`
    pub fn reset(&self, provider: ProviderKind) {
        self.states.remove(&provider);
        info!(provider = %provider, "Circuit breaker reset");
    }
}
