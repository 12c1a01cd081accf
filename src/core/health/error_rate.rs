//! Rolling success/failure window per provider

use super::clock::Clock;
use crate::core::providers::ProviderKind;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;

/// Default number of outcomes kept per provider
pub const DEFAULT_ERROR_WINDOW: usize = 20;

/// One attempted probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub success: bool,
    pub timestamp: DateTime<Utc>,
}

/// Bounded FIFO of probe outcomes, keyed by provider
#[derive(Debug)]
pub struct ErrorRateTracker {
    capacity: usize,
    windows: DashMap<ProviderKind, VecDeque<CheckOutcome>>,
    clock: Arc<dyn Clock>,
}

impl ErrorRateTracker {
    pub fn new(capacity: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            capacity: capacity.max(1),
            windows: DashMap::new(),
            clock,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn record(&self, provider: ProviderKind, success: bool) {
        let outcome = CheckOutcome {
            success,
            timestamp: self.clock.now(),
        };
        let mut window = self
            .windows
            .entry(provider)
            .or_insert_with(|| VecDeque::with_capacity(self.capacity));
        window.push_back(outcome);
        while window.len() > self.capacity {
            window.pop_front();
        }
    }

    /// Percentage of failed outcomes, 0 when nothing is recorded
    pub fn error_rate(&self, provider: ProviderKind) -> f64 {
        match self.counts(provider) {
            (_, 0) => 0.0,
            (failed, total) => failed as f64 / total as f64 * 100.0,
        }
    }

    /// Percentage of successful outcomes, 100 when nothing is recorded
    pub fn uptime(&self, provider: ProviderKind) -> f64 {
        match self.counts(provider) {
            (_, 0) => 100.0,
            (failed, total) => (total - failed) as f64 / total as f64 * 100.0,
        }
    }

    pub fn len(&self, provider: ProviderKind) -> usize {
        self.windows.get(&provider).map(|w| w.len()).unwrap_or(0)
    }

    pub fn is_empty(&self, provider: ProviderKind) -> bool {
        self.len(provider) == 0
    }

    /// Outcomes oldest first
    pub fn outcomes(&self, provider: ProviderKind) -> Vec<CheckOutcome> {
        self.windows
            .get(&provider)
            .map(|w| w.iter().copied().collect())
            .unwrap_or_default()
    }

    // (failed, total)
    fn counts(&self, provider: ProviderKind) -> (usize, usize) {
        self.windows
            .get(&provider)
            .map(|w| (w.iter().filter(|o| !o.success).count(), w.len()))
            .unwrap_or((0, 0))
    }
}
