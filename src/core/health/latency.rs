//! Rolling latency window per provider

use crate::core::providers::ProviderKind;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default number of samples kept per provider
pub const DEFAULT_LATENCY_WINDOW: usize = 100;

/// Summary of a latency window, all zero when the window is empty
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    pub avg: f64,
    pub p50: u64,
    pub p95: u64,
    pub p99: u64,
    pub min: u64,
    pub max: u64,
}

/// Bounded FIFO of successful-probe latencies, keyed by provider
#[derive(Debug)]
pub struct LatencyTracker {
    capacity: usize,
    windows: DashMap<ProviderKind, VecDeque<u64>>,
}

impl LatencyTracker {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            windows: DashMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a sample, evicting the oldest once the window is full
    pub fn record(&self, provider: ProviderKind, latency_ms: u64) {
        let mut window = self
            .windows
            .entry(provider)
            .or_insert_with(|| VecDeque::with_capacity(self.capacity));
        window.push_back(latency_ms);
        while window.len() > self.capacity {
            window.pop_front();
        }
    }

    pub fn stats(&self, provider: ProviderKind) -> LatencyStats {
        self.windows
            .get(&provider)
            .map(|window| {
                let samples: Vec<u64> = window.iter().copied().collect();
                compute_stats(&samples)
            })
            .unwrap_or_default()
    }

    /// Mean of the current window, `None` before any sample exists
    pub fn average(&self, provider: ProviderKind) -> Option<f64> {
        let window = self.windows.get(&provider)?;
        if window.is_empty() {
            return None;
        }
        Some(window.iter().sum::<u64>() as f64 / window.len() as f64)
    }

    pub fn len(&self, provider: ProviderKind) -> usize {
        self.windows.get(&provider).map(|w| w.len()).unwrap_or(0)
    }

    pub fn is_empty(&self, provider: ProviderKind) -> bool {
        self.len(provider) == 0
    }

    /// Samples oldest first
    pub fn samples(&self, provider: ProviderKind) -> Vec<u64> {
        self.windows
            .get(&provider)
            .map(|w| w.iter().copied().collect())
            .unwrap_or_default()
    }
}

impl Default for LatencyTracker {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY_WINDOW)
    }
}

/// Compute avg/min/max and nearest-rank percentiles over `samples`
pub fn compute_stats(samples: &[u64]) -> LatencyStats {
    if samples.is_empty() {
        return LatencyStats::default();
    }

    let mut sorted = samples.to_vec();
    sorted.sort_unstable();

    let total: u64 = sorted.iter().sum();
    LatencyStats {
        avg: total as f64 / sorted.len() as f64,
        p50: percentile(&sorted, 50.0),
        p95: percentile(&sorted, 95.0),
        p99: percentile(&sorted, 99.0),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
    }
}

// index = ceil(p/100 * n) - 1, clamped into the slice
fn percentile(sorted: &[u64], pct: f64) -> u64 {
    let rank = ((pct / 100.0) * sorted.len() as f64).ceil() as usize;
    let index = rank.saturating_sub(1).min(sorted.len() - 1);
    sorted[index]
}
