//! Tri-level status evaluation

use super::types::HealthStatus;

/// Thresholds used by [`StatusEvaluator`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusThresholds {
    /// Error rate (percent) at or above which a provider is degraded
    pub degraded_error_rate: f64,
    /// Error rate (percent) at or above which a provider is in outage
    pub outage_error_rate: f64,
    /// A probe slower than `avg * spike_multiplier` is a latency spike
    pub spike_multiplier: f64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            degraded_error_rate: 20.0,
            outage_error_rate: 50.0,
            spike_multiplier: 2.0,
        }
    }
}

/// Pure mapping from error rate, latency spikes and breaker state to a status
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusEvaluator {
    thresholds: StatusThresholds,
}

impl StatusEvaluator {
    pub fn new(thresholds: StatusThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &StatusThresholds {
        &self.thresholds
    }

    pub fn evaluate(
        &self,
        error_rate: f64,
        is_latency_spike: bool,
        circuit_open: bool,
    ) -> HealthStatus {
        if circuit_open || error_rate >= self.thresholds.outage_error_rate {
            HealthStatus::Outage
        } else if error_rate >= self.thresholds.degraded_error_rate || is_latency_spike {
            HealthStatus::Degraded
        } else {
            HealthStatus::Operational
        }
    }

    /// `current > avg * multiplier`; never a spike without a positive historical average
    pub fn is_latency_spike(&self, current_ms: u64, historical_avg_ms: Option<f64>) -> bool {
        match historical_avg_ms {
            Some(avg) if avg > 0.0 => current_ms as f64 > avg * self.thresholds.spike_multiplier,
            _ => false,
        }
    }
}
