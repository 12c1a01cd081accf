//! Health status types and check results
//!
//! This module defines the core types for health monitoring including
//! health status levels, probe results and the persisted health record.

use crate::core::providers::ProviderKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Health status levels, ordered from best to worst
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Provider is answering normally
    Operational,
    /// Provider answers, but slowly or with elevated errors
    Degraded,
    /// Provider is failing or its circuit is open
    Outage,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Operational => "operational",
            HealthStatus::Degraded => "degraded",
            HealthStatus::Outage => "outage",
        }
    }

    /// Parse the persisted form, `None` for anything unrecognised
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "operational" => Some(HealthStatus::Operational),
            "degraded" => Some(HealthStatus::Degraded),
            "outage" => Some(HealthStatus::Outage),
            _ => None,
        }
    }

    /// Worst status of a set, `None` when the set is empty
    pub fn worst<I: IntoIterator<Item = HealthStatus>>(statuses: I) -> Option<HealthStatus> {
        statuses.into_iter().max()
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probe-level failure classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeErrorKind {
    Timeout,
    ApiError,
    RateLimit,
}

impl ProbeErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeErrorKind::Timeout => "timeout",
            ProbeErrorKind::ApiError => "api_error",
            ProbeErrorKind::RateLimit => "rate_limit",
        }
    }
}

impl fmt::Display for ProbeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Whether the provider answered within the timeout
    pub success: bool,
    /// Wall time spent on the probe in milliseconds
    pub latency_ms: u64,
    /// Failure classification, `None` on success
    pub error_type: Option<ProbeErrorKind>,
    /// Failure detail, `None` on success
    pub error_message: Option<String>,
    /// Approximate tokens in the provider's reply
    pub output_tokens: u32,
    /// When the probe settled
    pub checked_at: DateTime<Utc>,
}

impl HealthCheckResult {
    /// Create a successful result
    pub fn success(latency_ms: u64, output_tokens: u32, checked_at: DateTime<Utc>) -> Self {
        Self {
            success: true,
            latency_ms,
            error_type: None,
            error_message: None,
            output_tokens,
            checked_at,
        }
    }

    /// Create a failed result
    pub fn failure(
        latency_ms: u64,
        error_type: ProbeErrorKind,
        error_message: impl Into<String>,
        checked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            success: false,
            latency_ms,
            error_type: Some(error_type),
            error_message: Some(error_message.into()),
            output_tokens: 0,
            checked_at,
        }
    }
}

/// Persisted per-provider health snapshot.
///
/// Overwritten on every completed check of the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderHealthRecord {
    pub provider: ProviderKind,
    pub status: HealthStatus,
    pub uptime_percent: f64,
    pub error_rate_percent: f64,
    pub avg_latency_ms: f64,
    pub last_checked_at: DateTime<Utc>,
    pub last_incident_at: Option<DateTime<Utc>>,
    pub incident_description: Option<String>,
}

/// Why a provider check did not probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Breaker open and cool-down not yet elapsed
    CircuitOpen,
    /// Provider disabled or missing a credential
    NotConfigured,
}

/// Result of checking one provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProviderCheck {
    Completed {
        result: HealthCheckResult,
        record: ProviderHealthRecord,
    },
    Skipped {
        provider: ProviderKind,
        reason: SkipReason,
    },
}

impl ProviderCheck {
    pub fn provider(&self) -> ProviderKind {
        match self {
            ProviderCheck::Completed { record, .. } => record.provider,
            ProviderCheck::Skipped { provider, .. } => *provider,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ProviderCheck::Skipped { .. })
    }

    pub fn record(&self) -> Option<&ProviderHealthRecord> {
        match self {
            ProviderCheck::Completed { record, .. } => Some(record),
            ProviderCheck::Skipped { .. } => None,
        }
    }
}
