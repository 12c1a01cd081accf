//! Analytics types and data structures

use crate::core::providers::ProviderKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Distinguishes synthetic probes from user-facing traffic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    HealthCheck,
    UserRequest,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::HealthCheck => "health_check",
            RequestType::UserRequest => "user_request",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One metered call to a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageEvent {
    pub id: Uuid,
    /// User or system account the call is attributed to
    pub actor_id: String,
    pub provider: ProviderKind,
    pub model: String,
    pub request_type: RequestType,
    pub input_tokens: u32,
    pub output_tokens: u32,
    /// Estimated cost in USD
    pub cost_usd: f64,
    pub latency_ms: u64,
    pub success: bool,
    pub created_at: DateTime<Utc>,
}

impl UsageEvent {
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}
