//! Bounded-time probe execution and failure classification

use super::clock::Clock;
use super::types::{HealthCheckResult, ProbeErrorKind};
use crate::core::analytics::estimate_tokens;
use crate::core::providers::{ProbeClient, ProbeRequest, ProviderError, ProviderKind};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// What to send and how long to wait
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub prompt: String,
    pub max_output_tokens: u32,
    pub timeout: Duration,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            prompt: "Hi".to_string(),
            max_output_tokens: 5,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Classify a failure from its message text.
///
/// Falls back to [`ProbeErrorKind::ApiError`] when nothing matches.
pub fn classify_error(message: &str) -> ProbeErrorKind {
    let lower = message.to_lowercase();
    if lower.contains("timeout") || lower.contains("timed out") {
        ProbeErrorKind::Timeout
    } else if lower.contains("rate limit") || lower.contains("429") {
        ProbeErrorKind::RateLimit
    } else {
        ProbeErrorKind::ApiError
    }
}

/// Classify a provider error, preferring its structure over its text
pub fn classify_provider_error(err: &ProviderError) -> ProbeErrorKind {
    match err {
        ProviderError::Timeout { .. } => ProbeErrorKind::Timeout,
        ProviderError::RateLimit { .. } => ProbeErrorKind::RateLimit,
        other if other.status_code() == Some(429) => ProbeErrorKind::RateLimit,
        other => classify_error(&other.to_string()),
    }
}

/// Sends one minimal request to a provider and reports what happened
pub struct ProbeExecutor {
    client: Arc<dyn ProbeClient>,
    settings: ProbeSettings,
    clock: Arc<dyn Clock>,
}

impl ProbeExecutor {
    pub fn new(client: Arc<dyn ProbeClient>, settings: ProbeSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            settings,
            clock,
        }
    }

    pub fn settings(&self) -> &ProbeSettings {
        &self.settings
    }

    /// Approximate input tokens of the probe prompt
    pub fn prompt_tokens(&self) -> u32 {
        estimate_tokens(&self.settings.prompt)
    }

    /// Run one probe. Every failure mode is captured in the returned result.
    pub async fn execute(
        &self,
        provider: ProviderKind,
        model: &str,
        credential: &str,
    ) -> HealthCheckResult {
        let request = ProbeRequest {
            provider,
            model: model.to_string(),
            credential: credential.to_string(),
            prompt: self.settings.prompt.clone(),
            max_output_tokens: self.settings.max_output_tokens,
        };

        let start = Instant::now();
        let outcome = tokio::time::timeout(self.settings.timeout, self.client.invoke(&request)).await;
        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let checked_at = self.clock.now();

        match outcome {
            Ok(Ok(text)) => {
                debug!(provider = %provider, latency_ms, "Probe succeeded");
                HealthCheckResult::success(latency_ms, estimate_tokens(&text), checked_at)
            }
            Ok(Err(error)) => {
                let kind = classify_provider_error(&error);
                warn!(provider = %provider, latency_ms, error_type = %kind, "Probe failed: {}", error);
                HealthCheckResult::failure(latency_ms, kind, error.to_string(), checked_at)
            }
            Err(_) => {
                let message = format!(
                    "Health check timeout after {}ms",
                    self.settings.timeout.as_millis()
                );
                warn!(provider = %provider, latency_ms, "{}", message);
                HealthCheckResult::failure(latency_ms, ProbeErrorKind::Timeout, message, checked_at)
            }
        }
    }
}
