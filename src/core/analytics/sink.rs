//! Usage event sinks

use super::types::UsageEvent;
use crate::utils::error::Result;
use async_trait::async_trait;
use tracing::info;

/// Destination for usage events
#[async_trait]
pub trait UsageSink: Send + Sync {
    async fn record_usage(&self, event: &UsageEvent) -> Result<()>;
}

/// Writes each usage event as a structured log line
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingUsageSink;

#[async_trait]
impl UsageSink for TracingUsageSink {
    async fn record_usage(&self, event: &UsageEvent) -> Result<()> {
        info!(
            target: "usage",
            event_id = %event.id,
            actor_id = %event.actor_id,
            provider = %event.provider,
            model = %event.model,
            request_type = %event.request_type,
            input_tokens = event.input_tokens,
            output_tokens = event.output_tokens,
            cost_usd = event.cost_usd,
            latency_ms = event.latency_ms,
            success = event.success,
            "usage event"
        );
        Ok(())
    }
}
