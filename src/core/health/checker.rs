//! Health checking methods
//!
//! This module provides the per-provider check pipeline and the concurrent
//! fan-out used by each scheduled cycle.

use super::monitor::HealthMonitor;
use super::types::{HealthCheckResult, ProviderCheck, ProviderHealthRecord, SkipReason};
use crate::core::analytics::{RequestType, UsageEvent, estimate_cost};
use crate::core::providers::ProviderKind;
use futures::future::join_all;
use tracing::{debug, info, warn};
use uuid::Uuid;

impl HealthMonitor {
    /// Check every enabled provider concurrently and wait for all of them
    pub async fn check_all_providers_health(&self, actor_id: &str) -> Vec<ProviderCheck> {
        let providers = self.enabled_providers();
        let checks = providers
            .iter()
            .map(|provider| self.check_provider_health(*provider, actor_id));
        let outcomes = join_all(checks).await;

        let skipped = outcomes.iter().filter(|o| o.is_skipped()).count();
        info!(
            checked = outcomes.len() - skipped,
            skipped,
            "Health check cycle complete"
        );
        outcomes
    }

    /// Check one provider now
    pub async fn check_provider_health(
        &self,
        provider: ProviderKind,
        actor_id: &str,
    ) -> ProviderCheck {
        let Some(target) = self.targets.get(&provider) else {
            debug!(provider = %provider, "Provider not configured, skipping check");
            return ProviderCheck::Skipped {
                provider,
                reason: SkipReason::NotConfigured,
            };
        };
        let Some(credential) = target.usable_credential() else {
            debug!(provider = %provider, "Provider disabled or missing credential, skipping check");
            return ProviderCheck::Skipped {
                provider,
                reason: SkipReason::NotConfigured,
            };
        };

        let lock = self.registry.check_lock(provider);
        let _guard = lock.lock().await;

        if !self.registry.breaker.should_attempt(provider) {
            debug!(provider = %provider, "Circuit open, skipping check");
            return ProviderCheck::Skipped {
                provider,
                reason: SkipReason::CircuitOpen,
            };
        }

        let prior_avg = self.registry.latency.average(provider);
        let result = self.executor.execute(provider, &target.model, credential).await;
        let spike =
            result.success && self.evaluator.is_latency_spike(result.latency_ms, prior_avg);

        if result.success {
            self.registry.latency.record(provider, result.latency_ms);
        }
        self.registry.errors.record(provider, result.success);
        if result.success {
            self.registry.breaker.record_success(provider);
        } else {
            self.registry.breaker.record_failure(provider);
        }

        let record = self.build_record(provider, &result, spike);
        self.registry.store_record(record.clone());

        if let Err(e) = self.store.save_health_record(&record).await {
            warn!(provider = %provider, "Failed to persist health record: {}", e);
        }
        self.emit_usage(provider, &target.model, actor_id, &result).await;

        debug!(
            provider = %provider,
            status = %record.status,
            latency_ms = result.latency_ms,
            spike,
            "Provider check complete"
        );
        ProviderCheck::Completed { result, record }
    }

    fn build_record(
        &self,
        provider: ProviderKind,
        result: &HealthCheckResult,
        spike: bool,
    ) -> ProviderHealthRecord {
        let error_rate = self.registry.errors.error_rate(provider);
        let status = self.evaluator.evaluate(
            error_rate,
            spike,
            self.registry.breaker.is_open(provider),
        );

        let (last_incident_at, incident_description) = if result.success {
            self.registry
                .last_record(provider)
                .map(|prev| (prev.last_incident_at, prev.incident_description))
                .unwrap_or((None, None))
        } else {
            (Some(result.checked_at), result.error_message.clone())
        };

        ProviderHealthRecord {
            provider,
            status,
            uptime_percent: self.registry.errors.uptime(provider),
            error_rate_percent: error_rate,
            avg_latency_ms: self.registry.latency.stats(provider).avg,
            last_checked_at: result.checked_at,
            last_incident_at,
            incident_description,
        }
    }

    async fn emit_usage(
        &self,
        provider: ProviderKind,
        model: &str,
        actor_id: &str,
        result: &HealthCheckResult,
    ) {
        let input_tokens = self.executor.prompt_tokens();
        let event = UsageEvent {
            id: Uuid::new_v4(),
            actor_id: actor_id.to_string(),
            provider,
            model: model.to_string(),
            request_type: RequestType::HealthCheck,
            input_tokens,
            output_tokens: result.output_tokens,
            cost_usd: estimate_cost(provider, input_tokens, result.output_tokens),
            latency_ms: result.latency_ms,
            success: result.success,
            created_at: result.checked_at,
        };

        if let Err(e) = self.usage.record_usage(&event).await {
            warn!(provider = %provider, "Failed to record probe usage: {}", e);
        }
    }
}
