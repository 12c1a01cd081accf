//! Health monitoring system for AI providers
//!
//! This module probes providers on a schedule, tracks latency and error
//! windows, gates probing behind a per-provider circuit breaker and reports
//! a tri-level status for each provider.
//!
//! # Module Structure
//!
//! - `types` - Core health status types and check results
//! - `clock` - Wall-clock source used for timestamps and cool-downs
//! - `latency` - Rolling latency windows and percentile statistics
//! - `error_rate` - Rolling success/failure windows
//! - `circuit_breaker` - Per-provider Closed/Open breaker
//! - `evaluator` - Status evaluation and latency spike detection
//! - `probe` - Bounded-time probe execution and error classification
//! - `registry` - Per-provider state owned by a monitor
//! - `monitor` - Health monitor, configuration and scheduler
//! - `checker` - Per-provider check pipeline and cycle fan-out
//! - `report` - Health report across all providers
//! - `tests` - Scenario tests for the monitor

pub mod checker;
pub mod circuit_breaker;
pub mod clock;
pub mod error_rate;
pub mod evaluator;
pub mod latency;
pub mod monitor;
pub mod probe;
pub mod registry;
pub mod report;
pub mod types;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitBreakerState, CircuitState};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error_rate::{CheckOutcome, ErrorRateTracker};
pub use evaluator::{StatusEvaluator, StatusThresholds};
pub use latency::{LatencyStats, LatencyTracker, compute_stats};
pub use monitor::{HealthMonitor, HealthMonitorConfig, ProviderTarget};
pub use probe::{ProbeExecutor, ProbeSettings, classify_error, classify_provider_error};
pub use registry::HealthRegistry;
pub use report::{HealthReport, ProviderReport};
pub use types::{
    HealthCheckResult, HealthStatus, ProbeErrorKind, ProviderCheck, ProviderHealthRecord,
    SkipReason,
};
