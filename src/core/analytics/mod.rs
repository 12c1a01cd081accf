//! Usage analytics for provider calls
//!
//! The health monitor emits one [`UsageEvent`] per probe so synthetic traffic
//! shows up in cost reporting, tagged [`RequestType::HealthCheck`].

pub mod cost;
pub mod sink;
pub mod types;

pub use cost::{ModelPricing, estimate_cost, estimate_tokens, probe_pricing};
pub use sink::{TracingUsageSink, UsageSink};
pub use types::{RequestType, UsageEvent};
