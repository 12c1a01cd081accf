//! AI provider identities and the probe capability
//!
//! The health monitor never talks to a provider directly; it goes through the
//! [`ProbeClient`] trait. [`HttpProbeClient`] is the production implementation.

pub mod http_client;
pub mod kind;
pub mod probe_client;
pub mod unified_provider;

pub use http_client::HttpProbeClient;
pub use kind::{ApiStyle, ProviderKind, ProviderKindParseError};
pub use probe_client::{ProbeClient, ProbeRequest};
pub use unified_provider::ProviderError;

#[cfg(test)]
pub use probe_client::MockProbeClient;
