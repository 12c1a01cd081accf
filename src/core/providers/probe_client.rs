//! The probe capability consumed by the health monitor

use super::kind::ProviderKind;
use super::unified_provider::ProviderError;
use async_trait::async_trait;

/// A single minimal generation request
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeRequest {
    pub provider: ProviderKind,
    pub model: String,
    pub credential: String,
    pub prompt: String,
    pub max_output_tokens: u32,
}

/// Call a provider's text-generation endpoint once.
///
/// Implementations may fail or hang; callers bound the call with their own timeout.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProbeClient: Send + Sync {
    /// Returns the generated text
    async fn invoke(&self, request: &ProbeRequest) -> Result<String, ProviderError>;
}
