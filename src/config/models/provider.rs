//! Provider configuration

use super::*;
use crate::core::health::ProviderTarget;
use crate::core::providers::ProviderKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One provider the monitor may probe
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub provider: ProviderKind,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Probe model, defaults to the provider's cheapest chat model
    #[serde(default)]
    pub model: Option<String>,
    /// API key, read from the provider's environment variable when absent
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("enabled", &self.enabled)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ProviderConfig {
    pub fn new(provider: ProviderKind) -> Self {
        Self {
            provider,
            enabled: true,
            model: None,
            api_key: None,
            base_url: None,
        }
    }

    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    /// Configured key, else the provider's environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(self.provider.api_key_env()).ok())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn to_target(&self) -> ProviderTarget {
        ProviderTarget {
            provider: self.provider,
            enabled: self.enabled,
            model: self.model().to_string(),
            credential: self.resolve_api_key(),
        }
    }
}
