//! Type conversions into HealthError

use super::types::HealthError;
use crate::core::providers::ProviderKindParseError;

impl From<ProviderKindParseError> for HealthError {
    fn from(err: ProviderKindParseError) -> Self {
        HealthError::ProviderNotFound(err.0)
    }
}

impl From<url::ParseError> for HealthError {
    fn from(err: url::ParseError) -> Self {
        HealthError::Config(format!("Invalid URL: {}", err))
    }
}

impl From<tokio::task::JoinError> for HealthError {
    fn from(err: tokio::task::JoinError) -> Self {
        HealthError::Internal(format!("Task failed: {}", err))
    }
}
