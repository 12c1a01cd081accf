//! HTTP response handling for errors

use super::types::HealthError;
use crate::core::providers::ProviderError;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};

impl ResponseError for HealthError {
    fn status_code(&self) -> StatusCode {
        match self {
            HealthError::Validation(_) => StatusCode::BAD_REQUEST,
            HealthError::ProviderNotFound(_) | HealthError::NotFound(_) => StatusCode::NOT_FOUND,
            HealthError::Provider(ProviderError::RateLimit { .. }) => {
                StatusCode::TOO_MANY_REQUESTS
            }
            HealthError::Provider(ProviderError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            HealthError::Provider(_) | HealthError::HttpClient(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            HealthError::Config(_) => ("CONFIG_ERROR", self.to_string()),
            HealthError::Database(_) => (
                "DATABASE_ERROR",
                "Database operation failed".to_string(),
            ),
            HealthError::Validation(_) => ("VALIDATION_ERROR", self.to_string()),
            HealthError::ProviderNotFound(_) => ("PROVIDER_NOT_FOUND", self.to_string()),
            HealthError::NotFound(_) => ("NOT_FOUND", self.to_string()),
            HealthError::Provider(_) | HealthError::HttpClient(_) => {
                ("PROVIDER_ERROR", self.to_string())
            }
            HealthError::Storage(_) => ("STORAGE_ERROR", self.to_string()),
            _ => (
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(self.status_code()).json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail payload
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}
