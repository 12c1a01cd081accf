//! HTTP implementation of the probe capability
//!
//! Speaks just enough of each provider's generation API to send one short
//! prompt and read the reply back.

use super::kind::{ApiStyle, ProviderKind};
use super::probe_client::{ProbeClient, ProbeRequest};
use super::unified_provider::ProviderError;
use crate::utils::error::{HealthError, Result};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, RETRY_AFTER};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const USER_AGENT: &str = concat!("provider-health-monitor/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed probe client
#[derive(Debug, Clone)]
pub struct HttpProbeClient {
    http_client: reqwest::Client,
    base_urls: HashMap<ProviderKind, String>,
}

impl HttpProbeClient {
    /// Create a client whose transport timeout is `request_timeout`
    pub fn new(request_timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(request_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(HealthError::HttpClient)?;

        Ok(Self {
            http_client,
            base_urls: HashMap::new(),
        })
    }

    /// Override the base URL for one provider
    pub fn with_base_url(mut self, provider: ProviderKind, base_url: impl Into<String>) -> Self {
        self.base_urls.insert(provider, base_url.into());
        self
    }

    fn base_url(&self, provider: ProviderKind) -> &str {
        self.base_urls
            .get(&provider)
            .map(String::as_str)
            .unwrap_or_else(|| provider.default_base_url())
            .trim_end_matches('/')
    }

    fn build_request(&self, request: &ProbeRequest) -> std::result::Result<reqwest::RequestBuilder, ProviderError> {
        let provider = request.provider;
        let base_url = self.base_url(provider);
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let credential = HeaderValue::from_str(&request.credential).map_err(|e| {
            ProviderError::configuration(provider.as_str(), format!("Invalid credential: {}", e))
        })?;

        let builder = match provider.api_style() {
            ApiStyle::OpenAiCompatible => {
                let bearer = HeaderValue::from_str(&format!("Bearer {}", request.credential))
                    .map_err(|e| {
                        ProviderError::configuration(
                            provider.as_str(),
                            format!("Invalid credential: {}", e),
                        )
                    })?;
                headers.insert(AUTHORIZATION, bearer);
                self.http_client
                    .post(format!("{}/chat/completions", base_url))
                    .json(&json!({
                        "model": request.model,
                        "messages": [{ "role": "user", "content": request.prompt }],
                        "max_tokens": request.max_output_tokens,
                    }))
            }
            ApiStyle::Anthropic => {
                headers.insert("x-api-key", credential);
                headers.insert(
                    "anthropic-version",
                    HeaderValue::from_static(ANTHROPIC_VERSION),
                );
                self.http_client
                    .post(format!("{}/messages", base_url))
                    .json(&json!({
                        "model": request.model,
                        "max_tokens": request.max_output_tokens,
                        "messages": [{ "role": "user", "content": request.prompt }],
                    }))
            }
            ApiStyle::Gemini => {
                headers.insert("x-goog-api-key", credential);
                self.http_client
                    .post(format!(
                        "{}/models/{}:generateContent",
                        base_url, request.model
                    ))
                    .json(&json!({
                        "contents": [{ "parts": [{ "text": request.prompt }] }],
                        "generationConfig": { "maxOutputTokens": request.max_output_tokens },
                    }))
            }
        };

        Ok(builder.headers(headers))
    }
}

/// Pull the generated text out of a provider response body
fn extract_text(style: ApiStyle, body: &Value) -> Option<String> {
    let pointer = match style {
        ApiStyle::OpenAiCompatible => "/choices/0/message/content",
        ApiStyle::Anthropic => "/content/0/text",
        ApiStyle::Gemini => "/candidates/0/content/parts/0/text",
    };
    body.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn map_transport_error(provider: &'static str, err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::timeout(provider, err.to_string())
    } else {
        ProviderError::network(provider, err.to_string())
    }
}

#[async_trait]
impl ProbeClient for HttpProbeClient {
    async fn invoke(&self, request: &ProbeRequest) -> std::result::Result<String, ProviderError> {
        let provider = request.provider.as_str();
        let style = request.provider.api_style();
        debug!(provider, model = %request.model, "Sending probe request");

        let response = self
            .build_request(request)?
            .send()
            .await
            .map_err(|e| map_transport_error(provider, e))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(ProviderError::from_status(provider, status, body, retry_after));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::serialization(provider, e.to_string()))?;

        Ok(extract_text(style, &body).unwrap_or_default())
    }
}
