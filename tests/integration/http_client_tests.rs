//! HTTP probe client against mocked provider endpoints

#[cfg(test)]
mod tests {
    use provider_health::core::providers::{HttpProbeClient, ProbeClient, ProbeRequest};
    use provider_health::{ProviderError, ProviderKind};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(provider: ProviderKind) -> ProbeRequest {
        ProbeRequest {
            provider,
            model: provider.default_model().to_string(),
            credential: "test-key".to_string(),
            prompt: "Hi".to_string(),
            max_output_tokens: 5,
        }
    }

    fn client(server: &MockServer, provider: ProviderKind) -> HttpProbeClient {
        HttpProbeClient::new(Duration::from_secs(5))
            .unwrap()
            .with_base_url(provider, server.uri())
    }

    #[tokio::test]
    async fn test_openai_compatible_probe() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "messages": [{ "role": "user", "content": "Hi" }],
                "max_tokens": 5,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": "Hello!" } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client(&server, ProviderKind::DeepSeek)
            .invoke(&request(ProviderKind::DeepSeek))
            .await
            .unwrap();
        assert_eq!(text, "Hello!");
    }

    #[tokio::test]
    async fn test_anthropic_probe() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(header("x-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{ "type": "text", "text": "Hi there" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client(&server, ProviderKind::Anthropic)
            .invoke(&request(ProviderKind::Anthropic))
            .await
            .unwrap();
        assert_eq!(text, "Hi there");
    }

    #[tokio::test]
    async fn test_gemini_probe() {
        let server = MockServer::start().await;
        let model = ProviderKind::Gemini.default_model();
        Mock::given(method("POST"))
            .and(path(format!("/models/{}:generateContent", model)))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "Hello" }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client(&server, ProviderKind::Gemini)
            .invoke(&request(ProviderKind::Gemini))
            .await
            .unwrap();
        assert_eq!(text, "Hello");
    }

    #[tokio::test]
    async fn test_status_codes_map_to_error_kinds() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("retry-after", "30")
                    .set_body_string("slow down"),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let client = client(&server, ProviderKind::OpenAi);
        let probe = request(ProviderKind::OpenAi);

        let err = client.invoke(&probe).await.unwrap_err();
        assert_eq!(
            err,
            ProviderError::RateLimit {
                provider: "openai",
                message: "slow down".to_string(),
                retry_after: Some(30),
            }
        );

        let err = client.invoke(&probe).await.unwrap_err();
        assert!(matches!(err, ProviderError::Authentication { .. }));

        let err = client.invoke(&probe).await.unwrap_err();
        assert!(matches!(err, ProviderError::ProviderUnavailable { .. }));
        assert_eq!(err.status_code(), Some(503));
    }

    #[tokio::test]
    async fn test_slow_provider_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(2))
                    .set_body_json(json!({ "choices": [] })),
            )
            .mount(&server)
            .await;

        let client = HttpProbeClient::new(Duration::from_millis(200))
            .unwrap()
            .with_base_url(ProviderKind::OpenRouter, server.uri());
        let err = client
            .invoke(&request(ProviderKind::OpenRouter))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_unexpected_body_yields_empty_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "x" })))
            .mount(&server)
            .await;

        let text = client(&server, ProviderKind::OpenAi)
            .invoke(&request(ProviderKind::OpenAi))
            .await
            .unwrap();
        assert!(text.is_empty());
    }
}
