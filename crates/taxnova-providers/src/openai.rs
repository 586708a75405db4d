// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI chat completions adapter.

use async_trait::async_trait;
use taxnova_core::{ProviderAdapter, ProviderConfig, ProviderId, TaxnovaError};

use crate::chat;
use crate::client::HttpClient;

const API_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    http: HttpClient,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            base_url: API_BASE_URL.to_string(),
        }
    }

    /// Overrides the API base (gateways, wiremock).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    async fn respond(
        &self,
        prompt: &str,
        context: &str,
        config: &ProviderConfig,
    ) -> Result<String, TaxnovaError> {
        chat::complete(
            &self.http,
            ProviderId::OpenAi,
            &self.endpoint(),
            &[],
            prompt,
            context,
            config,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn provider(server: &MockServer) -> OpenAiProvider {
        OpenAiProvider::new(HttpClient::new().unwrap()).with_base_url(server.uri())
    }

    fn config() -> ProviderConfig {
        ProviderConfig::new(ProviderId::OpenAi).with_api_key("sk-test-openai-key")
    }

    #[tokio::test]
    async fn sends_context_as_system_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test-openai-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-3.5-turbo",
                "max_tokens": 500,
                "messages": [
                    {"role": "system", "content": "tax tables"},
                    {"role": "user", "content": "what is FBR?"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": " Federal Board of Revenue. "}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = provider(&server)
            .respond("what is FBR?", "tax tables", &config())
            .await
            .unwrap();
        assert_eq!(reply, "Federal Board of Revenue.");
    }

    #[tokio::test]
    async fn missing_key_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = provider(&server)
            .respond("q", "c", &ProviderConfig::new(ProviderId::OpenAi))
            .await
            .unwrap_err();
        assert!(matches!(err, TaxnovaError::AuthFailed { .. }));
    }

    #[tokio::test]
    async fn unauthorized_maps_to_auth_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let err = provider(&server).respond("q", "c", &config()).await.unwrap_err();
        assert!(matches!(err, TaxnovaError::AuthFailed { .. }));
        assert!(err.to_string().contains("Incorrect API key"));
    }

    #[tokio::test]
    async fn slow_reply_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"choices": []}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let err = provider(&server)
            .respond("q", "c", &config().with_timeout_seconds(1))
            .await
            .unwrap_err();
        assert!(
            matches!(err, TaxnovaError::Timeout { provider: ProviderId::OpenAi, .. }),
            "got: {err:?}"
        );
    }

    #[tokio::test]
    async fn empty_choices_are_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
            .mount(&server)
            .await;

        let err = provider(&server).respond("q", "c", &config()).await.unwrap_err();
        assert!(matches!(err, TaxnovaError::Unavailable { .. }));
    }
}
