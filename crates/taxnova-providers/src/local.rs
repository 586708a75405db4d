// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local model adapter speaking the Ollama `/api/generate` protocol.
//!
//! Needs no API key; a configured key is ignored.

use async_trait::async_trait;
use taxnova_core::{ProviderAdapter, ProviderConfig, ProviderId, TaxnovaError};

use crate::client::{non_empty, HttpClient};
use crate::types::{LocalGenerateRequest, LocalGenerateResponse, LocalOptions};

const DEFAULT_BASE_URL: &str = "http://localhost:11434";

#[derive(Debug, Clone)]
pub struct LocalProvider {
    http: HttpClient,
    base_url: String,
}

impl LocalProvider {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl ProviderAdapter for LocalProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Local
    }

    async fn respond(
        &self,
        prompt: &str,
        context: &str,
        config: &ProviderConfig,
    ) -> Result<String, TaxnovaError> {
        let url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));
        let request = LocalGenerateRequest {
            model: config.model_id.clone(),
            prompt: prompt.to_string(),
            system: context.to_string(),
            stream: false,
            options: LocalOptions {
                temperature: config.temperature,
                num_predict: config.max_tokens,
            },
        };

        let response: LocalGenerateResponse = self
            .http
            .post_json(ProviderId::Local, &url, &request, None, &[], config.timeout())
            .await?;

        non_empty(ProviderId::Local, Some(response.response))
    }
}
