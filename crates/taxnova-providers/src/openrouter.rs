// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenRouter adapter (OpenAI-compatible chat completions).

use async_trait::async_trait;
use taxnova_core::{ProviderAdapter, ProviderConfig, ProviderId, TaxnovaError};

use crate::chat;
use crate::client::HttpClient;

const API_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Attribution headers OpenRouter uses for app rankings.
const APP_HEADERS: &[(&str, &str)] = &[
    ("HTTP-Referer", "https://taxnova-chatbot.streamlit.app"),
    ("X-Title", "TaxNova Chatbot"),
];

#[derive(Debug, Clone)]
pub struct OpenRouterProvider {
    http: HttpClient,
    base_url: String,
}

impl OpenRouterProvider {
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            base_url: API_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl ProviderAdapter for OpenRouterProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenRouter
    }

    async fn respond(
        &self,
        prompt: &str,
        context: &str,
        config: &ProviderConfig,
    ) -> Result<String, TaxnovaError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        chat::complete(
            &self.http,
            ProviderId::OpenRouter,
            &url,
            APP_HEADERS,
            prompt,
            context,
            config,
        )
        .await
    }
}
