// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HuggingFace Inference API adapter (text generation).
//!
//! The inference endpoint takes a single prompt string, so the grounding
//! context is prepended to the question.

use async_trait::async_trait;
use taxnova_core::{ProviderAdapter, ProviderConfig, ProviderId, TaxnovaError};

use crate::client::{non_empty, require_key, HttpClient};
use crate::types::{Generation, GenerationParameters, GenerationRequest};

const API_BASE_URL: &str = "https://api-inference.huggingface.co/models";

#[derive(Debug, Clone)]
pub struct HuggingFaceProvider {
    http: HttpClient,
    base_url: String,
}

impl HuggingFaceProvider {
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

fn build_prompt(prompt: &str, context: &str) -> String {
    format!("{context}\n\nUser Question: {prompt}\n\nAnswer:")
}

#[async_trait]
impl ProviderAdapter for HuggingFaceProvider {
    fn id(&self) -> ProviderId {
        ProviderId::HuggingFace
    }

    async fn respond(
        &self,
        prompt: &str,
        context: &str,
        config: &ProviderConfig,
    ) -> Result<String, TaxnovaError> {
        let key = require_key(ProviderId::HuggingFace, config.api_key.as_ref())?;
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            config.model_id
        );

        let request = GenerationRequest {
            inputs: build_prompt(prompt, context),
            parameters: GenerationParameters {
                max_new_tokens: config.max_tokens,
                temperature: config.temperature,
                return_full_text: false,
                do_sample: true,
            },
        };

        let generations: Vec<Generation> = self
            .http
            .post_json(
                ProviderId::HuggingFace,
                &url,
                &request,
                Some(key),
                &[],
                config.timeout(),
            )
            .await?;

        let text = generations.into_iter().next().and_then(|g| g.generated_text);
        non_empty(ProviderId::HuggingFace, text)
    }
}
