// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat-completions request shared by the OpenAI and OpenRouter adapters.

use taxnova_core::{ProviderConfig, ProviderId, TaxnovaError};

use crate::client::{non_empty, require_key, HttpClient};
use crate::types::{ChatMessage, ChatRequest, ChatResponse};

/// Sends `context` as the system message and `prompt` as the user message.
pub(crate) async fn complete(
    http: &HttpClient,
    provider: ProviderId,
    url: &str,
    headers: &[(&'static str, &'static str)],
    prompt: &str,
    context: &str,
    config: &ProviderConfig,
) -> Result<String, TaxnovaError> {
    let key = require_key(provider, config.api_key.as_ref())?;

    let request = ChatRequest {
        model: config.model_id.clone(),
        messages: vec![ChatMessage::system(context), ChatMessage::user(prompt)],
        max_tokens: config.max_tokens,
        temperature: config.temperature,
    };

    let response: ChatResponse = http
        .post_json(provider, url, &request, Some(key), headers, config.timeout())
        .await?;

    non_empty(provider, response.into_text())
}
