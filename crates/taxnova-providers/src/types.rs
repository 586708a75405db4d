// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the provider APIs.
//!
//! Only the fields TaxNova reads or writes are modelled; everything else in
//! a response is ignored.

use serde::{Deserialize, Serialize};

// --- Chat completions (OpenAI, OpenRouter) ---

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    /// Null when the model returned only tool calls or was filtered.
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice, if any.
    pub fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
    }
}

// --- HuggingFace text generation ---

#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub inputs: String,
    pub parameters: GenerationParameters,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub return_full_text: bool,
    pub do_sample: bool,
}

/// One element of the `[{"generated_text": ...}]` response array.
#[derive(Debug, Clone, Deserialize)]
pub struct Generation {
    #[serde(default)]
    pub generated_text: Option<String>,
}

// --- Ollama-compatible /api/generate ---

#[derive(Debug, Clone, Serialize)]
pub struct LocalGenerateRequest {
    pub model: String,
    pub prompt: String,
    pub system: String,
    pub stream: bool,
    pub options: LocalOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocalOptions {
    pub temperature: f32,
    pub num_predict: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalGenerateResponse {
    #[serde(default)]
    pub response: String,
}
