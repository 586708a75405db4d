// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-shape records shared by the analyzer, resolver, providers, and router.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize, Serializer};
use strum::{Display, EnumString};

/// Query category assigned by the text analyzer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Rates,
    Calculation,
    Filing,
    Deductions,
    Withholding,
    General,
    /// Assigned to queries that failed validation.
    Invalid,
}

/// Result of analyzing one raw query. Created per request, never shared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryAnalysis {
    pub raw_text: String,
    /// Trimmed, lowercased, whitespace-collapsed form of `raw_text`.
    pub normalized_text: String,
    pub is_valid: bool,
    pub category: Category,
    /// Numbers in order of appearance.
    pub extracted_numbers: Vec<f64>,
    pub matched_keywords: BTreeSet<String>,
    /// Present only when `is_valid` is false.
    pub rejection_reason: Option<ErrorKind>,
    /// Valid query that mentions nothing tax related.
    pub off_topic: bool,
}

impl QueryAnalysis {
    /// First extracted number, treated as annual income.
    pub fn income(&self) -> Option<f64> {
        self.extracted_numbers.first().copied()
    }
}

/// External answer provider families.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    HuggingFace,
    OpenRouter,
    OpenAi,
    Local,
}

impl ProviderId {
    /// Every family in default chain order.
    pub const ALL: [ProviderId; 4] = [
        ProviderId::HuggingFace,
        ProviderId::OpenRouter,
        ProviderId::OpenAi,
        ProviderId::Local,
    ];

    /// Environment variable carrying this family's API key, if it needs one.
    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            ProviderId::HuggingFace => Some("HUGGINGFACE_API_KEY"),
            ProviderId::OpenRouter => Some("OPENROUTER_API_KEY"),
            ProviderId::OpenAi => Some("OPENAI_API_KEY"),
            ProviderId::Local => None,
        }
    }

    /// Model used when neither the family section nor `default_model` names one.
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderId::HuggingFace => "microsoft/DialoGPT-medium",
            ProviderId::OpenRouter => "meta-llama/llama-3.1-8b-instruct",
            ProviderId::OpenAi => "gpt-3.5-turbo",
            ProviderId::Local => "llama3",
        }
    }
}

/// Per-request provider settings. Immutable once built.
#[derive(Debug)]
pub struct ProviderConfig {
    pub provider_id: ProviderId,
    pub api_key: Option<SecretString>,
    pub model_id: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

impl ProviderConfig {
    /// Creates a config with the family's default model and stock limits.
    pub fn new(provider_id: ProviderId) -> Self {
        Self {
            provider_id,
            api_key: None,
            model_id: provider_id.default_model().to_string(),
            max_tokens: 500,
            temperature: 0.7,
            timeout_seconds: 30,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Per-attempt bound on a provider call.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Closed error taxonomy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ApiTimeout,
    ApiRateLimit,
    ApiAuthFailed,
    ApiUnavailable,
    QueryTooShort,
    QueryTooLong,
    InvalidInput,
    InvalidIncome,
    CalculationFailed,
    General,
}

/// Pipeline layer an [`ErrorKind`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLayer {
    /// Recoverable through the fallback chain.
    Provider,
    /// Terminal for the request; no provider is called.
    Validation,
    /// Recoverable by falling through to the provider chain.
    Computation,
    /// Recoverable through the offline fallback.
    General,
}

impl ErrorKind {
    pub fn layer(&self) -> ErrorLayer {
        match self {
            ErrorKind::ApiTimeout
            | ErrorKind::ApiRateLimit
            | ErrorKind::ApiAuthFailed
            | ErrorKind::ApiUnavailable => ErrorLayer::Provider,
            ErrorKind::QueryTooShort | ErrorKind::QueryTooLong | ErrorKind::InvalidInput => {
                ErrorLayer::Validation
            }
            ErrorKind::InvalidIncome | ErrorKind::CalculationFailed => ErrorLayer::Computation,
            ErrorKind::General => ErrorLayer::General,
        }
    }

    /// Whether this kind ends the request immediately.
    pub fn is_terminal(&self) -> bool {
        self.layer() == ErrorLayer::Validation
    }

    /// The fixed, user-safe message for this kind.
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorKind::ApiTimeout => "⏱️ The request timed out. Please try again in a moment.",
            ErrorKind::ApiRateLimit => {
                "🚫 API rate limit exceeded. Please wait a moment before trying again."
            }
            ErrorKind::ApiAuthFailed => {
                "🔑 API authentication failed. Please check your API key configuration."
            }
            ErrorKind::ApiUnavailable => {
                "🔧 The AI service is temporarily unavailable. Please try again later."
            }
            ErrorKind::QueryTooShort => {
                "⚠️ Query too short: Please provide a more detailed question about Pakistan's tax system."
            }
            ErrorKind::QueryTooLong => {
                "⚠️ Query too long: Please keep your question under 500 characters for better processing."
            }
            ErrorKind::InvalidInput => {
                "⚠️ Please check your input and try again. Make sure your question is clear and specific."
            }
            ErrorKind::InvalidIncome => {
                "🧮 The income amount must be zero or positive. Please verify the amount and try again."
            }
            ErrorKind::CalculationFailed => {
                "🧮 There was an error calculating the tax. Please verify the income amount and try again."
            }
            ErrorKind::General => {
                "❌ An error occurred while processing your request. Please try again."
            }
        }
    }
}

/// Classified failure, safe to show (`user_message`) and to log (`message`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    /// Technical description with secrets redacted.
    pub message: String,
    pub user_message: String,
    pub context: BTreeMap<String, String>,
}

/// Where a routed answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    Structured,
    Provider(ProviderId),
    Fallback,
}

impl std::fmt::Display for ResponseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseSource::Structured => write!(f, "structured"),
            ResponseSource::Provider(id) => write!(f, "provider:{id}"),
            ResponseSource::Fallback => write!(f, "fallback"),
        }
    }
}

impl Serialize for ResponseSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Final answer for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutedResponse {
    pub text: String,
    pub source: ResponseSource,
    pub latency_ms: u64,
    pub error: Option<ErrorRecord>,
}

/// One completed exchange, as handed to an interaction log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionRecord {
    pub user_input: String,
    pub response_text: String,
    pub response_source: String,
    pub response_time_ms: u64,
    pub error_kind: Option<ErrorKind>,
}

impl InteractionRecord {
    pub fn new(user_input: &str, response: &RoutedResponse) -> Self {
        Self {
            user_input: user_input.to_string(),
            response_text: response.text.clone(),
            response_source: response.source.to_string(),
            response_time_ms: response.latency_ms,
            error_kind: response.error.as_ref().map(|e| e.kind),
        }
    }
}
