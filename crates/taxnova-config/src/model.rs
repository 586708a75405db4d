// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so misspelled keys fail
//! at startup instead of being silently ignored.

use serde::{Deserialize, Serialize};
use taxnova_core::{ProviderConfig, ProviderId};

/// Top-level TaxNova configuration. Every section has defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TaxnovaConfig {
    /// Provider selection and request limits.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Per-family credentials and endpoints.
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Tax reference table settings.
    #[serde(default)]
    pub tax: TaxConfig,
}

impl TaxnovaConfig {
    /// Provider families in attempt order: the active provider first, then
    /// the fallback chain with the active provider and duplicates removed.
    pub fn provider_chain(&self) -> Vec<ProviderId> {
        let fallbacks = self
            .llm
            .fallback_chain
            .clone()
            .unwrap_or_else(|| ProviderId::ALL.to_vec());

        let mut chain = vec![self.llm.provider];
        for id in fallbacks {
            if !chain.contains(&id) {
                chain.push(id);
            }
        }
        chain
    }

    /// Builds the immutable per-request settings for one family.
    ///
    /// Model resolution: `[providers.<family>].model` > `llm.default_model`
    /// > the family's built-in default.
    pub fn provider_config(&self, id: ProviderId) -> ProviderConfig {
        let section = self.providers.section(id);
        let model = section
            .model
            .clone()
            .or_else(|| self.llm.default_model.clone())
            .unwrap_or_else(|| id.default_model().to_string());

        let mut config = ProviderConfig::new(id)
            .with_model(model)
            .with_timeout_seconds(self.llm.timeout_secs);
        config.max_tokens = self.llm.max_tokens;
        config.temperature = self.llm.temperature;
        if let Some(key) = section.api_key.as_deref().filter(|k| !k.is_empty()) {
            config = config.with_api_key(key);
        }
        config
    }
}

/// Provider selection and generation limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// Active (primary) provider family.
    #[serde(default = "default_provider")]
    pub provider: ProviderId,

    /// Model used by every family that does not name its own.
    #[serde(default)]
    pub default_model: Option<String>,

    /// Maximum tokens to generate per reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature in `[0, 1]`.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Per-attempt timeout for provider calls.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Families tried after the active one. `None` means all of them.
    #[serde(default)]
    pub fallback_chain: Option<Vec<ProviderId>>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            default_model: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            fallback_chain: None,
        }
    }
}

fn default_provider() -> ProviderId {
    ProviderId::HuggingFace
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    30
}

/// Settings for one provider family.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderSection {
    /// API key. Usually supplied through `<FAMILY>_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Endpoint override (self-hosted gateways, test servers).
    #[serde(default)]
    pub base_url: Option<String>,

    /// Model override for this family.
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub huggingface: ProviderSection,
    #[serde(default)]
    pub openrouter: ProviderSection,
    #[serde(default)]
    pub openai: ProviderSection,
    #[serde(default)]
    pub local: ProviderSection,
}

impl ProvidersConfig {
    pub fn section(&self, id: ProviderId) -> &ProviderSection {
        match id {
            ProviderId::HuggingFace => &self.huggingface,
            ProviderId::OpenRouter => &self.openrouter,
            ProviderId::OpenAi => &self.openai,
            ProviderId::Local => &self.local,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Log level for the `taxnova` targets (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSONL file receiving one record per completed exchange.
    #[serde(default)]
    pub interaction_log: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            interaction_log: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Tax reference table configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TaxConfig {
    /// TOML file replacing the built-in reference tables.
    #[serde(default)]
    pub reference_file: Option<String>,
}
