// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use std::collections::HashSet;

use taxnova_core::ProviderId;

use crate::diagnostic::ConfigError;
use crate::model::TaxnovaConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &TaxnovaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.llm.max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "llm.max_tokens must be a positive integer".to_string(),
        });
    }

    let temperature = config.llm.temperature;
    if !(0.0..=1.0).contains(&temperature) {
        errors.push(ConfigError::Validation {
            message: format!("llm.temperature must be within [0, 1], got {temperature}"),
        });
    }

    if config.llm.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "llm.timeout_secs must be at least 1".to_string(),
        });
    }

    if let Some(chain) = &config.llm.fallback_chain {
        let mut seen = HashSet::new();
        for id in chain {
            if !seen.insert(id) {
                errors.push(ConfigError::Validation {
                    message: format!("duplicate provider `{id}` in llm.fallback_chain"),
                });
            }
        }
    }

    for id in ProviderId::ALL {
        if let Some(url) = &config.providers.section(id).base_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            errors.push(ConfigError::Validation {
                message: format!(
                    "providers.{id}.base_url `{url}` must start with http:// or https://"
                ),
            });
        }
    }

    if let Some(path) = &config.tax.reference_file
        && path.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "tax.reference_file must not be empty when set".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(errors: &[ConfigError]) -> Vec<String> {
        errors.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&TaxnovaConfig::default()).is_ok());
    }

    #[test]
    fn zero_max_tokens_fails_validation() {
        let mut config = TaxnovaConfig::default();
        config.llm.max_tokens = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(messages(&errors).iter().any(|m| m.contains("max_tokens")));
    }

    #[test]
    fn temperature_outside_unit_interval_fails() {
        let mut config = TaxnovaConfig::default();
        config.llm.temperature = 1.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(messages(&errors).iter().any(|m| m.contains("temperature")));

        config.llm.temperature = 1.0;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn duplicate_chain_entries_fail() {
        let mut config = TaxnovaConfig::default();
        config.llm.fallback_chain = Some(vec![ProviderId::OpenAi, ProviderId::OpenAi]);
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            &errors[0],
            ConfigError::Validation { message } if message.contains("duplicate provider `openai`")
        ));
    }

    #[test]
    fn non_http_base_url_fails() {
        let mut config = TaxnovaConfig::default();
        config.providers.local.base_url = Some("localhost:11434".into());
        let errors = validate_config(&config).unwrap_err();
        assert!(messages(&errors).iter().any(|m| m.contains("providers.local.base_url")));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = TaxnovaConfig::default();
        config.llm.max_tokens = 0;
        config.llm.temperature = -0.1;
        config.llm.timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
