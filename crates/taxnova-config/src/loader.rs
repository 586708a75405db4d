// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports `./taxnova.toml` > `~/.config/taxnova/taxnova.toml` > `/etc/taxnova/taxnova.toml`,
//! `TAXNOVA_*` overrides, and the bare deployment variables (`LLM_PROVIDER`,
//! `DEFAULT_MODEL`, `MAX_TOKENS`, `TEMPERATURE`, `<FAMILY>_API_KEY`).

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TaxnovaConfig;

/// Bare environment variables and the config keys they set.
const BARE_ENV_KEYS: &[(&str, &str)] = &[
    ("llm_provider", "llm.provider"),
    ("default_model", "llm.default_model"),
    ("max_tokens", "llm.max_tokens"),
    ("temperature", "llm.temperature"),
    ("huggingface_api_key", "providers.huggingface.api_key"),
    ("openrouter_api_key", "providers.openrouter.api_key"),
    ("openai_api_key", "providers.openai.api_key"),
];

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/taxnova/taxnova.toml`
/// 3. `~/.config/taxnova/taxnova.toml`
/// 4. `./taxnova.toml`
/// 5. `TAXNOVA_*` environment variables
/// 6. Bare deployment variables
pub fn load_config() -> Result<TaxnovaConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no environment).
pub fn load_config_from_str(toml_content: &str) -> Result<TaxnovaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TaxnovaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TaxnovaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TaxnovaConfig::default()))
        .merge(Toml::file(path))
        .merge(prefixed_env())
        .merge(bare_env())
        .extract()
}

/// The Figment used by [`load_config`], before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(TaxnovaConfig::default()))
        .merge(Toml::file("/etc/taxnova/taxnova.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("taxnova/taxnova.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("taxnova.toml"))
        .merge(prefixed_env())
        .merge(bare_env())
}

/// `TAXNOVA_*` variables, mapped section by section.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `TAXNOVA_LLM_MAX_TOKENS` must become `llm.max_tokens`.
fn prefixed_env() -> Env {
    Env::prefixed("TAXNOVA_").map(|key| map_prefixed_key(key.as_str()).into())
}

fn bare_env() -> Env {
    let names: Vec<&str> = BARE_ENV_KEYS.iter().map(|(name, _)| *name).collect();
    Env::raw()
        .only(&names)
        .map(|key| map_bare_key(key.as_str()).into())
}

/// Maps a prefix-stripped `TAXNOVA_` variable name to a dotted config key.
pub fn map_prefixed_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for family in ["huggingface", "openrouter", "openai", "local"] {
        let prefix = format!("providers_{family}_");
        if let Some(rest) = key.strip_prefix(&prefix) {
            return format!("providers.{family}.{rest}");
        }
    }
    for section in ["llm", "log", "tax"] {
        let prefix = format!("{section}_");
        if let Some(rest) = key.strip_prefix(&prefix) {
            return format!("{section}.{rest}");
        }
    }
    key
}

/// Maps a bare deployment variable name to a dotted config key.
pub fn map_bare_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    BARE_ENV_KEYS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, target)| (*target).to_string())
        .unwrap_or(key)
}
