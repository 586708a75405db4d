// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wires a validated configuration into a ready [`ResponseRouter`].

use std::path::Path;
use std::sync::Arc;

use taxnova_config::TaxnovaConfig;
use taxnova_core::{InteractionLog, ProviderConfig, TaxnovaError};
use taxnova_providers::{HttpClient, Provider};
use taxnova_router::ResponseRouter;
use taxnova_tax::ReferenceData;
use tracing::{debug, info};

use crate::interaction_log::JsonlInteractionLog;

/// Built-in tables, or the TOML override named by `[tax] reference_file`.
pub fn load_reference(config: &TaxnovaConfig) -> Result<Arc<ReferenceData>, TaxnovaError> {
    let data = match config.tax.reference_file.as_deref() {
        Some(path) => ReferenceData::from_path(Path::new(path))?,
        None => ReferenceData::default(),
    };
    Ok(Arc::new(data))
}

/// Builds the router with one adapter per family in the configured chain.
pub fn build_router(config: &TaxnovaConfig) -> Result<ResponseRouter, TaxnovaError> {
    let reference = load_reference(config)?;
    let http = HttpClient::new()?;

    let mut router = ResponseRouter::new(reference);
    for id in config.provider_chain() {
        let base_url = config.providers.section(id).base_url.as_deref();
        let adapter = Provider::build(id, http.clone(), base_url);
        router = router.with_provider(Arc::new(adapter), config.provider_config(id));
    }

    if let Some(path) = config.log.interaction_log.as_deref() {
        let log: Arc<dyn InteractionLog> = Arc::new(JsonlInteractionLog::open(Path::new(path))?);
        router = router.with_interaction_log(log);
        debug!(path, "interaction log enabled");
    }

    info!(chain = ?router.provider_ids(), "router ready");
    Ok(router)
}

/// Per-request settings for the configured active provider.
pub fn primary_provider_config(config: &TaxnovaConfig) -> ProviderConfig {
    config.provider_config(config.llm.provider)
}
