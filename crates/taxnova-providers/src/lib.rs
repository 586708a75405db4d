// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapters for TaxNova.
//!
//! Each family implements [`ProviderAdapter`]; [`Provider`] wraps the four of
//! them so the router can hold a homogeneous chain built from configuration.

mod chat;
pub mod client;
pub mod huggingface;
pub mod local;
pub mod openai;
pub mod openrouter;
pub mod types;

use async_trait::async_trait;
use taxnova_core::{ProviderAdapter, ProviderConfig, ProviderId, TaxnovaError};
use tracing::debug;

pub use client::HttpClient;
pub use huggingface::HuggingFaceProvider;
pub use local::LocalProvider;
pub use openai::OpenAiProvider;
pub use openrouter::OpenRouterProvider;

/// Any supported provider family.
#[derive(Debug, Clone)]
pub enum Provider {
    HuggingFace(HuggingFaceProvider),
    OpenRouter(OpenRouterProvider),
    OpenAi(OpenAiProvider),
    Local(LocalProvider),
}

impl Provider {
    /// Builds the adapter for `id`, optionally pointed at a custom endpoint.
    pub fn build(id: ProviderId, http: HttpClient, base_url: Option<&str>) -> Self {
        debug!(provider = %id, base_url = ?base_url, "building provider adapter");
        match id {
            ProviderId::HuggingFace => {
                let p = HuggingFaceProvider::new(http);
                Provider::HuggingFace(match base_url {
                    Some(url) => p.with_base_url(url),
                    None => p,
                })
            }
            ProviderId::OpenRouter => {
                let p = OpenRouterProvider::new(http);
                Provider::OpenRouter(match base_url {
                    Some(url) => p.with_base_url(url),
                    None => p,
                })
            }
            ProviderId::OpenAi => {
                let p = OpenAiProvider::new(http);
                Provider::OpenAi(match base_url {
                    Some(url) => p.with_base_url(url),
                    None => p,
                })
            }
            ProviderId::Local => {
                let p = LocalProvider::new(http);
                Provider::Local(match base_url {
                    Some(url) => p.with_base_url(url),
                    None => p,
                })
            }
        }
    }
}

#[async_trait]
impl ProviderAdapter for Provider {
    fn id(&self) -> ProviderId {
        match self {
            Provider::HuggingFace(p) => p.id(),
            Provider::OpenRouter(p) => p.id(),
            Provider::OpenAi(p) => p.id(),
            Provider::Local(p) => p.id(),
        }
    }

    async fn respond(
        &self,
        prompt: &str,
        context: &str,
        config: &ProviderConfig,
    ) -> Result<String, TaxnovaError> {
        match self {
            Provider::HuggingFace(p) => p.respond(prompt, context, config).await,
            Provider::OpenRouter(p) => p.respond(prompt, context, config).await,
            Provider::OpenAi(p) => p.respond(prompt, context, config).await,
            Provider::Local(p) => p.respond(prompt, context, config).await,
        }
    }
}
