// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for external answer providers.

use async_trait::async_trait;

use crate::error::TaxnovaError;
use crate::types::{ProviderConfig, ProviderId};

/// Uniform contract over one external answer provider family.
///
/// Implementations shape the outgoing request, inject `context` so replies
/// stay grounded in the reference tables, and normalize the provider's
/// native response into plain text. A call must not outlive
/// `config.timeout_seconds`; failures are reported as
/// [`TaxnovaError::Timeout`], [`TaxnovaError::RateLimited`],
/// [`TaxnovaError::AuthFailed`] or [`TaxnovaError::Unavailable`].
#[async_trait]
pub trait ProviderAdapter: Send + Sync + 'static {
    /// The family this adapter talks to.
    fn id(&self) -> ProviderId;

    /// Sends `prompt` with grounding `context` and returns the reply text.
    async fn respond(
        &self,
        prompt: &str,
        context: &str,
        config: &ProviderConfig,
    ) -> Result<String, TaxnovaError>;
}
