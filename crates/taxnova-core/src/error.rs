// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the TaxNova workspace.

use std::time::Duration;

use thiserror::Error;

use crate::types::ProviderId;

/// The primary error type raised by analysis, calculation, and provider calls.
///
/// Every variant maps onto exactly one [`ErrorKind`](crate::types::ErrorKind)
/// through [`classify`](crate::classify::classify).
#[derive(Debug, Error)]
pub enum TaxnovaError {
    /// Configuration errors (invalid TOML, out-of-range values, bad reference tables).
    #[error("configuration error: {0}")]
    Config(String),

    /// A provider call exceeded its per-attempt bound.
    #[error("{provider} timed out after {duration:?}")]
    Timeout {
        provider: ProviderId,
        duration: Duration,
    },

    /// The provider signalled throttling (HTTP 429 or equivalent).
    #[error("{provider} rate limited the request: {message}")]
    RateLimited { provider: ProviderId, message: String },

    /// The provider rejected (or we lack) the credentials.
    #[error("{provider} rejected credentials: {message}")]
    AuthFailed { provider: ProviderId, message: String },

    /// Any other transport or service failure.
    #[error("{provider} unavailable: {message}")]
    Unavailable {
        provider: ProviderId,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Normalized query shorter than the minimum length.
    #[error("query too short ({length} characters)")]
    QueryTooShort { length: usize },

    /// Normalized query longer than the maximum length.
    #[error("query too long ({length} characters)")]
    QueryTooLong { length: usize },

    /// Query is not well-formed text.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Income was negative.
    #[error("invalid income: {0}")]
    InvalidIncome(f64),

    /// The calculator could not produce a result.
    #[error("calculation failed: {0}")]
    CalculationFailed(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TaxnovaError {
    /// Shorthand for an [`TaxnovaError::Unavailable`] without a source error.
    pub fn unavailable(provider: ProviderId, message: impl Into<String>) -> Self {
        TaxnovaError::Unavailable {
            provider,
            message: message.into(),
            source: None,
        }
    }

    /// The provider this error originated from, if any.
    pub fn provider(&self) -> Option<ProviderId> {
        match self {
            TaxnovaError::Timeout { provider, .. }
            | TaxnovaError::RateLimited { provider, .. }
            | TaxnovaError::AuthFailed { provider, .. }
            | TaxnovaError::Unavailable { provider, .. } => Some(*provider),
            _ => None,
        }
    }
}
