// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maps raised failures onto the closed [`ErrorKind`] taxonomy.

use std::collections::BTreeMap;

use crate::error::TaxnovaError;
use crate::redact::redact;
use crate::types::{ErrorKind, ErrorRecord};

/// Classify a failure into an [`ErrorRecord`].
///
/// `context` is copied into the record as-is; callers put things like the
/// provider id or the income that was being calculated there. The record's
/// `user_message` is always the fixed template for the kind.
pub fn classify(error: &TaxnovaError, context: BTreeMap<String, String>) -> ErrorRecord {
    let kind = kind_of(error);
    let mut context = context;
    if let Some(provider) = error.provider() {
        context
            .entry("provider".to_string())
            .or_insert_with(|| provider.to_string());
    }

    ErrorRecord {
        kind,
        message: redact(&error.to_string()),
        user_message: kind.user_message().to_string(),
        context,
    }
}

/// Build a record for a kind that was detected without a raised error
/// (e.g. a validation rejection).
pub fn record_for(kind: ErrorKind, message: impl Into<String>) -> ErrorRecord {
    ErrorRecord {
        kind,
        message: redact(&message.into()),
        user_message: kind.user_message().to_string(),
        context: BTreeMap::new(),
    }
}

impl TaxnovaError {
    /// The taxonomy kind this error classifies as.
    pub fn kind(&self) -> ErrorKind {
        kind_of(self)
    }
}

fn kind_of(error: &TaxnovaError) -> ErrorKind {
    match error {
        TaxnovaError::Timeout { .. } => ErrorKind::ApiTimeout,
        TaxnovaError::RateLimited { .. } => ErrorKind::ApiRateLimit,
        TaxnovaError::AuthFailed { .. } => ErrorKind::ApiAuthFailed,
        TaxnovaError::Unavailable { .. } => ErrorKind::ApiUnavailable,
        TaxnovaError::QueryTooShort { .. } => ErrorKind::QueryTooShort,
        TaxnovaError::QueryTooLong { .. } => ErrorKind::QueryTooLong,
        TaxnovaError::InvalidInput(_) => ErrorKind::InvalidInput,
        TaxnovaError::InvalidIncome(_) => ErrorKind::InvalidIncome,
        TaxnovaError::CalculationFailed(_) => ErrorKind::CalculationFailed,
        TaxnovaError::Internal(message) => sniff_message(message),
        TaxnovaError::Config(_) => ErrorKind::General,
    }
}

/// Best-effort classification of an opaque failure message.
fn sniff_message(message: &str) -> ErrorKind {
    let lower = message.to_lowercase();
    if lower.contains("timeout") || lower.contains("timed out") {
        ErrorKind::ApiTimeout
    } else if lower.contains("rate limit") || lower.contains("429") {
        ErrorKind::ApiRateLimit
    } else if lower.contains("unauthorized") || lower.contains("401") {
        ErrorKind::ApiAuthFailed
    } else if lower.contains("service unavailable") || lower.contains("503") {
        ErrorKind::ApiUnavailable
    } else {
        ErrorKind::General
    }
}
