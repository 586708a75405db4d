// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sink for completed exchanges.

use crate::types::InteractionRecord;

/// Receives one record per completed request. Sinks must not fail the
/// request; implementations swallow and log their own I/O errors.
pub trait InteractionLog: Send + Sync {
    fn record(&self, record: &InteractionRecord);
}
