// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for TaxNova.
//!
//! Holds the workspace error type, the closed error taxonomy and its
//! classifier, the fixed-shape records that flow through the routing
//! pipeline, and the traits implemented by provider adapters and
//! interaction log sinks.

pub mod classify;
pub mod error;
pub mod redact;
pub mod traits;
pub mod types;

pub use classify::{classify, record_for};
pub use error::TaxnovaError;
pub use traits::{InteractionLog, ProviderAdapter};
pub use types::{
    Category, ErrorKind, ErrorLayer, ErrorRecord, InteractionRecord, ProviderConfig, ProviderId,
    QueryAnalysis, ResponseSource, RoutedResponse,
};
