// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query classification and response routing for TaxNova.
//!
//! [`TextAnalyzer`] classifies a query, [`StructuredAnswerResolver`] answers
//! what the reference tables can, and [`ResponseRouter`] walks the provider
//! chain and falls back to an offline answer when every provider fails.

pub mod analyzer;
pub mod interaction;
pub mod resolver;
pub mod router;

pub use analyzer::TextAnalyzer;
pub use interaction::TracingInteractionLog;
pub use resolver::{Resolution, StructuredAnswerResolver};
pub use router::ResponseRouter;
