// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic tax computation and reference data for TaxNova.
//!
//! - [`calculate`]: progressive tax over a validated [`SlabTable`]
//! - [`ReferenceData`]: slabs, filing deadlines, deductions, and withholding
//!   rates, with the pre-formatted texts used for structured answers
//! - [`currency`]: rupee formatting, the only place amounts are rounded

pub mod calculator;
pub mod currency;
pub mod reference;

pub use calculator::{calculate, SlabBreakdown, SlabTable, TaxCalculationResult, TaxSlab};
pub use currency::{format_compact, format_rate, format_rupees};
pub use reference::{Deduction, DeductionLimit, FilingDeadline, ReferenceData, WithholdingRate};
