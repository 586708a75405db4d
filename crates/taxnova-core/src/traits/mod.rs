// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the router and its external collaborators.

pub mod interaction;
pub mod provider;

pub use interaction::InteractionLog;
pub use provider::ProviderAdapter;
