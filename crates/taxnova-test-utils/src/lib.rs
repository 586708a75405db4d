// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test doubles for TaxNova: scripted providers and an in-memory
//! interaction log.

pub mod mock_log;
pub mod mock_provider;

pub use mock_log::RecordingLog;
pub use mock_provider::{MockOutcome, MockProvider};
