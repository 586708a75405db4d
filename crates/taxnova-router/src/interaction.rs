// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interaction log sink that writes to `tracing`.

use taxnova_core::{InteractionLog, InteractionRecord};
use tracing::info;

/// User input longer than this is cut in log lines.
const MAX_LOGGED_INPUT_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingInteractionLog;

impl InteractionLog for TracingInteractionLog {
    fn record(&self, record: &InteractionRecord) {
        let input = truncate(&record.user_input, MAX_LOGGED_INPUT_CHARS);
        let error_kind = record
            .error_kind
            .map(|k| k.to_string())
            .unwrap_or_else(|| "none".to_string());
        info!(
            user_input = %input,
            source = %record.response_source,
            response_time_ms = record.response_time_ms,
            error_kind = %error_kind,
            "interaction completed"
        );
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
