// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential scrubbing for error records and log output.

use std::sync::LazyLock;

use regex::Regex;

/// Known credential formats that may leak through provider error bodies.
static REDACTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // OpenAI / OpenRouter style keys: sk-..., sk-or-v1-...
        r"sk-[a-zA-Z0-9_\-]{16,}",
        // HuggingFace tokens: hf_...
        r"hf_[a-zA-Z0-9]{16,}",
        // Bearer tokens in echoed headers
        r"Bearer\s+[a-zA-Z0-9._\-]{10,}",
    ]
    .iter()
    .map(|pattern| {
        Regex::new(pattern)
            .unwrap_or_else(|e| unreachable!("redaction pattern {pattern} is invalid: {e}"))
    })
    .collect()
});

const REDACTED: &str = "[REDACTED]";

/// Replace anything that looks like a credential with `[REDACTED]`.
pub fn redact(input: &str) -> String {
    let mut result = input.to_string();
    for pattern in REDACTION_PATTERNS.iter() {
        result = pattern.replace_all(&result, REDACTED).into_owned();
    }
    result
}
