// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns Figment extraction failures into miette diagnostics.
//!
//! Unknown keys get a source span pointing into the offending file and a
//! "did you mean?" suggestion ranked by Jaro-Winkler similarity.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler score for a key to be offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key that no config section declares.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(taxnova::config::unknown_key),
        help("{}", format_unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value of the wrong type, e.g. `max_tokens = "lots"`.
    #[error("invalid value for `{key}`: {detail}")]
    #[diagnostic(code(taxnova::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// A value that is not one of the accepted variants, e.g. an unknown provider.
    #[error("unsupported value for `{key}`: {detail}")]
    #[diagnostic(code(taxnova::config::invalid_value), help("{expected}"))]
    InvalidValue {
        key: String,
        detail: String,
        expected: String,
    },

    #[error("validation error: {message}")]
    #[diagnostic(code(taxnova::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(taxnova::config::other))]
    Other(String),
}

fn format_unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

fn dotted_path(error: &figment::Error) -> String {
    error
        .path
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Convert a `figment::Error` (which may hold several failures) into diagnostics.
///
/// `toml_sources` pairs each file path with its content so unknown keys can be
/// located for span rendering.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    let mut errors = Vec::new();

    for error in err {
        let config_error = match &error.kind {
            Kind::UnknownField(field, expected) => {
                let valid_keys: Vec<&str> = expected.to_vec();
                let suggestion = suggest_key(field, &valid_keys);
                let (span, src) = find_source_span(&error, field, toml_sources);

                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion,
                    valid_keys: valid_keys.join(", "),
                    span,
                    src,
                }
            }
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: dotted_path(&error),
                detail: format!("found {actual}"),
                expected: expected.to_string(),
            },
            Kind::UnknownVariant(variant, expected) => ConfigError::InvalidValue {
                key: dotted_path(&error),
                detail: format!("`{variant}` is not recognized"),
                expected: match suggest_key(variant, expected) {
                    Some(s) => format!("did you mean `{s}`? Expected one of: {}", expected.join(", ")),
                    None => format!("expected one of: {}", expected.join(", ")),
                },
            },
            _ => ConfigError::Other(format!("{error}")),
        };

        errors.push(config_error);
    }

    errors
}

fn find_source_span(
    error: &figment::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let source_path = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    // Inline sources carry no file metadata; fall back to a lone source.
    let source = match source_path {
        Some(path) => toml_sources.iter().find(|(p, _)| *p == path),
        None if toml_sources.len() == 1 => toml_sources.first(),
        None => None,
    };

    if let Some((path, content)) = source {
        // figment's path ends with the offending key itself.
        let mut section: Vec<String> = error.path.iter().map(|s| s.to_string()).collect();
        if section.last().is_some_and(|last| last == field) {
            section.pop();
        }
        if let Some(offset) = find_key_offset(content, &section, field) {
            let span = SourceSpan::new(offset.into(), field.len());
            let named = NamedSource::new(path, content.clone());
            return (Some(span), Some(named));
        }
    }

    (None, None)
}

/// Byte offset of `field` in TOML `content`, searched after the `[a.b]`
/// header named by `path`. Top-level fields are searched from the start.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let search_start = if path.is_empty() {
        0
    } else {
        let header = format!("[{}]", path.join("."));
        content.find(&header).map(|pos| pos + header.len())?
    };

    let remaining = &content[search_start..];
    let mut byte_offset = 0;
    for line in remaining.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with('[') && byte_offset > 0 {
            // Next section; the key is not in this one.
            return None;
        }
        if let Some(after) = trimmed.strip_prefix(field)
            && (after.starts_with(' ') || after.starts_with('=') || after.starts_with('\t'))
        {
            let field_start_in_line = line.len() - trimmed.len();
            return Some(search_start + byte_offset + field_start_in_line);
        }
        byte_offset += line.len();
    }

    None
}

/// Best valid key above the similarity threshold, if any.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    let mut best_score = SUGGESTION_THRESHOLD;
    let mut best_match = None;

    for &key in valid_keys {
        let score = strsim::jaro_winkler(unknown, key);
        if score > best_score {
            best_score = score;
            best_match = Some(key.to_string());
        }
    }

    best_match
}

/// Render diagnostics to stderr with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_max_tokens_for_typo() {
        let valid = &["provider", "default_model", "max_tokens", "temperature"];
        assert_eq!(
            suggest_key("max_tokns", valid),
            Some("max_tokens".to_string())
        );
    }

    #[test]
    fn no_suggestion_for_distant_typo() {
        let valid = &["provider", "max_tokens"];
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }

    #[test]
    fn finds_key_in_nested_section() {
        let content = "[llm]\nmodel = \"x\"\n\n[providers.openai]\nbase_ulr = \"http://x\"\n";
        let path = vec!["providers".to_string(), "openai".to_string()];
        let o = find_key_offset(content, &path, "base_ulr").unwrap();
        assert_eq!(&content[o..o + 8], "base_ulr");
    }

    #[test]
    fn does_not_match_key_from_a_later_section() {
        let content = "[llm]\nprovider = \"openai\"\n\n[log]\nlevl = \"debug\"\n";
        let path = vec!["llm".to_string()];
        assert_eq!(find_key_offset(content, &path, "levl"), None);
    }

    #[test]
    fn top_level_key_found_from_start() {
        let content = "verbose = true\n[llm]\n";
        assert_eq!(find_key_offset(content, &[], "verbose"), Some(0));
    }
}
