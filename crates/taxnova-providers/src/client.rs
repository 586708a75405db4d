// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared HTTP client for provider adapters.
//!
//! One [`HttpClient`] owns the connection pool. Every request carries its own
//! timeout, and failures are mapped onto the provider error variants of
//! [`TaxnovaError`] by status code.

use std::time::Duration;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use taxnova_core::{ProviderId, TaxnovaError};
use tracing::debug;

/// Longest slice of an unparseable error body kept in an error message.
const MAX_BODY_EXCERPT: usize = 200;

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Result<Self, TaxnovaError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("taxnova/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TaxnovaError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// POSTs `body` as JSON and decodes a JSON response.
    ///
    /// `timeout` bounds the whole exchange including reading the body.
    pub async fn post_json<B, R>(
        &self,
        provider: ProviderId,
        url: &str,
        body: &B,
        bearer: Option<&SecretString>,
        headers: &[(&'static str, &'static str)],
        timeout: Duration,
    ) -> Result<R, TaxnovaError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut request = self.client.post(url).json(body).timeout(timeout);
        if let Some(key) = bearer {
            request = request.bearer_auth(key.expose_secret());
        }
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(provider, timeout, e))?;

        let status = response.status();
        debug!(provider = %provider, status = %status, "provider response received");

        let text = response
            .text()
            .await
            .map_err(|e| transport_error(provider, timeout, e))?;

        if !status.is_success() {
            return Err(status_error(provider, status, &text));
        }

        serde_json::from_str(&text).map_err(|e| TaxnovaError::Unavailable {
            provider,
            message: format!("failed to parse response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

fn transport_error(provider: ProviderId, timeout: Duration, err: reqwest::Error) -> TaxnovaError {
    if err.is_timeout() {
        TaxnovaError::Timeout {
            provider,
            duration: timeout,
        }
    } else {
        TaxnovaError::Unavailable {
            provider,
            message: format!("HTTP request failed: {err}"),
            source: Some(Box::new(err)),
        }
    }
}

/// Maps a non-success status onto the provider error taxonomy.
pub fn status_error(provider: ProviderId, status: StatusCode, body: &str) -> TaxnovaError {
    let detail = error_detail(body);
    match status.as_u16() {
        401 | 403 => TaxnovaError::AuthFailed {
            provider,
            message: format!("API returned {status}: {detail}"),
        },
        429 => TaxnovaError::RateLimited {
            provider,
            message: format!("API returned {status}: {detail}"),
        },
        503 if provider == ProviderId::HuggingFace => TaxnovaError::unavailable(
            provider,
            format!("model is loading, try again shortly: {detail}"),
        ),
        _ => TaxnovaError::unavailable(provider, format!("API returned {status}: {detail}")),
    }
}

/// Pulls a human-readable message out of an error body.
///
/// Understands `{"error": {"message": ...}}` (OpenAI, OpenRouter) and
/// `{"error": "..."}` (HuggingFace, Ollama); otherwise keeps a short excerpt.
fn error_detail(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let error = &value["error"];
        if let Some(message) = error["message"].as_str() {
            return message.to_string();
        }
        if let Some(message) = error.as_str() {
            return message.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    trimmed.chars().take(MAX_BODY_EXCERPT).collect()
}

/// Fails with `AuthFailed` when a provider that needs a key has none.
pub fn require_key(provider: ProviderId, key: Option<&SecretString>) -> Result<&SecretString, TaxnovaError> {
    key.ok_or_else(|| TaxnovaError::AuthFailed {
        provider,
        message: match provider.api_key_env() {
            Some(var) => format!("no API key configured ({var} is not set)"),
            None => "no API key configured".to_string(),
        },
    })
}

/// Trims generated text, rejecting empty output.
pub fn non_empty(provider: ProviderId, text: Option<String>) -> Result<String, TaxnovaError> {
    match text.map(|t| t.trim().to_string()) {
        Some(t) if !t.is_empty() => Ok(t),
        _ => Err(TaxnovaError::unavailable(
            provider,
            "provider returned no generated text",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_taxonomy() {
        let auth = status_error(ProviderId::OpenAi, StatusCode::UNAUTHORIZED, "");
        assert!(matches!(auth, TaxnovaError::AuthFailed { .. }));

        let forbidden = status_error(ProviderId::OpenAi, StatusCode::FORBIDDEN, "");
        assert!(matches!(forbidden, TaxnovaError::AuthFailed { .. }));

        let limited = status_error(ProviderId::OpenRouter, StatusCode::TOO_MANY_REQUESTS, "");
        assert!(matches!(limited, TaxnovaError::RateLimited { .. }));

        let server = status_error(ProviderId::Local, StatusCode::INTERNAL_SERVER_ERROR, "");
        assert!(matches!(server, TaxnovaError::Unavailable { .. }));
    }

    #[test]
    fn huggingface_503_reports_model_loading() {
        let err = status_error(
            ProviderId::HuggingFace,
            StatusCode::SERVICE_UNAVAILABLE,
            r#"{"error":"Model microsoft/DialoGPT-medium is currently loading","estimated_time":20.0}"#,
        );
        let text = err.to_string();
        assert!(text.contains("model is loading"), "got: {text}");
        assert!(text.contains("currently loading"), "got: {text}");
    }

    #[test]
    fn error_detail_reads_nested_and_flat_messages() {
        assert_eq!(
            error_detail(r#"{"error":{"message":"Invalid key","type":"auth"}}"#),
            "Invalid key"
        );
        assert_eq!(error_detail(r#"{"error":"model not found"}"#), "model not found");
        assert_eq!(error_detail("   "), "empty response body");
        assert_eq!(error_detail(&"x".repeat(500)).len(), MAX_BODY_EXCERPT);
    }

    #[test]
    fn missing_key_is_auth_failure() {
        let err = require_key(ProviderId::OpenAi, None).unwrap_err();
        assert!(matches!(err, TaxnovaError::AuthFailed { .. }));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn empty_text_is_unavailable() {
        assert!(matches!(
            non_empty(ProviderId::Local, Some("  \n".into())),
            Err(TaxnovaError::Unavailable { .. })
        ));
        assert!(non_empty(ProviderId::Local, None).is_err());
        assert_eq!(
            non_empty(ProviderId::Local, Some(" answer \n".into())).unwrap(),
            "answer"
        );
    }
}
