// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock provider adapter for deterministic routing tests.
//!
//! Outcomes are popped from a FIFO script; once the script is exhausted the
//! fallback outcome repeats.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use taxnova_core::{ProviderAdapter, ProviderConfig, ProviderId, TaxnovaError};
use tokio::sync::Mutex;

/// What a [`MockProvider`] does on one call.
#[derive(Debug, Clone, PartialEq)]
pub enum MockOutcome {
    Reply(String),
    /// Fails immediately with `Timeout` (as if the HTTP client gave up).
    Timeout,
    RateLimited,
    AuthFailed,
    Unavailable,
    /// Never answers; only an outer timeout ends the call.
    Hang,
}

pub struct MockProvider {
    id: ProviderId,
    script: Mutex<VecDeque<MockOutcome>>,
    fallback: MockOutcome,
    calls: AtomicUsize,
    requests: Mutex<Vec<(String, String)>>,
}

impl MockProvider {
    /// A provider that always answers `text`.
    pub fn replying(id: ProviderId, text: impl Into<String>) -> Arc<Self> {
        Self::scripted(id, Vec::new(), MockOutcome::Reply(text.into()))
    }

    /// A provider that fails every call with `outcome`.
    pub fn failing(id: ProviderId, outcome: MockOutcome) -> Arc<Self> {
        Self::scripted(id, Vec::new(), outcome)
    }

    /// Plays `script` in order, then repeats `fallback`.
    pub fn scripted(id: ProviderId, script: Vec<MockOutcome>, fallback: MockOutcome) -> Arc<Self> {
        Arc::new(Self {
            id,
            script: Mutex::new(VecDeque::from(script)),
            fallback,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Number of `respond` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(prompt, context)` pairs received, in call order.
    pub async fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().await.clone()
    }

    async fn next_outcome(&self) -> MockOutcome {
        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    async fn respond(
        &self,
        prompt: &str,
        context: &str,
        config: &ProviderConfig,
    ) -> Result<String, TaxnovaError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .await
            .push((prompt.to_string(), context.to_string()));

        match self.next_outcome().await {
            MockOutcome::Reply(text) => Ok(text),
            MockOutcome::Timeout => Err(TaxnovaError::Timeout {
                provider: self.id,
                duration: config.timeout(),
            }),
            MockOutcome::RateLimited => Err(TaxnovaError::RateLimited {
                provider: self.id,
                message: "API returned 429 Too Many Requests".into(),
            }),
            MockOutcome::AuthFailed => Err(TaxnovaError::AuthFailed {
                provider: self.id,
                message: "API returned 401 Unauthorized".into(),
            }),
            MockOutcome::Unavailable => Err(TaxnovaError::unavailable(
                self.id,
                "API returned 503 Service Unavailable",
            )),
            MockOutcome::Hang => {
                tokio::time::sleep(Duration::from_secs(24 * 60 * 60)).await;
                Err(TaxnovaError::Internal("mock provider woke from hang".into()))
            }
        }
    }
}
