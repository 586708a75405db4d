// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response routing: analyze, answer structurally, walk the provider chain,
//! and fall back to an offline answer.
//!
//! Every path ends in a [`RoutedResponse`]; nothing is propagated to the caller.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use taxnova_core::{
    classify, record_for, Category, ErrorKind, ErrorRecord, InteractionLog, InteractionRecord,
    ProviderAdapter, ProviderConfig, ProviderId, QueryAnalysis, ResponseSource, RoutedResponse,
    TaxnovaError,
};
use taxnova_tax::ReferenceData;
use tracing::{debug, info, warn};

use crate::analyzer::TextAnalyzer;
use crate::interaction::TracingInteractionLog;
use crate::resolver::{with_header, Resolution, StructuredAnswerResolver};

const OFF_TOPIC_NOTICE: &str = "ℹ️ Your query doesn't seem to be tax-related. I specialize in Pakistan's tax system.";

const OFFLINE_GUIDANCE: &str = "I'm currently running in offline mode, but I can still help with basic Pakistan tax information:

📊 **Ask me about:**
• Current income tax rates and slabs
• Tax filing deadlines and procedures
• Common deductions and exemptions
• Basic tax calculations
• Withholding tax information

🔧 **For AI-powered responses:**
• Configure your API keys in taxnova.toml or the environment
• Supported providers: HuggingFace, OpenRouter, OpenAI, local (Ollama)

🏛️ **For detailed tax advice:**
• Visit the FBR website (fbr.gov.pk)
• Consult with a qualified tax advisor
• Check the Income Tax Ordinance 2001

Try asking specific questions like \"What are the current tax slabs?\" or \"When is the filing deadline?\"";

struct ChainEntry {
    adapter: Arc<dyn ProviderAdapter>,
    config: ProviderConfig,
}

/// Text, source and error of a routed answer, before timing is attached.
struct Outcome {
    text: String,
    source: ResponseSource,
    error: Option<ErrorRecord>,
}

/// Orchestrates analysis, structured lookup, the provider chain, and the
/// offline fallback for one query at a time.
///
/// Holds only read-only state after construction, so one router can serve
/// concurrent requests behind an `Arc`.
pub struct ResponseRouter {
    analyzer: TextAnalyzer,
    resolver: StructuredAnswerResolver,
    reference: Arc<ReferenceData>,
    chain: Vec<ChainEntry>,
    interaction_log: Arc<dyn InteractionLog>,
}

impl ResponseRouter {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self {
            analyzer: TextAnalyzer::new(),
            resolver: StructuredAnswerResolver::new(Arc::clone(&reference)),
            reference,
            chain: Vec::new(),
            interaction_log: Arc::new(TracingInteractionLog),
        }
    }

    /// Appends a provider to the fallback chain. Order of calls is attempt order.
    pub fn with_provider(mut self, adapter: Arc<dyn ProviderAdapter>, config: ProviderConfig) -> Self {
        self.chain.push(ChainEntry { adapter, config });
        self
    }

    /// Replaces the default tracing interaction log.
    pub fn with_interaction_log(mut self, log: Arc<dyn InteractionLog>) -> Self {
        self.interaction_log = log;
        self
    }

    /// Families in the chain, in attempt order.
    pub fn provider_ids(&self) -> Vec<ProviderId> {
        self.chain.iter().map(|e| e.adapter.id()).collect()
    }

    /// Answer `query`, trying `config`'s provider first with `config`'s
    /// settings, then the rest of the chain with their own settings.
    pub async fn get_response(&self, query: &str, config: &ProviderConfig) -> RoutedResponse {
        self.route(query, Some(config)).await
    }

    /// Answer `query` walking the chain in registration order.
    pub async fn respond(&self, query: &str) -> RoutedResponse {
        self.route(query, None).await
    }

    async fn route(&self, query: &str, primary: Option<&ProviderConfig>) -> RoutedResponse {
        let started = Instant::now();
        let outcome = self.run(query, primary).await;

        let response = RoutedResponse {
            text: outcome.text,
            source: outcome.source,
            latency_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            error: outcome.error,
        };
        self.interaction_log
            .record(&InteractionRecord::new(query, &response));
        response
    }

    async fn run(&self, query: &str, primary: Option<&ProviderConfig>) -> Outcome {
        if let Err(err) = self.analyzer.validate(query) {
            let record = classify(&err, BTreeMap::new());
            info!(kind = %record.kind, error = %record.message, "query failed validation");
            return Outcome {
                text: record.user_message.clone(),
                source: ResponseSource::Fallback,
                error: Some(record),
            };
        }

        let analysis = self.analyzer.analyze(query);
        let calculation_error = match self.resolver.resolve(&analysis) {
            Resolution::Answer(text) => {
                debug!(category = %analysis.category, "answered from reference data");
                return Outcome {
                    text,
                    source: ResponseSource::Structured,
                    error: None,
                };
            }
            Resolution::NoAnswer => None,
            Resolution::Failed(record) => Some(record),
        };

        let context = self.reference.grounding_context(analysis.category);
        let prompt = query.trim();
        let mut last_error = None;

        for (attempt, (adapter, config)) in self.attempt_order(primary).into_iter().enumerate() {
            let provider = adapter.id();
            match call_with_timeout(adapter, config, prompt, &context).await {
                Ok(text) => {
                    info!(provider = %provider, attempt, "provider answered");
                    return Outcome {
                        text: with_header(analysis.category, &text),
                        source: ResponseSource::Provider(provider),
                        error: calculation_error,
                    };
                }
                Err(err) => {
                    let mut ctx = BTreeMap::new();
                    ctx.insert("attempt".to_string(), attempt.to_string());
                    ctx.insert("model".to_string(), config.model_id.clone());
                    let record = classify(&err, ctx);
                    warn!(
                        provider = %provider,
                        attempt,
                        kind = %record.kind,
                        error = %record.message,
                        "provider attempt failed"
                    );
                    last_error = Some(record);
                }
            }
        }

        let error = last_error.or(calculation_error).unwrap_or_else(|| {
            record_for(ErrorKind::General, "no answer provider is configured")
        });
        warn!(kind = %error.kind, "serving offline fallback");
        Outcome {
            text: self.offline_answer(&analysis),
            source: ResponseSource::Fallback,
            error: Some(error),
        }
    }

    /// The caller's provider first (with the caller's config), then the
    /// remaining chain entries with their own configs. Each family once.
    fn attempt_order<'a>(
        &'a self,
        primary: Option<&'a ProviderConfig>,
    ) -> Vec<(&'a dyn ProviderAdapter, &'a ProviderConfig)> {
        let mut order: Vec<(&'a dyn ProviderAdapter, &'a ProviderConfig)> =
            Vec::with_capacity(self.chain.len());

        if let Some(primary) = primary {
            match self
                .chain
                .iter()
                .find(|e| e.adapter.id() == primary.provider_id)
            {
                Some(entry) => order.push((entry.adapter.as_ref(), primary)),
                None => warn!(
                    provider = %primary.provider_id,
                    "requested provider is not in the chain"
                ),
            }
        }

        for entry in &self.chain {
            let id = entry.adapter.id();
            if order.iter().any(|(adapter, _)| adapter.id() == id) {
                continue;
            }
            order.push((entry.adapter.as_ref(), &entry.config));
        }
        order
    }

    fn offline_answer(&self, analysis: &QueryAnalysis) -> String {
        let mut text = String::new();
        if analysis.off_topic {
            text.push_str(OFF_TOPIC_NOTICE);
            text.push_str("\n\n");
        }
        text.push_str(OFFLINE_GUIDANCE);

        let reference = match analysis.category {
            Category::Calculation => Some(with_header(Category::Rates, &self.reference.slab_info())),
            category => self
                .reference
                .reference_text(category)
                .map(|body| with_header(category, &body)),
        };
        if let Some(reference) = reference {
            text.push_str("\n\n");
            text.push_str(&reference);
        }
        text
    }
}

/// One provider attempt, bounded by the config's timeout regardless of
/// what the adapter enforces itself.
async fn call_with_timeout(
    adapter: &dyn ProviderAdapter,
    config: &ProviderConfig,
    prompt: &str,
    context: &str,
) -> Result<String, TaxnovaError> {
    let bound = config.timeout();
    match tokio::time::timeout(bound, adapter.respond(prompt, context, config)).await {
        Ok(result) => result,
        Err(_) => Err(TaxnovaError::Timeout {
            provider: adapter.id(),
            duration: bound,
        }),
    }
}

#[cfg(test)]
mod tests {
    use taxnova_test_utils::{MockOutcome, MockProvider};

    use super::*;

    fn reference() -> Arc<ReferenceData> {
        Arc::new(ReferenceData::default())
    }

    #[test]
    fn offline_answer_appends_slabs_for_calculation() {
        let router = ResponseRouter::new(reference());
        let analysis = TextAnalyzer::new().analyze("how much tax will I pay");
        let text = router.offline_answer(&analysis);
        assert!(text.starts_with("I'm currently running in offline mode"));
        assert!(text.contains("📊 **Tax Rates Information**"));
        assert!(text.contains("Income Tax Slabs"));
    }

    #[test]
    fn offline_answer_notes_off_topic_queries() {
        let router = ResponseRouter::new(reference());
        let analysis = TextAnalyzer::new().analyze("who won the cricket match");
        let text = router.offline_answer(&analysis);
        assert!(text.starts_with(OFF_TOPIC_NOTICE));
        assert!(!text.contains("Income Tax Slabs"));
    }

    #[test]
    fn attempt_order_puts_requested_provider_first() {
        let router = ResponseRouter::new(reference())
            .with_provider(
                MockProvider::replying(ProviderId::HuggingFace, "hf"),
                ProviderConfig::new(ProviderId::HuggingFace),
            )
            .with_provider(
                MockProvider::replying(ProviderId::OpenAi, "oa"),
                ProviderConfig::new(ProviderId::OpenAi),
            )
            .with_provider(
                MockProvider::replying(ProviderId::Local, "local"),
                ProviderConfig::new(ProviderId::Local),
            );

        let requested = ProviderConfig::new(ProviderId::OpenAi).with_model("gpt-4o-mini");
        let order = router.attempt_order(Some(&requested));
        let ids: Vec<_> = order.iter().map(|(a, _)| a.id()).collect();
        assert_eq!(ids, vec![ProviderId::OpenAi, ProviderId::HuggingFace, ProviderId::Local]);
        assert_eq!(order[0].1.model_id, "gpt-4o-mini");

        let default_order: Vec<_> = router.attempt_order(None).iter().map(|(a, _)| a.id()).collect();
        assert_eq!(default_order, router.provider_ids());
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_provider_is_cut_at_its_timeout() {
        let hanging = MockProvider::failing(ProviderId::Local, MockOutcome::Hang);
        let config = ProviderConfig::new(ProviderId::Local).with_timeout_seconds(2);
        let err = call_with_timeout(&*hanging, &config, "q", "c")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TaxnovaError::Timeout { provider: ProviderId::Local, duration } if duration.as_secs() == 2
        ));
    }
}
