// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic answers from the reference tables and the calculator.

use std::collections::BTreeMap;
use std::sync::Arc;

use taxnova_core::{classify, Category, ErrorRecord, QueryAnalysis};
use taxnova_tax::{calculate, format_compact, format_rate, format_rupees, ReferenceData, TaxCalculationResult};
use tracing::{debug, warn};

const CALCULATION_DISCLAIMER: &str = "*Note: This is a basic calculation. Actual tax may vary based on deductions, exemptions, and other factors.*";

/// Header placed above answers for `category`.
pub fn category_header(category: Category) -> Option<&'static str> {
    match category {
        Category::Rates => Some("📊 **Tax Rates Information**"),
        Category::Calculation => Some("🧮 **Tax Calculation Results**"),
        Category::Filing => Some("📋 **Filing Information**"),
        Category::Deductions => Some("💰 **Deductions & Exemptions**"),
        Category::Withholding => Some("🏦 **Withholding Tax Rates**"),
        Category::General | Category::Invalid => None,
    }
}

/// Prefixes `body` with the category header, if the category has one.
pub fn with_header(category: Category, body: &str) -> String {
    match category_header(category) {
        Some(header) => format!("{header}\n\n{body}"),
        None => body.to_string(),
    }
}

/// Outcome of a structured lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Answer(String),
    /// Nothing deterministic to say; try the providers.
    NoAnswer,
    /// The calculator rejected the income. The pipeline continues.
    Failed(ErrorRecord),
}

impl Resolution {
    pub fn into_text(self) -> Option<String> {
        match self {
            Resolution::Answer(text) => Some(text),
            Resolution::NoAnswer | Resolution::Failed(_) => None,
        }
    }
}

/// Answers reference and calculation queries without a provider.
#[derive(Debug, Clone)]
pub struct StructuredAnswerResolver {
    reference: Arc<ReferenceData>,
}

impl StructuredAnswerResolver {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self { reference }
    }

    pub fn resolve(&self, analysis: &QueryAnalysis) -> Resolution {
        if !analysis.is_valid {
            return Resolution::NoAnswer;
        }
        match analysis.category {
            Category::Calculation => match analysis.income() {
                Some(income) => self.calculation_answer(income, analysis.extracted_numbers.len()),
                None => Resolution::NoAnswer,
            },
            category => match self.reference.reference_text(category) {
                Some(text) => Resolution::Answer(with_header(category, &text)),
                None => Resolution::NoAnswer,
            },
        }
    }

    fn calculation_answer(&self, income: f64, number_count: usize) -> Resolution {
        match calculate(income, &self.reference.slabs) {
            Ok(result) => {
                if number_count > 1 {
                    debug!(number_count, income, "several numbers in query; using the first as income");
                }
                Resolution::Answer(format_calculation(&result, number_count > 1))
            }
            Err(err) => {
                let mut context = BTreeMap::new();
                context.insert("income".to_string(), income.to_string());
                let record = classify(&err, context);
                warn!(kind = %record.kind, error = %record.message, "tax calculation failed");
                Resolution::Failed(record)
            }
        }
    }
}

fn amount(value: f64) -> String {
    let exact = format_rupees(value);
    if value >= 100_000.0 {
        format!("{exact} ({})", format_compact(value))
    } else {
        exact
    }
}

/// Renders a calculation result. `ambiguous` adds a note that only the
/// first of several numbers was used.
pub fn format_calculation(result: &TaxCalculationResult, ambiguous: bool) -> String {
    let mut body = String::new();
    body.push_str(&format!("**Gross Income:** {}\n", amount(result.gross_income)));
    body.push_str(&format!("**Total Tax:** {}\n", amount(result.total_tax)));
    body.push_str(&format!("**Net Income:** {}\n", amount(result.net_income)));
    body.push_str(&format!(
        "**Effective Tax Rate:** {:.2}%\n",
        result.effective_rate_percent
    ));

    if !result.breakdown.is_empty() {
        body.push_str("\n**Tax Breakdown by Slab:**\n");
        for item in &result.breakdown {
            body.push_str(&format!(
                "• {}: {} on {} = {}\n",
                item.slab_label,
                format_rate(item.rate),
                format_rupees(item.taxable_amount_in_slab),
                format_rupees(item.tax_in_slab)
            ));
        }
    }

    if ambiguous {
        body.push_str(&format!(
            "\n*Several amounts were mentioned; {} was used as the annual income.*\n",
            format_rupees(result.gross_income)
        ));
    }

    body.push('\n');
    body.push_str(CALCULATION_DISCLAIMER);
    with_header(Category::Calculation, &body)
}
