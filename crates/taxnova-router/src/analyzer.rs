// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword-table query analysis.
//!
//! Normalizes the raw query, validates it, collects category keywords and
//! numbers, and resolves a single [`Category`]. Pure and allocation-light;
//! no network, no state.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use taxnova_core::{Category, QueryAnalysis, TaxnovaError};
use tracing::debug;

/// Shortest accepted normalized query, in characters.
pub const MIN_QUERY_CHARS: usize = 3;
/// Longest accepted normalized query, in characters.
pub const MAX_QUERY_CHARS: usize = 500;

const RATES_KEYWORDS: &[&str] = &["rate", "slab", "bracket", "percentage", "percent", "%"];

const DEDUCTIONS_KEYWORDS: &[&str] = &[
    "deduction", "exemption", "allowance", "rebate", "zakat", "donation",
];

const FILING_KEYWORDS: &[&str] = &[
    "file", "filing", "return", "deadline", "due date", "when to file", "submit", "iris",
    "wealth statement",
];

const CALCULATION_KEYWORDS: &[&str] = &["calculate", "compute", "amount", "how much"];

const WITHHOLDING_KEYWORDS: &[&str] = &[
    "withholding", "advance tax", "deduct at source", "deducted at source", "wht",
    "bank interest", "dividend", "cash withdrawal",
];

/// Categories in resolution priority order, with their keyword lists.
const KEYWORD_TABLE: &[(Category, &[&str])] = &[
    (Category::Calculation, CALCULATION_KEYWORDS),
    (Category::Withholding, WITHHOLDING_KEYWORDS),
    (Category::Deductions, DEDUCTIONS_KEYWORDS),
    (Category::Filing, FILING_KEYWORDS),
    (Category::Rates, RATES_KEYWORDS),
];

/// One compiled matcher per keyword, grouped like [`KEYWORD_TABLE`].
///
/// Word keywords and phrases match whole words, with an optional plural
/// suffix (`slabs`, `deductions`), so `rate` never fires inside `corporate`.
/// Symbol keywords such as `%` match anywhere.
static KEYWORD_MATCHERS: LazyLock<Vec<(Category, Vec<(&'static str, Option<Regex>)>)>> =
    LazyLock::new(|| {
        KEYWORD_TABLE
            .iter()
            .map(|(category, list)| {
                let matchers = list
                    .iter()
                    .map(|keyword| (*keyword, word_matcher(keyword)))
                    .collect();
                (*category, matchers)
            })
            .collect()
    });

fn word_matcher(keyword: &str) -> Option<Regex> {
    if !keyword.starts_with(char::is_alphanumeric) {
        return None;
    }
    let pattern = format!(r"\b{}(?:s|es)?\b", regex::escape(keyword));
    Some(
        Regex::new(&pattern)
            .unwrap_or_else(|e| unreachable!("keyword pattern {pattern} is invalid: {e}")),
    )
}

/// Words that keep an otherwise keyword-free query on topic.
const TOPIC_WORDS: &[&str] = &["tax", "pakistan", "fbr", "income"];

/// Integer part (South Asian `10,00,000`, western `1,000,000`, or plain
/// digits) with an optional fraction, or a bare fraction (`.5`), then an
/// optional magnitude word.
static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:(\d{1,3}(?:,\d{2})+,\d{3}|\d{1,3}(?:,\d{3})+|\d+)(\.\d+)?|(\.\d+))(?:\s*(lakhs?|lacs?|crores?|million)\b)?",
    )
    .unwrap_or_else(|e| unreachable!("number pattern is invalid: {e}"))
});

fn multiplier(word: &str) -> f64 {
    match word {
        "lakh" | "lakhs" | "lac" | "lacs" => 100_000.0,
        "crore" | "crores" => 10_000_000.0,
        "million" => 1_000_000.0,
        _ => 1.0,
    }
}

/// Heuristic, table-driven query analyzer.
#[derive(Debug, Clone, Default)]
pub struct TextAnalyzer;

impl TextAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze one raw query.
    pub fn analyze(&self, raw_text: &str) -> QueryAnalysis {
        let normalized = normalize(raw_text);

        if let Err(err) = check(raw_text, &normalized) {
            let reason = err.kind();
            debug!(reason = %reason, error = %err, "query rejected");
            return QueryAnalysis {
                raw_text: raw_text.to_string(),
                normalized_text: normalized,
                is_valid: false,
                category: Category::Invalid,
                extracted_numbers: Vec::new(),
                matched_keywords: BTreeSet::new(),
                rejection_reason: Some(reason),
                off_topic: false,
            };
        }

        let (matched_keywords, matched_categories) = match_keywords(&normalized);
        let extracted_numbers = extract_numbers(&normalized);
        let category = resolve_category(&matched_categories, !extracted_numbers.is_empty());

        let off_topic = matched_keywords.is_empty()
            && extracted_numbers.is_empty()
            && !TOPIC_WORDS.iter().any(|w| normalized.contains(w));

        debug!(
            category = %category,
            keywords = matched_keywords.len(),
            numbers = extracted_numbers.len(),
            off_topic,
            "query analyzed"
        );

        QueryAnalysis {
            raw_text: raw_text.to_string(),
            normalized_text: normalized,
            is_valid: true,
            category,
            extracted_numbers,
            matched_keywords,
            rejection_reason: None,
            off_topic,
        }
    }
}

impl TextAnalyzer {
    /// Validate one raw query, returning its normalized text.
    pub fn validate(&self, raw_text: &str) -> Result<String, TaxnovaError> {
        let normalized = normalize(raw_text);
        check(raw_text, &normalized)?;
        Ok(normalized)
    }
}

/// Trim, lowercase, and collapse whitespace runs to single spaces.
pub fn normalize(raw_text: &str) -> String {
    raw_text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn check(raw_text: &str, normalized: &str) -> Result<(), TaxnovaError> {
    let length = normalized.chars().count();
    if length < MIN_QUERY_CHARS {
        return Err(TaxnovaError::QueryTooShort { length });
    }
    if length > MAX_QUERY_CHARS {
        return Err(TaxnovaError::QueryTooLong { length });
    }
    if raw_text.chars().any(|c| c.is_control() && !c.is_whitespace()) {
        return Err(TaxnovaError::InvalidInput(
            "query contains control characters".into(),
        ));
    }
    if !normalized.chars().any(char::is_alphanumeric) {
        return Err(TaxnovaError::InvalidInput(
            "query has no letters or digits".into(),
        ));
    }
    Ok(())
}

fn match_keywords(normalized: &str) -> (BTreeSet<String>, Vec<Category>) {
    let mut keywords = BTreeSet::new();
    let mut categories = Vec::new();
    for (category, matchers) in KEYWORD_MATCHERS.iter() {
        let mut hit = false;
        for (keyword, matcher) in matchers {
            let found = match matcher {
                Some(re) => re.is_match(normalized),
                None => normalized.contains(keyword),
            };
            if found {
                keywords.insert((*keyword).to_string());
                hit = true;
            }
        }
        if hit {
            categories.push(*category);
        }
    }
    (keywords, categories)
}

/// `matched` is in priority order, so the first entry wins.
fn resolve_category(matched: &[Category], has_numbers: bool) -> Category {
    match matched.first() {
        Some(category) => *category,
        None if has_numbers => Category::Calculation,
        None => Category::General,
    }
}

/// Numbers in order of appearance, scaled by any magnitude word.
///
/// A minus sign counts only when it starts a token (`income of -5000`), so
/// ranges such as `2024-25` stay positive. Digits glued to a word
/// (`covid19`) are not numbers, except after a currency prefix (`rs50000`).
pub fn extract_numbers(text: &str) -> Vec<f64> {
    let mut numbers = Vec::new();
    for caps in NUMBER_PATTERN.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if !starts_token(text, whole.start()) {
            continue;
        }
        let integer = caps.get(1).map_or("", |m| m.as_str()).replace(',', "");
        let fraction = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map_or("", |m| m.as_str());
        let Ok(mut value) = format!("{integer}{fraction}").parse::<f64>() else {
            continue;
        };
        if let Some(word) = caps.get(4) {
            value *= multiplier(word.as_str());
        }
        if is_negated(text, whole.start()) {
            value = -value;
        }
        numbers.push(value);
    }
    numbers
}

/// Prefixes that may be written directly against an amount.
const CURRENCY_PREFIXES: &[&str] = &["rs", "pkr"];

/// Whether a number starting at `start` begins its own token.
fn starts_token(text: &str, start: usize) -> bool {
    let before = &text[..start];
    match before.chars().next_back() {
        None => true,
        Some(c) if c.is_ascii_digit() => false,
        Some(c) if c.is_alphabetic() => {
            let word_start = before
                .char_indices()
                .rev()
                .find(|(_, c)| !c.is_alphabetic())
                .map_or(0, |(i, c)| i + c.len_utf8());
            let word = &before[word_start..];
            CURRENCY_PREFIXES.iter().any(|p| word.eq_ignore_ascii_case(p))
        }
        Some(_) => true,
    }
}

fn is_negated(text: &str, start: usize) -> bool {
    let before = &text[..start];
    match before.strip_suffix('-') {
        Some(rest) => rest.chars().next_back().is_none_or(char::is_whitespace),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use taxnova_core::ErrorKind;

    use super::*;

    fn analyze(text: &str) -> QueryAnalysis {
        TextAnalyzer::new().analyze(text)
    }

    #[test]
    fn calculation_query_extracts_income() {
        let a = analyze("Calculate tax for income of 2,000,000");
        assert!(a.is_valid);
        assert_eq!(a.category, Category::Calculation);
        assert_eq!(a.extracted_numbers, vec![2_000_000.0]);
        assert!(a.matched_keywords.contains("calculate"));
    }

    #[test]
    fn slab_question_is_rates() {
        let a = analyze("What are the current tax slabs?");
        assert_eq!(a.category, Category::Rates);
        assert!(a.matched_keywords.contains("slab"));
        assert!(!a.off_topic);
    }

    #[test]
    fn two_characters_is_too_short() {
        let a = analyze("ab");
        assert!(!a.is_valid);
        assert_eq!(a.category, Category::Invalid);
        assert_eq!(a.rejection_reason, Some(ErrorKind::QueryTooShort));
    }

    #[test]
    fn length_is_measured_after_normalization() {
        assert_eq!(
            analyze("   a   ").rejection_reason,
            Some(ErrorKind::QueryTooShort)
        );
        assert!(analyze(&format!("{}   ", "a".repeat(500))).is_valid);
        assert_eq!(
            analyze(&"a".repeat(501)).rejection_reason,
            Some(ErrorKind::QueryTooLong)
        );
    }

    #[test]
    fn symbols_and_control_characters_are_invalid_input() {
        assert_eq!(analyze("???!!").rejection_reason, Some(ErrorKind::InvalidInput));
        assert_eq!(
            analyze("tax\u{0007} rates").rejection_reason,
            Some(ErrorKind::InvalidInput)
        );
        assert!(analyze("tax\trates\nplease").is_valid);
    }

    #[test]
    fn validate_raises_typed_errors() {
        let analyzer = TextAnalyzer::new();
        assert!(matches!(
            analyzer.validate(" ab "),
            Err(TaxnovaError::QueryTooShort { length: 2 })
        ));
        assert!(matches!(
            analyzer.validate(&"x".repeat(501)),
            Err(TaxnovaError::QueryTooLong { length: 501 })
        ));
        assert!(matches!(
            analyzer.validate("???!!"),
            Err(TaxnovaError::InvalidInput(_))
        ));
        assert_eq!(analyzer.validate("  Tax  RATES ").unwrap(), "tax rates");
    }

    #[test]
    fn normalization_lowercases_and_collapses() {
        assert_eq!(normalize("  What   ARE\t the\nRates  "), "what are the rates");
    }

    #[test]
    fn priority_prefers_withholding_over_rates() {
        let a = analyze("withholding tax rate on dividend");
        assert_eq!(a.category, Category::Withholding);
        assert!(a.matched_keywords.contains("rate"));
        assert!(a.matched_keywords.contains("withholding"));
    }

    #[test]
    fn priority_prefers_calculation_over_everything() {
        let a = analyze("calculate the deduction rate before the filing deadline");
        assert_eq!(a.category, Category::Calculation);
    }

    #[test]
    fn numbers_without_keywords_force_calculation() {
        let a = analyze("my salary is 1,500,000");
        assert_eq!(a.category, Category::Calculation);
        assert_eq!(a.extracted_numbers, vec![1_500_000.0]);
    }

    #[test]
    fn keywords_take_precedence_over_numbers() {
        let a = analyze("tax rates for 2024");
        assert_eq!(a.category, Category::Rates);
        assert_eq!(a.extracted_numbers, vec![2024.0]);
    }

    #[test]
    fn no_keywords_no_numbers_is_general() {
        let a = analyze("explain the FBR to me");
        assert_eq!(a.category, Category::General);
        assert!(!a.off_topic);
    }

    #[test]
    fn unrelated_query_is_flagged_off_topic() {
        let a = analyze("who won the cricket match");
        assert!(a.is_valid);
        assert_eq!(a.category, Category::General);
        assert!(a.off_topic);
    }

    #[test]
    fn extracts_grouped_decimal_and_scaled_numbers() {
        assert_eq!(extract_numbers("rs. 1,234,567.50"), vec![1_234_567.5]);
        assert_eq!(extract_numbers("10,00,000 and 2,50,000"), vec![1_000_000.0, 250_000.0]);
        assert_eq!(extract_numbers("12 lakh"), vec![1_200_000.0]);
        assert_eq!(extract_numbers("1.5 crore"), vec![15_000_000.0]);
        assert_eq!(extract_numbers("2 million"), vec![2_000_000.0]);
        assert_eq!(extract_numbers("rs50000"), vec![50_000.0]);
        assert_eq!(extract_numbers("no digits here"), Vec::<f64>::new());
    }

    #[test]
    fn numbers_keep_order_of_appearance() {
        assert_eq!(
            extract_numbers("compare 900,000 with 3,000,000"),
            vec![900_000.0, 3_000_000.0]
        );
    }

    #[test]
    fn leading_minus_negates_but_ranges_do_not() {
        assert_eq!(extract_numbers("income of -500000"), vec![-500_000.0]);
        assert_eq!(extract_numbers("-42"), vec![-42.0]);
        assert_eq!(extract_numbers("tax year 2024-25"), vec![2024.0, 25.0]);
    }

    #[test]
    fn keywords_do_not_fire_inside_longer_words() {
        let a = analyze("tax on a separate income of 900000");
        assert_eq!(a.category, Category::Calculation);
        assert!(a.matched_keywords.is_empty());

        let a = analyze("What is the tax on a corporate salary of 1,500,000?");
        assert_eq!(a.category, Category::Calculation);
        assert_eq!(a.income(), Some(1_500_000.0));

        let a = analyze("update my profile");
        assert!(!a.matched_keywords.contains("file"));
        assert_eq!(a.category, Category::General);
    }

    #[test]
    fn keywords_match_plurals_and_symbols() {
        assert!(analyze("current tax rates").matched_keywords.contains("rate"));
        assert!(analyze("list the exemptions").matched_keywords.contains("exemption"));
        assert!(analyze("is it 35% now").matched_keywords.contains("%"));
        assert_eq!(analyze("when to file my return").category, Category::Filing);
    }

    #[test]
    fn bare_fractions_are_numbers() {
        assert_eq!(extract_numbers("salary of .5 million"), vec![500_000.0]);
        assert_eq!(extract_numbers("about 0.75 lakh"), vec![75_000.0]);
    }

    #[test]
    fn digits_glued_to_words_are_ignored() {
        assert_eq!(extract_numbers("covid19 relief of 50000"), vec![50_000.0]);
        assert_eq!(extract_numbers("form a1 for 2024"), vec![2024.0]);
        assert_eq!(extract_numbers("pkr250000"), vec![250_000.0]);
        assert_eq!(extract_numbers("1.2.3"), vec![1.2]);
    }

    #[test]
    fn overflowing_digits_parse_to_infinity() {
        let huge = "9".repeat(400);
        let numbers = extract_numbers(&huge);
        assert_eq!(numbers.len(), 1);
        assert!(numbers[0].is_infinite());
    }
}
