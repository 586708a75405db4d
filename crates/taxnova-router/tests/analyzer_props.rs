// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for query analysis.

use proptest::prelude::*;
use taxnova_core::{Category, ErrorKind};
use taxnova_router::analyzer::{extract_numbers, normalize, MAX_QUERY_CHARS, MIN_QUERY_CHARS};
use taxnova_router::TextAnalyzer;

proptest! {
    #[test]
    fn validity_follows_normalized_length(text in "\\PC{0,600}") {
        let analysis = TextAnalyzer::new().analyze(&text);
        let length = analysis.normalized_text.chars().count();
        if length < MIN_QUERY_CHARS {
            prop_assert_eq!(analysis.rejection_reason, Some(ErrorKind::QueryTooShort));
        } else if length > MAX_QUERY_CHARS {
            prop_assert_eq!(analysis.rejection_reason, Some(ErrorKind::QueryTooLong));
        }
        prop_assert_eq!(analysis.is_valid, analysis.rejection_reason.is_none());
        prop_assert_eq!(analysis.category == Category::Invalid, !analysis.is_valid);
    }

    #[test]
    fn normalization_is_idempotent(text in "\\PC{0,200}") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once.clone());
    }

    #[test]
    fn grouped_integers_round_trip(n in 0u64..10_000_000_000) {
        let digits = n.to_string();
        let mut grouped = String::new();
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        let query = format!("my income is rs. {grouped} this year");
        prop_assert_eq!(extract_numbers(&query), vec![n as f64]);
    }

    #[test]
    fn plain_numbers_without_keywords_are_calculations(n in 1u32..100_000_000) {
        let analysis = TextAnalyzer::new().analyze(&format!("my salary is {n}"));
        prop_assert_eq!(analysis.category, Category::Calculation);
        prop_assert_eq!(analysis.income(), Some(f64::from(n)));
    }
}
