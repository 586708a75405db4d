// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `taxnova calc` and `taxnova slabs`: direct access to the calculator and
//! the reference tables, without routing.

use taxnova_config::TaxnovaConfig;
use taxnova_core::{Category, TaxnovaError};
use taxnova_router::resolver::{format_calculation, with_header};
use taxnova_tax::calculate;

use crate::app::load_reference;

/// Renders the tax owed on `income` under the configured slab table.
pub fn calc_report(config: &TaxnovaConfig, income: f64) -> Result<String, TaxnovaError> {
    let reference = load_reference(config)?;
    let result = calculate(income, &reference.slabs)?;
    Ok(with_header(
        Category::Calculation,
        &format_calculation(&result, false),
    ))
}

/// Renders the configured slab table.
pub fn slabs_report(config: &TaxnovaConfig) -> Result<String, TaxnovaError> {
    Ok(load_reference(config)?.slab_info())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calc_report_shows_totals_and_breakdown() {
        let report = calc_report(&TaxnovaConfig::default(), 1_000_000.0).unwrap();
        assert!(report.starts_with("🧮 **Tax Calculation Results**"));
        assert!(report.contains("Rs. 10,000"));
        assert!(report.contains("Tax Breakdown by Slab"));
    }

    #[test]
    fn negative_income_is_rejected() {
        let err = calc_report(&TaxnovaConfig::default(), -100.0).unwrap_err();
        assert!(matches!(err, TaxnovaError::InvalidIncome(_)));
    }

    #[test]
    fn slabs_report_lists_top_band() {
        let report = slabs_report(&TaxnovaConfig::default()).unwrap();
        assert!(report.contains("Above Rs. 4,100,000: 35%"));
    }
}
