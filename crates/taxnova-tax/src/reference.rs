// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static tax reference tables and their pre-formatted texts.
//!
//! Loaded once at startup (built-in tables or a TOML override) and shared
//! read-only afterwards.

use std::path::Path;

use serde::{Deserialize, Serialize};
use taxnova_core::{Category, TaxnovaError};
use tracing::info;

use crate::calculator::{SlabTable, TaxSlab};
use crate::currency::{format_rate, format_rupees};

/// Persona prepended to every provider request.
const BASE_CONTEXT: &str = "You are TaxNova, an AI assistant specialized in Pakistan's Income Tax system. \
You help users understand Pakistan's tax laws, regulations, and procedures based on the Income Tax Ordinance 2001 and recent amendments.\n\n\
Always provide accurate, helpful information specific to Pakistan's tax system. Use only the figures given below; \
if unsure about specific details, recommend consulting with a tax professional or the FBR website.";

/// Filing deadline for one class of filer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilingDeadline {
    pub filer: String,
    pub deadline: String,
}

/// Limit on a deduction: a rupee amount or a textual rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeductionLimit {
    Amount(f64),
    Rule(String),
}

impl std::fmt::Display for DeductionLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeductionLimit::Amount(amount) => f.write_str(&format_rupees(*amount)),
            DeductionLimit::Rule(rule) => f.write_str(rule),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Deduction {
    pub name: String,
    pub description: String,
    pub limit: DeductionLimit,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WithholdingRate {
    pub payment: String,
    pub rate_percent: f64,
    #[serde(default)]
    pub note: Option<String>,
}

/// Process-wide reference tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceData {
    pub tax_year: String,
    pub slabs: SlabTable,
    pub filing_deadlines: Vec<FilingDeadline>,
    pub deductions: Vec<Deduction>,
    pub withholding_rates: Vec<WithholdingRate>,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::pakistan_2024_25()
    }
}

impl ReferenceData {
    /// Built-in tables for Pakistan, tax year 2024-25.
    pub fn pakistan_2024_25() -> Self {
        let slabs = SlabTable::new(vec![
            TaxSlab::new(0.0, Some(600_000.0), 0.0),
            TaxSlab::new(600_000.0, Some(1_200_000.0), 2.5),
            TaxSlab::new(1_200_000.0, Some(2_200_000.0), 12.5),
            TaxSlab::new(2_200_000.0, Some(3_200_000.0), 20.0),
            TaxSlab::new(3_200_000.0, Some(4_100_000.0), 25.0),
            TaxSlab::new(4_100_000.0, None, 35.0),
        ])
        .unwrap_or_else(|e| unreachable!("built-in slab table is invalid: {e}"));

        let deadline = |filer: &str, deadline: &str| FilingDeadline {
            filer: filer.to_string(),
            deadline: deadline.to_string(),
        };
        let deduction = |name: &str, description: &str, limit: DeductionLimit, condition: &str| {
            Deduction {
                name: name.to_string(),
                description: description.to_string(),
                limit,
                condition: condition.to_string(),
            }
        };
        let wht = |payment: &str, rate_percent: f64| WithholdingRate {
            payment: payment.to_string(),
            rate_percent,
            note: None,
        };

        Self {
            tax_year: "2024-25".to_string(),
            slabs,
            filing_deadlines: vec![
                deadline("Salaried Individuals", "September 30"),
                deadline("Non-Salaried Individuals", "December 31"),
                deadline("Companies", "December 31"),
                deadline("AOP", "December 31"),
                deadline("Wealth Statement", "December 31"),
                deadline("Advance Tax (Quarterly)", "15th of month following quarter end"),
            ],
            deductions: vec![
                deduction(
                    "Zakat",
                    "Zakat paid during the year",
                    DeductionLimit::Rule("No limit".into()),
                    "Must be paid to eligible recipients",
                ),
                deduction(
                    "Life Insurance",
                    "Life insurance premiums",
                    DeductionLimit::Amount(500_000.0),
                    "Own life insurance policy",
                ),
                deduction(
                    "Provident Fund",
                    "Provident fund contributions",
                    DeductionLimit::Rule("As per rules".into()),
                    "Recognized provident fund",
                ),
                deduction(
                    "Medical Expenses",
                    "Medical expenses for disabled dependents",
                    DeductionLimit::Rule("Actual expenses".into()),
                    "Certified disability",
                ),
                deduction(
                    "Donations",
                    "Donations to approved charitable organizations",
                    DeductionLimit::Rule("30% of taxable income".into()),
                    "Approved organizations only",
                ),
            ],
            withholding_rates: vec![
                WithholdingRate {
                    payment: "Salary".to_string(),
                    rate_percent: 0.0,
                    note: Some("progressive slab rates apply".to_string()),
                },
                wht("Contract Payment", 10.0),
                wht("Commission", 10.0),
                wht("Rent", 10.0),
                wht("Dividend", 15.0),
                wht("Bank Interest", 10.0),
                wht("Prize Bonds", 25.0),
                wht("Mobile Phone", 10.0),
                wht("Electricity", 7.5),
                wht("Cash Withdrawal", 0.6),
            ],
        }
    }

    /// Parses tables from TOML. The slab table is validated while parsing.
    pub fn from_toml_str(content: &str) -> Result<Self, TaxnovaError> {
        toml::from_str(content)
            .map_err(|e| TaxnovaError::Config(format!("invalid reference tables: {e}")))
    }

    /// Reads and parses a TOML reference file.
    pub fn from_path(path: &Path) -> Result<Self, TaxnovaError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TaxnovaError::Config(format!(
                "failed to read reference file {}: {e}",
                path.display()
            ))
        })?;
        let data = Self::from_toml_str(&content)?;
        info!(path = %path.display(), tax_year = data.tax_year, "loaded tax reference tables");
        Ok(data)
    }

    pub fn slab_info(&self) -> String {
        let mut info = format!(
            "**Pakistan Income Tax Slabs for Tax Year {}:**\n\n",
            self.tax_year
        );
        for slab in self.slabs.slabs() {
            info.push_str(&format!(
                "• {}: {}\n",
                slab.label(),
                format_rate(slab.rate_percent)
            ));
        }
        info.push_str(&format!(
            "\n*Note: These rates are for Tax Year {}. Please verify current rates with FBR.*",
            self.tax_year
        ));
        info
    }

    pub fn filing_info(&self) -> String {
        let mut info = String::from("**Income Tax Return Filing Deadlines:**\n\n");
        for entry in &self.filing_deadlines {
            info.push_str(&format!("• {}: {}\n", entry.filer, entry.deadline));
        }
        info.push_str("\n*Note: Late filing may result in penalties. File through FBR's IRIS portal.*");
        info
    }

    pub fn deductions_info(&self) -> String {
        let mut info = String::from("**Common Tax Deductions and Exemptions:**\n\n");
        for d in &self.deductions {
            info.push_str(&format!("• **{}**: {}\n", d.name, d.description));
            info.push_str(&format!("  - Limit: {}\n", d.limit));
            info.push_str(&format!("  - Condition: {}\n\n", d.condition));
        }
        info.push_str("*Note: Consult current tax laws for detailed eligibility criteria.*");
        info
    }

    pub fn withholding_info(&self) -> String {
        let mut info = String::from("**Withholding Tax Rates (deducted at source):**\n\n");
        for rate in &self.withholding_rates {
            match &rate.note {
                Some(note) => info.push_str(&format!("• {}: {}\n", rate.payment, note)),
                None => info.push_str(&format!(
                    "• {}: {}\n",
                    rate.payment,
                    format_rate(rate.rate_percent)
                )),
            }
        }
        info.push_str("\n*Note: Rates shown are for filers; non-filers are generally charged higher rates.*");
        info
    }

    /// Reference text answering a category directly, if it has one.
    pub fn reference_text(&self, category: Category) -> Option<String> {
        match category {
            Category::Rates => Some(self.slab_info()),
            Category::Filing => Some(self.filing_info()),
            Category::Deductions => Some(self.deductions_info()),
            Category::Withholding => Some(self.withholding_info()),
            Category::Calculation | Category::General | Category::Invalid => None,
        }
    }

    /// Grounding context injected into provider requests for `category`.
    pub fn grounding_context(&self, category: Category) -> String {
        let section = match category {
            Category::Calculation => Some(self.slab_info()),
            other => self.reference_text(other),
        };
        match section {
            Some(text) => format!("{BASE_CONTEXT}\n\n{text}"),
            None => BASE_CONTEXT.to_string(),
        }
    }
}
