// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Progressive income tax over an ordered slab table.
//!
//! Sums are kept in unrounded `f64`; rounding happens only when a result is
//! formatted for display (see [`crate::currency`]).

use serde::{Deserialize, Serialize};
use taxnova_core::TaxnovaError;

use crate::currency::format_rupees;

/// A contiguous income range taxed at its own marginal rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaxSlab {
    pub lower_bound: f64,
    /// `None` for the final, unbounded slab.
    #[serde(default)]
    pub upper_bound: Option<f64>,
    pub rate_percent: f64,
}

impl TaxSlab {
    pub fn new(lower_bound: f64, upper_bound: Option<f64>, rate_percent: f64) -> Self {
        Self {
            lower_bound,
            upper_bound,
            rate_percent,
        }
    }

    /// Human-readable range, e.g. `Rs. 600,000 - Rs. 1,200,000`.
    pub fn label(&self) -> String {
        match self.upper_bound {
            Some(upper) => format!(
                "{} - {}",
                format_rupees(self.lower_bound),
                format_rupees(upper)
            ),
            None => format!("Above {}", format_rupees(self.lower_bound)),
        }
    }
}

/// Validated slab table covering `[0, ∞)`.
///
/// Slabs are contiguous (`lower[i] == upper[i-1]`), rates never decrease,
/// and only the last slab is unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxSlab>", into = "Vec<TaxSlab>")]
pub struct SlabTable {
    slabs: Vec<TaxSlab>,
}

impl SlabTable {
    pub fn new(slabs: Vec<TaxSlab>) -> Result<Self, TaxnovaError> {
        let Some(first) = slabs.first() else {
            return Err(TaxnovaError::Config("slab table is empty".into()));
        };
        if first.lower_bound != 0.0 {
            return Err(TaxnovaError::Config(format!(
                "first slab must start at 0, got {}",
                first.lower_bound
            )));
        }

        let last = slabs.len() - 1;
        for (i, slab) in slabs.iter().enumerate() {
            if !(0.0..=100.0).contains(&slab.rate_percent) {
                return Err(TaxnovaError::Config(format!(
                    "slab {i} rate {} is outside 0-100",
                    slab.rate_percent
                )));
            }
            match slab.upper_bound {
                None if i != last => {
                    return Err(TaxnovaError::Config(format!(
                        "slab {i} is unbounded but is not the last slab"
                    )));
                }
                Some(_) if i == last => {
                    return Err(TaxnovaError::Config(
                        "last slab must be unbounded".into(),
                    ));
                }
                Some(upper) if upper <= slab.lower_bound => {
                    return Err(TaxnovaError::Config(format!(
                        "slab {i} upper bound {upper} is not above its lower bound {}",
                        slab.lower_bound
                    )));
                }
                _ => {}
            }
            if i > 0 {
                let prev = &slabs[i - 1];
                if prev.upper_bound != Some(slab.lower_bound) {
                    return Err(TaxnovaError::Config(format!(
                        "slab {i} starts at {} but slab {} ends at {:?}",
                        slab.lower_bound,
                        i - 1,
                        prev.upper_bound
                    )));
                }
                if slab.rate_percent < prev.rate_percent {
                    return Err(TaxnovaError::Config(format!(
                        "slab {i} rate {} is lower than the previous rate {}",
                        slab.rate_percent, prev.rate_percent
                    )));
                }
            }
        }

        Ok(Self { slabs })
    }

    pub fn slabs(&self) -> &[TaxSlab] {
        &self.slabs
    }
}

impl TryFrom<Vec<TaxSlab>> for SlabTable {
    type Error = TaxnovaError;

    fn try_from(slabs: Vec<TaxSlab>) -> Result<Self, Self::Error> {
        SlabTable::new(slabs)
    }
}

impl From<SlabTable> for Vec<TaxSlab> {
    fn from(table: SlabTable) -> Self {
        table.slabs
    }
}

/// Tax attributed to one slab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlabBreakdown {
    pub slab_label: String,
    pub rate: f64,
    pub taxable_amount_in_slab: f64,
    pub tax_in_slab: f64,
}

/// Outcome of [`calculate`].
///
/// `breakdown` sums to `total_tax`, `net_income == gross_income - total_tax`
/// and `effective_rate_percent` is zero for zero income.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxCalculationResult {
    pub gross_income: f64,
    pub total_tax: f64,
    pub effective_rate_percent: f64,
    pub net_income: f64,
    pub breakdown: Vec<SlabBreakdown>,
}

impl TaxCalculationResult {
    fn zero() -> Self {
        Self {
            gross_income: 0.0,
            total_tax: 0.0,
            effective_rate_percent: 0.0,
            net_income: 0.0,
            breakdown: Vec::new(),
        }
    }
}

/// Computes progressive tax on `income`.
///
/// Negative income fails with [`TaxnovaError::InvalidIncome`]; non-finite
/// income with [`TaxnovaError::CalculationFailed`]. Zero income yields an
/// all-zero result with an empty breakdown.
pub fn calculate(income: f64, slabs: &SlabTable) -> Result<TaxCalculationResult, TaxnovaError> {
    if income.is_nan() || income.is_infinite() {
        return Err(TaxnovaError::CalculationFailed(format!(
            "income {income} is not a finite number"
        )));
    }
    if income < 0.0 {
        return Err(TaxnovaError::InvalidIncome(income));
    }
    if income == 0.0 {
        return Ok(TaxCalculationResult::zero());
    }

    let mut total_tax = 0.0;
    let mut breakdown = Vec::new();

    for slab in slabs.slabs() {
        if income <= slab.lower_bound {
            break;
        }
        let ceiling = slab.upper_bound.map_or(income, |upper| income.min(upper));
        let taxable = (ceiling - slab.lower_bound).max(0.0);
        if taxable <= 0.0 {
            continue;
        }
        let tax = taxable * slab.rate_percent / 100.0;
        total_tax += tax;
        breakdown.push(SlabBreakdown {
            slab_label: slab.label(),
            rate: slab.rate_percent,
            taxable_amount_in_slab: taxable,
            tax_in_slab: tax,
        });
    }

    Ok(TaxCalculationResult {
        gross_income: income,
        total_tax,
        effective_rate_percent: total_tax / income * 100.0,
        net_income: income - total_tax,
        breakdown,
    })
}
