// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rupee formatting. Amounts are rounded to whole rupees here and nowhere else.

const LAKH: f64 = 100_000.0;
const CRORE: f64 = 10_000_000.0;

/// Formats an amount as `Rs. 1,234,567`.
pub fn format_rupees(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!("{sign}Rs. {}", group_thousands(&digits))
}

/// Formats large amounts in lakh/crore (`Rs. 12.50 lakh`), smaller ones like
/// [`format_rupees`].
pub fn format_compact(amount: f64) -> String {
    if amount >= CRORE {
        format!("Rs. {:.2} crore", amount / CRORE)
    } else if amount >= LAKH {
        format!("Rs. {:.2} lakh", amount / LAKH)
    } else {
        format_rupees(amount)
    }
}

/// Formats a percentage without trailing zeros (`2.5%`, `35%`).
pub fn format_rate(rate_percent: f64) -> String {
    format!("{rate_percent}%")
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
