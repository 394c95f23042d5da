//! Display helpers for calculator figures.
//!
//! These produce exactly the strings the results view shows, so their
//! rounding is part of the output contract.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places `format_percentage` uses when the caller has no preference.
pub const DEFAULT_PERCENTAGE_DECIMALS: u32 = 1;

/// Formats whole euros with thousands separators, e.g. `€139,811` or `-€5,189`.
///
/// Fractions are rounded half away from zero and never shown.
pub fn format_currency(amount: Decimal) -> String {
    let whole = amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .abs()
        .trunc();
    let sign = if amount < Decimal::ZERO { "-" } else { "" };
    format!("{sign}€{}", group_thousands(&whole.to_string()))
}

/// Formats `value` with `decimals` fixed places and a percent sign, e.g. `25.8%`.
pub fn format_percentage(value: Decimal, decimals: u32) -> String {
    format!("{}%", to_fixed(value, decimals))
}

/// Formats a multiplier with one decimal place, e.g. `2.3x`.
pub fn format_roi_multiplier(roi: Decimal) -> String {
    format!("{}x", to_fixed(roi, 1))
}

/// Fixed-point rendering. A negative value keeps its sign even when it rounds to zero.
fn to_fixed(value: Decimal, decimals: u32) -> String {
    let magnitude = value
        .abs()
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let sign = if value < Decimal::ZERO { "-" } else { "" };
    format!("{sign}{:.*}", decimals as usize, magnitude)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
