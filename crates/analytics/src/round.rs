use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Rounds to `dp` decimal places with midpoints going toward positive infinity,
/// so `2.5` becomes `3` and `-2.5` becomes `-2`.
///
/// Saturates instead of overflowing near `Decimal::MAX`.
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    let scale = Decimal::from(10u64.pow(dp));
    let shifted = value.saturating_mul(scale).saturating_add(dec!(0.5)).floor();
    (shifted / scale).normalize()
}
