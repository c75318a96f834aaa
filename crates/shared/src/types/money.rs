//! Amount display.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` end to end; text conversion only
//! happens at the API boundary.

use rust_decimal::Decimal;

/// Number of decimal places shown to users.
pub const DISPLAY_SCALE: u32 = 2;

/// Formats an amount for display with two decimal places.
///
/// Rounds half to even (Banker's Rounding), same as `Decimal::round_dp`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp(DISPLAY_SCALE);
    rounded.rescale(DISPLAY_SCALE);
    rounded.to_string()
}
