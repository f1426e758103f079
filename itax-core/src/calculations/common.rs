//! Common utility functions for tax calculations.
//!
//! This module provides shared functionality used across the regime
//! pipeline, including rounding and clamping.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a tax amount up to the next whole rupee.
///
/// Any fractional part, however small, moves the value to the next integer;
/// whole values are returned unchanged.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::common::round_up;
///
/// assert_eq!(round_up(dec!(12345.01)), dec!(12346));
/// assert_eq!(round_up(dec!(54600)), dec!(54600));
/// assert_eq!(round_up(dec!(0)), dec!(0));
/// ```
pub fn round_up(value: Decimal) -> Decimal {
    value.ceil()
}

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Used for display; the engine itself only rounds the final tax.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Clamps negative values to zero.
pub fn non_negative(value: Decimal) -> Decimal {
    max(value, Decimal::ZERO)
}
