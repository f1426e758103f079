//! House rent allowance exemption (Old regime only).

use rust_decimal::Decimal;

use crate::HraRule;
use crate::calculations::common::non_negative;

/// Exempt portion of the house rent allowance.
///
/// The smallest of:
/// 1. the allowance actually received,
/// 2. rent paid in excess of `rule.rent_basic_fraction` of basic salary
///    (never below zero),
/// 3. the metro or non-metro share of basic salary.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::TaxPolicy;
/// use itax_core::calculations::hra_exemption;
///
/// let rule = TaxPolicy::default().hra;
///
/// // min(240k, 300k - 60k, 50% of 600k)
/// let exempt = hra_exemption(dec!(240000), dec!(300000), dec!(600000), true, &rule);
/// assert_eq!(exempt, dec!(240000));
/// ```
pub fn hra_exemption(
    hra: Decimal,
    rent: Decimal,
    basic: Decimal,
    metro: bool,
    rule: &HraRule,
) -> Decimal {
    let rent_excess = non_negative(rent - rule.rent_basic_fraction * basic);
    let ceiling = rule.ceiling_fraction(metro) * basic;

    hra.min(rent_excess).min(ceiling)
}
