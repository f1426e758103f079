//! Post-slab adjustments: rebate, surcharge and cess.
//!
//! The three steps always run in the same order and each one works on the
//! output of the previous step:
//!
//! | Step | Rule |
//! |------|------|
//! | Rebate | Taxable income at or below the threshold pays no tax at all |
//! | Surcharge | Highest band whose threshold the income exceeds, applied to the post-rebate tax |
//! | Cess | Flat rate on the tax after rebate and surcharge |
//!
//! The final figure is rounded up to a whole rupee. Neither the rebate nor
//! the surcharge tapers at its threshold, so one extra rupee of income can
//! raise the tax sharply.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TaxPolicy;
use crate::calculations::common::round_up;

/// Intermediate amounts produced while adjusting a slab tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustment {
    pub slab_tax: Decimal,
    pub rebate: Decimal,
    pub surcharge: Decimal,
    pub cess: Decimal,
    pub tax_payable: Decimal,
}

/// Applies rebate, surcharge and cess to `slab_tax` and returns the rounded
/// tax payable.
pub fn adjust(
    taxable_income: Decimal,
    slab_tax: Decimal,
    policy: &TaxPolicy,
) -> Decimal {
    adjust_detailed(taxable_income, slab_tax, policy).tax_payable
}

/// Same as [`adjust`], keeping every intermediate amount.
pub fn adjust_detailed(
    taxable_income: Decimal,
    slab_tax: Decimal,
    policy: &TaxPolicy,
) -> Adjustment {
    let rebate = rebate(taxable_income, slab_tax, policy);
    let after_rebate = slab_tax - rebate;

    let surcharge = after_rebate * surcharge_rate(taxable_income, policy);
    let after_surcharge = after_rebate + surcharge;

    let cess = after_surcharge * policy.cess_rate;
    let tax_payable = round_up(after_surcharge + cess);

    Adjustment {
        slab_tax,
        rebate,
        surcharge,
        cess,
        tax_payable,
    }
}

/// Amount of `tax` forgiven: all of it at or below the threshold, none above.
pub fn rebate(
    taxable_income: Decimal,
    tax: Decimal,
    policy: &TaxPolicy,
) -> Decimal {
    if taxable_income <= policy.rebate_threshold {
        tax
    } else {
        Decimal::ZERO
    }
}

/// Surcharge rate for `taxable_income`, zero below the lowest band.
pub fn surcharge_rate(
    taxable_income: Decimal,
    policy: &TaxPolicy,
) -> Decimal {
    policy
        .surcharge_bands
        .iter()
        .find(|band| taxable_income > band.threshold)
        .map(|band| band.rate)
        .unwrap_or(Decimal::ZERO)
}
