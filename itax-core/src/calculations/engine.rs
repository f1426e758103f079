//! Regime comparison engine.
//!
//! [`TaxEngine`] borrows a [`TaxPolicy`] and runs the full pipeline for each
//! regime:
//!
//! 1. taxable income = `max(0, gross - deductions)`
//! 2. slab tax from the regime's schedule
//! 3. rebate, surcharge and cess, rounded up to a whole rupee
//!
//! It then recommends whichever regime yields the smaller tax.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use itax_core::{Regime, TaxPolicy, TaxpayerInput};
//! use itax_core::calculations::TaxEngine;
//!
//! let policy = TaxPolicy::default();
//! let engine = TaxEngine::new(&policy);
//!
//! let input = TaxpayerInput {
//!     basic_salary: dec!(800000),
//!     ..Default::default()
//! };
//! let evaluation = engine.evaluate(&input);
//!
//! assert_eq!(evaluation.new.taxable_income, dec!(750000));
//! assert_eq!(evaluation.new.tax_payable, dec!(31200));
//! assert_eq!(evaluation.recommended, Regime::New);
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::adjust::adjust_detailed;
use crate::calculations::common::non_negative;
use crate::calculations::deductions::{
    RegimeDeductions, prepare_new_deductions, prepare_old_deductions,
};
use crate::calculations::slab::slab_tax;
use crate::{Evaluation, Regime, RegimeResult, TaxPolicy, TaxpayerInput};

/// Stateless calculator bound to one policy.
#[derive(Debug, Clone, Copy)]
pub struct TaxEngine<'a> {
    policy: &'a TaxPolicy,
}

impl<'a> TaxEngine<'a> {
    pub fn new(policy: &'a TaxPolicy) -> Self {
        Self { policy }
    }

    /// Computes `(taxable_income, tax_payable)` for one regime.
    ///
    /// `deductions` must already contain everything the regime allows; use
    /// [`prepare_old_deductions`] or [`prepare_new_deductions`] to build it.
    /// Negative inputs are not rejected: a negative taxable income is
    /// clamped to zero and yields zero tax.
    pub fn compute(
        &self,
        gross: Decimal,
        deductions: Decimal,
        regime: Regime,
    ) -> (Decimal, Decimal) {
        let result = self.run(gross, deductions, regime);
        (result.taxable_income, result.tax_payable)
    }

    /// Runs the pipeline with a regime-specific deduction set.
    pub fn compute_with<D: RegimeDeductions>(
        &self,
        gross: Decimal,
        deductions: &D,
    ) -> RegimeResult {
        self.run(gross, deductions.total(), D::REGIME)
    }

    /// Evaluates both regimes for `input` and recommends the cheaper one.
    pub fn evaluate(
        &self,
        input: &TaxpayerInput,
    ) -> Evaluation {
        let gross = input.gross_income();
        if gross < Decimal::ZERO {
            warn!(%gross, "negative gross income, taxable income clamps to zero");
        }

        let old = self.compute_with(gross, &prepare_old_deductions(input, self.policy));
        let new = self.compute_with(gross, &prepare_new_deductions(input, self.policy));

        let recommended = recommend(old.tax_payable, new.tax_payable);
        let savings = (old.tax_payable - new.tax_payable).abs();

        debug!(
            old_tax = %old.tax_payable,
            new_tax = %new.tax_payable,
            recommended = recommended.as_str(),
            "evaluated both regimes"
        );

        Evaluation {
            old,
            new,
            recommended,
            savings,
        }
    }

    fn run(
        &self,
        gross: Decimal,
        deductions: Decimal,
        regime: Regime,
    ) -> RegimeResult {
        let taxable_income = non_negative(gross.saturating_sub(deductions));
        let slab = slab_tax(taxable_income, self.policy.brackets(regime));
        let adjustment = adjust_detailed(taxable_income, slab, self.policy);

        debug!(
            regime = regime.as_str(),
            %taxable_income,
            slab_tax = %slab,
            tax_payable = %adjustment.tax_payable,
            "computed regime tax"
        );

        RegimeResult {
            regime,
            gross_income: gross,
            deductions,
            taxable_income,
            slab_tax: slab,
            rebate: adjustment.rebate,
            surcharge: adjustment.surcharge,
            cess: adjustment.cess,
            tax_payable: adjustment.tax_payable,
        }
    }
}

/// Picks the regime with the strictly smaller tax.
///
/// A tie goes to the New regime: it is the default regime and needs no
/// investment proofs.
pub fn recommend(
    old_tax: Decimal,
    new_tax: Decimal,
) -> Regime {
    if old_tax < new_tax {
        Regime::Old
    } else {
        Regime::New
    }
}
