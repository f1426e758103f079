use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Regime;

/// Outcome of running the tax pipeline once for a single regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeResult {
    pub regime: Regime,
    pub gross_income: Decimal,
    /// Total deductions claimed under this regime.
    pub deductions: Decimal,
    /// `max(0, gross_income - deductions)`.
    pub taxable_income: Decimal,
    /// Tax from the slab table before any adjustment.
    pub slab_tax: Decimal,
    /// Amount forgiven by the small-income rebate.
    pub rebate: Decimal,
    pub surcharge: Decimal,
    pub cess: Decimal,
    /// Final liability, rounded up to a whole rupee.
    pub tax_payable: Decimal,
}

/// Side-by-side comparison of both regimes for one taxpayer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub old: RegimeResult,
    pub new: RegimeResult,
    /// Regime with the strictly smaller tax; the New regime on a tie.
    pub recommended: Regime,
    /// How much the recommended regime saves over the other one.
    pub savings: Decimal,
}

impl Evaluation {
    pub fn result(
        &self,
        regime: Regime,
    ) -> &RegimeResult {
        match regime {
            Regime::Old => &self.old,
            Regime::New => &self.new,
        }
    }

    /// True when both regimes produce the same tax.
    pub fn is_tie(&self) -> bool {
        self.old.tax_payable == self.new.tax_payable
    }
}
