use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Income components and investment declarations for one taxpayer.
///
/// Every monetary field is expected to be non-negative; an absent value is
/// zero. Investment amounts are raw declarations, the statutory caps are
/// applied when deductions are prepared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxpayerInput {
    pub basic_salary: Decimal,
    /// House rent allowance received from the employer.
    pub hra_received: Decimal,
    pub rent_paid: Decimal,
    pub other_allowances: Decimal,
    pub capital_gains: Decimal,
    pub other_income: Decimal,
    /// Section 80C investments (PPF, ELSS, life insurance premiums, ...).
    pub sec80c_investment: Decimal,
    /// Section 80CCD(1B) contribution to the national pension scheme.
    pub sec80ccd_contribution: Decimal,
    /// Whether the taxpayer rents in a metro city (raises the HRA ceiling).
    pub metro: bool,
}

impl TaxpayerInput {
    /// Gross total income before any exemption or deduction.
    ///
    /// The full HRA received counts as income here; the exempt part is
    /// given back through the Old regime deductions.
    ///
    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    pub fn gross_income(&self) -> Decimal {
        [
            self.hra_received,
            self.other_allowances,
            self.capital_gains,
            self.other_income,
        ]
        .into_iter()
        .fold(self.basic_salary, Decimal::saturating_add)
    }
}
