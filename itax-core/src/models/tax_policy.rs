//! Tax-year policy data: slab schedules, caps, rebate, surcharge and cess.
//!
//! Every number the engine applies lives here rather than in the
//! calculation code, so a new financial year is a data change. The built-in
//! [`TaxPolicy::default`] carries the FY 2023-24 figures; other years can be
//! loaded from a TOML file:
//!
//! ```toml
//! name = "FY 2023-24"
//! standard_deduction = "50000"
//! sec80c_cap = "150000"
//! sec80ccd_cap = "50000"
//! rebate_threshold = "500000"
//! cess_rate = "0.04"
//!
//! [hra]
//! rent_basic_fraction = "0.10"
//! metro_fraction = "0.50"
//! non_metro_fraction = "0.40"
//!
//! [[old_brackets]]
//! upper_bound = "250000"
//! rate = "0"
//! # ...
//! [[old_brackets]]
//! rate = "0.30"
//!
//! [[surcharge_bands]]
//! threshold = "50000000"
//! rate = "0.37"
//! # ...
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{BracketTable, Regime};

/// Errors raised while building or loading a [`TaxPolicy`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("bracket table has no brackets")]
    EmptyBracketTable,

    #[error("rate must be between 0 and 1, got {0}")]
    RateOutOfRange(Decimal),

    #[error("bracket {index} rate {rate} is lower than the previous rate {previous}")]
    DecreasingRate {
        index: usize,
        rate: Decimal,
        previous: Decimal,
    },

    #[error("bracket {index} bound {bound} is not above the previous bound {previous}")]
    NonIncreasingBound {
        index: usize,
        bound: Decimal,
        previous: Decimal,
    },

    #[error("last bracket must have no upper bound")]
    MissingOpenBracket,

    #[error("bracket {0} has no upper bound but is not the last bracket")]
    OpenBracketNotLast(usize),

    #[error("surcharge band {0} must have a lower threshold than the band before it")]
    SurchargeBandsOutOfOrder(usize),

    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("invalid policy file: {0}")]
    Parse(String),
}

/// Fractions used by the house rent allowance exemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HraRule {
    /// Share of basic salary that rent must exceed before it counts.
    pub rent_basic_fraction: Decimal,
    /// Ceiling as a share of basic salary in a metro city.
    pub metro_fraction: Decimal,
    /// Ceiling as a share of basic salary elsewhere.
    pub non_metro_fraction: Decimal,
}

impl HraRule {
    pub fn ceiling_fraction(
        &self,
        metro: bool,
    ) -> Decimal {
        if metro {
            self.metro_fraction
        } else {
            self.non_metro_fraction
        }
    }
}

/// A surcharge band: income strictly above `threshold` pays `rate` on the tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeBand {
    pub threshold: Decimal,
    pub rate: Decimal,
}

/// All policy parameters for one financial year.
///
/// Scalar fields come before nested tables so the struct serializes to
/// valid TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxPolicy {
    /// Human-readable label, e.g. `"FY 2023-24"`.
    pub name: String,
    /// Flat deduction from salary income, allowed under both regimes.
    pub standard_deduction: Decimal,
    pub sec80c_cap: Decimal,
    pub sec80ccd_cap: Decimal,
    /// Taxable income at or below this amount has its tax fully rebated.
    pub rebate_threshold: Decimal,
    pub cess_rate: Decimal,
    pub hra: HraRule,
    pub old_brackets: BracketTable,
    pub new_brackets: BracketTable,
    /// Ordered highest threshold first; the first band that matches wins.
    pub surcharge_bands: Vec<SurchargeBand>,
}

impl TaxPolicy {
    /// FY 2023-24 schedules and limits.
    pub fn fy_2023_24() -> Self {
        Self {
            name: "FY 2023-24".to_string(),
            standard_deduction: dec!(50000),
            sec80c_cap: dec!(150000),
            sec80ccd_cap: dec!(50000),
            rebate_threshold: dec!(500000),
            cess_rate: dec!(0.04),
            hra: HraRule {
                rent_basic_fraction: dec!(0.10),
                metro_fraction: dec!(0.50),
                non_metro_fraction: dec!(0.40),
            },
            old_brackets: BracketTable::from_static(&[
                (Some(dec!(250000)), dec!(0)),
                (Some(dec!(500000)), dec!(0.05)),
                (Some(dec!(1000000)), dec!(0.20)),
                (None, dec!(0.30)),
            ]),
            new_brackets: BracketTable::from_static(&[
                (Some(dec!(300000)), dec!(0)),
                (Some(dec!(600000)), dec!(0.05)),
                (Some(dec!(900000)), dec!(0.10)),
                (Some(dec!(1200000)), dec!(0.15)),
                (Some(dec!(1500000)), dec!(0.20)),
                (None, dec!(0.30)),
            ]),
            surcharge_bands: vec![
                SurchargeBand {
                    threshold: dec!(50000000),
                    rate: dec!(0.37),
                },
                SurchargeBand {
                    threshold: dec!(20000000),
                    rate: dec!(0.25),
                },
                SurchargeBand {
                    threshold: dec!(10000000),
                    rate: dec!(0.15),
                },
                SurchargeBand {
                    threshold: dec!(5000000),
                    rate: dec!(0.10),
                },
            ],
        }
    }

    /// Slab schedule for `regime`.
    pub fn brackets(
        &self,
        regime: Regime,
    ) -> &BracketTable {
        match regime {
            Regime::Old => &self.old_brackets,
            Regime::New => &self.new_brackets,
        }
    }

    /// Checks the scalar limits and the surcharge band ordering.
    ///
    /// Bracket tables validate themselves on construction, so they are not
    /// re-checked here.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] if:
    /// - a deduction, cap or threshold is negative
    /// - a rate is outside `[0, 1]`
    /// - surcharge thresholds are not strictly descending
    pub fn validate(&self) -> Result<(), PolicyError> {
        let amounts = [
            ("standard_deduction", self.standard_deduction),
            ("sec80c_cap", self.sec80c_cap),
            ("sec80ccd_cap", self.sec80ccd_cap),
            ("rebate_threshold", self.rebate_threshold),
        ];
        for (field, value) in amounts {
            if value < Decimal::ZERO {
                return Err(PolicyError::NegativeAmount { field, value });
            }
        }

        let rates = [
            self.cess_rate,
            self.hra.rent_basic_fraction,
            self.hra.metro_fraction,
            self.hra.non_metro_fraction,
        ];
        for rate in rates
            .into_iter()
            .chain(self.surcharge_bands.iter().map(|b| b.rate))
        {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(PolicyError::RateOutOfRange(rate));
            }
        }

        for (index, pair) in self.surcharge_bands.windows(2).enumerate() {
            if pair[1].threshold >= pair[0].threshold {
                return Err(PolicyError::SurchargeBandsOutOfOrder(index + 1));
            }
        }

        Ok(())
    }

    /// Parses and validates a policy from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, PolicyError> {
        let policy: Self = toml::from_str(s).map_err(|e| PolicyError::Parse(e.to_string()))?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn to_toml_string(&self) -> Result<String, PolicyError> {
        toml::to_string_pretty(self).map_err(|e| PolicyError::Parse(e.to_string()))
    }
}

impl Default for TaxPolicy {
    fn default() -> Self {
        Self::fy_2023_24()
    }
}
