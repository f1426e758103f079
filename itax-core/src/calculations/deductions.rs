//! Per-regime deduction assembly.
//!
//! The two regimes allow different deductions, so each has its own
//! preparation function and its own result type. The engine only accepts
//! these types, which keeps an Old regime claim from reaching the New
//! regime schedule.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::non_negative;
use crate::calculations::exemption::hra_exemption;
use crate::{Regime, TaxPolicy, TaxpayerInput};

/// Deductions that belong to exactly one regime.
pub trait RegimeDeductions {
    /// Regime whose slab schedule these deductions are computed against.
    const REGIME: Regime;

    fn total(&self) -> Decimal;
}

/// Old regime: standard deduction, HRA exemption and capped investments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OldRegimeDeductions {
    pub standard_deduction: Decimal,
    pub hra_exemption: Decimal,
    /// Section 80C investment after applying the cap.
    pub sec80c: Decimal,
    /// Section 80CCD(1B) contribution after applying the cap.
    pub sec80ccd: Decimal,
}

impl RegimeDeductions for OldRegimeDeductions {
    const REGIME: Regime = Regime::Old;

    fn total(&self) -> Decimal {
        [self.hra_exemption, self.sec80c, self.sec80ccd]
            .into_iter()
            .fold(self.standard_deduction, Decimal::saturating_add)
    }
}

/// New regime: standard deduction only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRegimeDeductions {
    pub standard_deduction: Decimal,
}

impl RegimeDeductions for NewRegimeDeductions {
    const REGIME: Regime = Regime::New;

    fn total(&self) -> Decimal {
        self.standard_deduction
    }
}

pub fn prepare_old_deductions(
    input: &TaxpayerInput,
    policy: &TaxPolicy,
) -> OldRegimeDeductions {
    OldRegimeDeductions {
        standard_deduction: policy.standard_deduction,
        hra_exemption: hra_exemption(
            input.hra_received,
            input.rent_paid,
            input.basic_salary,
            input.metro,
            &policy.hra,
        ),
        sec80c: non_negative(input.sec80c_investment).min(policy.sec80c_cap),
        sec80ccd: non_negative(input.sec80ccd_contribution).min(policy.sec80ccd_cap),
    }
}

pub fn prepare_new_deductions(
    _input: &TaxpayerInput,
    policy: &TaxPolicy,
) -> NewRegimeDeductions {
    NewRegimeDeductions {
        standard_deduction: policy.standard_deduction,
    }
}
