//! Tax calculation modules for the Old and New regimes.
//!
//! This module provides the computation pipeline, organized by stage:
//! slab tax, HRA exemption, deduction assembly, post-slab adjustments and
//! the engine that runs them for both regimes.

pub mod adjust;
pub mod common;
pub mod deductions;
pub mod engine;
pub mod exemption;
pub mod slab;

pub use adjust::{Adjustment, adjust, adjust_detailed};
pub use deductions::{
    NewRegimeDeductions, OldRegimeDeductions, RegimeDeductions, prepare_new_deductions,
    prepare_old_deductions,
};
pub use engine::{TaxEngine, recommend};
pub use exemption::hra_exemption;
pub use slab::slab_tax;
