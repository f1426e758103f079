mod client;
mod evaluation;
mod regime;
mod tax_bracket;
mod tax_policy;
mod taxpayer;

pub use client::{ClientRecord, NewClientRecord};
pub use evaluation::{Evaluation, RegimeResult};
pub use regime::Regime;
pub use tax_bracket::{BracketTable, TaxBracket};
pub use tax_policy::{HraRule, PolicyError, SurchargeBand, TaxPolicy};
pub use taxpayer::TaxpayerInput;
