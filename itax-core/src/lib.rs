//! Old vs New regime income-tax engine.
//!
//! [`calculations`] holds the pure computation pipeline, [`models`] the
//! inputs, results and policy data it works on, and [`db`] the storage seam
//! for saved clients, which the engine itself never uses.

pub mod calculations;
pub mod db;
pub mod models;

pub use calculations::TaxEngine;
pub use db::repository::{ClientRepository, RepositoryError};
pub use models::*;
