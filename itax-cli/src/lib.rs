pub mod app;
pub mod form;
pub mod logging;
pub mod report;
pub mod utils;

pub use app::{ClientService, build_registry, load_policy};
pub use form::{ClientForm, FormError};
pub use report::ClientReport;
