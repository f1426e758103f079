//! SQLite storage backend for saved clients.

mod decimal;
mod factory;
mod repository;

/// Database file used by the binaries when none is given.
pub const DEFAULT_DATABASE: &str = "clients.db";

pub use factory::SqliteRepositoryFactory;
pub use repository::SqliteRepository;
