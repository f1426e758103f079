pub mod factory;
pub mod memory;
pub mod repository;

pub use factory::{DbConfig, RepositoryFactory, RepositoryRegistry};
pub use memory::{MemoryClientRepository, MemoryRepositoryFactory};
pub use repository::{ClientRepository, RepositoryError};
