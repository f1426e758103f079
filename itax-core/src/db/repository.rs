use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ClientRecord, NewClientRecord};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Storage for saved clients. The tax engine never touches this; callers
/// load a record, evaluate its input and render the result.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn save(
        &self,
        client: NewClientRecord,
    ) -> Result<ClientRecord, RepositoryError>;

    /// All clients, oldest first.
    async fn list(&self) -> Result<Vec<ClientRecord>, RepositoryError>;

    async fn get(
        &self,
        id: i64,
    ) -> Result<ClientRecord, RepositoryError>;

    async fn delete(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError>;
}
