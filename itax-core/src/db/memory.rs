//! In-process client store, used by tests and by the `memory` backend.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::factory::{DbConfig, RepositoryFactory};
use super::repository::{ClientRepository, RepositoryError};
use crate::models::{ClientRecord, NewClientRecord};

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    clients: Vec<ClientRecord>,
}

/// Keeps clients in a `Vec` for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryClientRepository {
    store: Mutex<Store>,
}

impl MemoryClientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Store>, RepositoryError> {
        self.store
            .lock()
            .map_err(|e| RepositoryError::Database(format!("store lock poisoned: {e}")))
    }
}

#[async_trait]
impl ClientRepository for MemoryClientRepository {
    async fn save(
        &self,
        client: NewClientRecord,
    ) -> Result<ClientRecord, RepositoryError> {
        let mut store = self.lock()?;
        store.next_id += 1;
        let record = ClientRecord {
            id: store.next_id,
            name: client.name,
            input: client.input,
            created_at: Utc::now(),
        };
        store.clients.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<ClientRecord>, RepositoryError> {
        Ok(self.lock()?.clients.clone())
    }

    async fn get(
        &self,
        id: i64,
    ) -> Result<ClientRecord, RepositoryError> {
        self.lock()?
            .clients
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError> {
        let mut store = self.lock()?;
        let before = store.clients.len();
        store.clients.retain(|c| c.id != id);
        if store.clients.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

/// Registers the `memory` backend. Every `create` call starts empty.
pub struct MemoryRepositoryFactory;

#[async_trait]
impl RepositoryFactory for MemoryRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &DbConfig,
    ) -> Result<Box<dyn ClientRepository>, RepositoryError> {
        Ok(Box::new(MemoryClientRepository::new()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::TaxpayerInput;

    fn client(name: &str) -> NewClientRecord {
        NewClientRecord {
            name: name.to_string(),
            input: TaxpayerInput {
                basic_salary: dec!(600000),
                metro: true,
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn save_assigns_increasing_ids() {
        let repo = MemoryClientRepository::new();

        let a = repo.save(client("Asha")).await.unwrap();
        let b = repo.save(client("Ravi")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(b.input.basic_salary, dec!(600000));
    }

    #[tokio::test]
    async fn get_returns_saved_client() {
        let repo = MemoryClientRepository::new();
        let saved = repo.save(client("Asha")).await.unwrap();

        let fetched = repo.get(saved.id).await.unwrap();

        assert_eq!(fetched, saved);
    }

    #[tokio::test]
    async fn get_missing_client_is_not_found() {
        let repo = MemoryClientRepository::new();

        assert_eq!(repo.get(42).await, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn delete_removes_only_that_client() {
        let repo = MemoryClientRepository::new();
        let a = repo.save(client("Asha")).await.unwrap();
        let b = repo.save(client("Ravi")).await.unwrap();

        repo.delete(a.id).await.unwrap();

        let remaining = repo.list().await.unwrap();
        assert_eq!(remaining, vec![b]);
        assert_eq!(repo.delete(a.id).await, Err(RepositoryError::NotFound));
    }
}
