use std::collections::HashMap;

use async_trait::async_trait;

use super::repository::{ClientRepository, RepositoryError};

/// Where client records are stored.
///
/// `backend` selects a registered [`RepositoryFactory`] by its
/// [`RepositoryFactory::backend_name`]; `connection_string` is handed to that
/// factory untouched.
///
/// | backend    | connection_string examples          |
/// |------------|-------------------------------------|
/// | `sqlite`   | `clients.db`, `:memory:`            |
/// | `memory`   | ignored                             |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub backend: String,
    pub connection_string: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: ":memory:".to_string(),
        }
    }
}

/// Builds a [`ClientRepository`] for one storage backend.
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    /// Lowercase name used in [`DbConfig::backend`].
    fn backend_name(&self) -> &'static str;

    /// Opens the store, running any schema setup it needs first.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn ClientRepository>, RepositoryError>;
}

/// Backend factories keyed by name. Register every backend at startup, then
/// call [`RepositoryRegistry::create`] with the configured [`DbConfig`].
pub struct RepositoryRegistry {
    factories: HashMap<&'static str, Box<dyn RepositoryFactory>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Adds `factory`, replacing any earlier factory with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn RepositoryFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Registered backend names in alphabetical order.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Opens the repository for `config.backend`.
    ///
    /// # Errors
    /// * [`RepositoryError::Configuration`] when the backend is unknown.
    /// * Whatever the selected factory returns.
    pub async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn ClientRepository>, RepositoryError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                RepositoryError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for RepositoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::db::memory::{MemoryClientRepository, MemoryRepositoryFactory};
    use crate::models::{NewClientRecord, TaxpayerInput};

    struct FailingFactory;

    #[async_trait]
    impl RepositoryFactory for FailingFactory {
        fn backend_name(&self) -> &'static str {
            "failing"
        }

        async fn create(
            &self,
            _config: &DbConfig,
        ) -> Result<Box<dyn ClientRepository>, RepositoryError> {
            Err(RepositoryError::Connection("intentional failure".to_string()))
        }
    }

    struct NamedFactory(&'static str);

    #[async_trait]
    impl RepositoryFactory for NamedFactory {
        fn backend_name(&self) -> &'static str {
            self.0
        }

        async fn create(
            &self,
            _config: &DbConfig,
        ) -> Result<Box<dyn ClientRepository>, RepositoryError> {
            Ok(Box::new(MemoryClientRepository::new()))
        }
    }

    fn config(backend: &str) -> DbConfig {
        DbConfig {
            backend: backend.to_string(),
            connection_string: String::new(),
        }
    }

    #[test]
    fn dbconfig_default_is_sqlite_memory() {
        let cfg = DbConfig::default();

        assert_eq!(cfg.backend, "sqlite");
        assert_eq!(cfg.connection_string, ":memory:");
    }

    #[test]
    fn new_registry_has_no_backends() {
        assert!(RepositoryRegistry::new().available_backends().is_empty());
        assert!(RepositoryRegistry::default().available_backends().is_empty());
    }

    #[test]
    fn available_backends_is_sorted_and_deduplicated() {
        let mut reg = RepositoryRegistry::new();
        reg.register(Box::new(NamedFactory("sqlite")));
        reg.register(Box::new(NamedFactory("memory")));
        reg.register(Box::new(NamedFactory("sqlite")));

        assert_eq!(reg.available_backends(), vec!["memory", "sqlite"]);
    }

    #[tokio::test]
    async fn create_returns_working_repository() {
        let mut reg = RepositoryRegistry::new();
        reg.register(Box::new(MemoryRepositoryFactory));

        let repo = reg.create(&config("memory")).await.unwrap();
        repo.save(NewClientRecord {
            name: "Asha".to_string(),
            input: TaxpayerInput::default(),
        })
        .await
        .unwrap();

        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_backend_names_requested_and_available_backends() {
        let mut reg = RepositoryRegistry::new();
        reg.register(Box::new(MemoryRepositoryFactory));

        match reg.create(&config("postgres")).await {
            Err(RepositoryError::Configuration(msg)) => {
                assert!(msg.contains("postgres"), "error should name the requested backend");
                assert!(msg.contains("memory"), "error should list available backends");
            }
            Err(other) => panic!("expected Configuration error, got {other:#?}"),
            Ok(_) => panic!("expected Configuration error, got a repository"),
        }
    }

    #[tokio::test]
    async fn create_propagates_factory_error() {
        let mut reg = RepositoryRegistry::new();
        reg.register(Box::new(FailingFactory));

        let result = reg.create(&config("failing")).await;

        assert!(matches!(
            result,
            Err(RepositoryError::Connection(msg)) if msg == "intentional failure"
        ));
    }
}
