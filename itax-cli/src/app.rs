//! Glue between the command line, the client store and the tax engine.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use itax_core::db::{MemoryRepositoryFactory, RepositoryRegistry};
use itax_core::{
    ClientRecord, ClientRepository, Evaluation, NewClientRecord, Regime, TaxEngine, TaxPolicy,
};
use itax_db_sqlite::SqliteRepositoryFactory;
use tracing::{debug, info};

use crate::report::ClientReport;

/// Registry with every storage backend this binary ships.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry.register(Box::new(MemoryRepositoryFactory));
    registry
}

/// Reads and validates a TOML policy file, or returns the built-in policy.
pub fn load_policy(path: Option<&Path>) -> Result<TaxPolicy> {
    let Some(path) = path else {
        return Ok(TaxPolicy::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read policy file: {}", path.display()))?;
    let policy = TaxPolicy::from_toml_str(&text)
        .with_context(|| format!("Invalid policy file: {}", path.display()))?;
    info!(policy = %policy.name, path = %path.display(), "loaded tax policy");
    Ok(policy)
}

/// Parses a `--regime` value, naming the accepted values on failure.
pub fn parse_regime(value: &str) -> Result<Regime, String> {
    Regime::parse(value).ok_or_else(|| {
        let names: Vec<&str> = Regime::all().iter().map(Regime::as_str).collect();
        format!("unknown regime '{value}', expected one of: {}", names.join(", "))
    })
}

/// Client operations against one store and one policy.
pub struct ClientService<'a> {
    repo: &'a dyn ClientRepository,
    engine: TaxEngine<'a>,
}

impl<'a> ClientService<'a> {
    pub fn new(
        repo: &'a dyn ClientRepository,
        policy: &'a TaxPolicy,
    ) -> Self {
        Self {
            repo,
            engine: TaxEngine::new(policy),
        }
    }

    pub async fn save(
        &self,
        client: NewClientRecord,
    ) -> Result<ClientRecord> {
        let saved = self
            .repo
            .save(client)
            .await
            .context("Failed to save client")?;
        Ok(saved)
    }

    /// Every saved client with its evaluation, oldest first.
    pub async fn list(&self) -> Result<Vec<(ClientRecord, Evaluation)>> {
        let clients = self.repo.list().await.context("Failed to list clients")?;
        debug!(count = clients.len(), "evaluating saved clients");
        Ok(clients
            .into_iter()
            .map(|client| {
                let evaluation = self.engine.evaluate(&client.input);
                (client, evaluation)
            })
            .collect())
    }

    /// Like [`list`](Self::list), keeping only clients better off under `regime`.
    pub async fn list_recommending(
        &self,
        regime: Option<Regime>,
    ) -> Result<Vec<(ClientRecord, Evaluation)>> {
        let mut clients = self.list().await?;
        if let Some(regime) = regime {
            clients.retain(|(_, evaluation)| evaluation.recommended == regime);
        }
        Ok(clients)
    }

    pub async fn show(
        &self,
        id: i64,
    ) -> Result<(ClientRecord, Evaluation)> {
        let client = self
            .repo
            .get(id)
            .await
            .with_context(|| format!("Failed to load client {id}"))?;
        let evaluation = self.engine.evaluate(&client.input);
        Ok((client, evaluation))
    }

    pub async fn delete(
        &self,
        id: i64,
    ) -> Result<()> {
        self.repo
            .delete(id)
            .await
            .with_context(|| format!("Failed to delete client {id}"))
    }

    /// Writes the report for a saved client into `dir`.
    pub async fn write_report(
        &self,
        id: i64,
        dir: &Path,
    ) -> Result<PathBuf> {
        let (client, evaluation) = self.show(id).await?;
        ClientReport::new(&client.name, &evaluation).write_to(dir)
    }
}
