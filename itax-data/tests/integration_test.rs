//! Integration tests for client import using the SQLite backend.

use itax_core::{ClientRepository, TaxEngine, TaxPolicy};
use itax_data::{ClientImportError, ClientImporter};
use itax_db_sqlite::SqliteRepository;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use sqlx::sqlite::SqlitePoolOptions;

const CLIENTS_CSV: &str = include_str!("fixtures/clients.csv");

async fn setup_test_db() -> SqliteRepository {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    let repo = SqliteRepository::new_with_pool(pool).await;
    repo.run_migrations()
        .await
        .expect("Failed to run migrations");

    repo
}

#[tokio::test]
async fn test_load_fixture_clients() {
    let repo = setup_test_db().await;

    let records = ClientImporter::parse(CLIENTS_CSV.as_bytes()).expect("Failed to parse CSV");
    let inserted = ClientImporter::load(&repo, &records)
        .await
        .expect("Failed to load clients");

    assert_eq!(inserted, 4);
    assert_eq!(repo.list().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_loaded_clients_keep_amounts() {
    let repo = setup_test_db().await;

    let records = ClientImporter::parse(CLIENTS_CSV.as_bytes()).expect("Failed to parse CSV");
    ClientImporter::load(&repo, &records)
        .await
        .expect("Failed to load clients");

    let clients = repo.list().await.expect("Failed to list clients");
    let lakshmi = clients
        .iter()
        .find(|c| c.name == "Iyer, Lakshmi")
        .expect("Lakshmi should be imported");

    assert_eq!(lakshmi.input.basic_salary, dec!(1200000));
    assert_eq!(lakshmi.input.sec80c_investment, dec!(200000));
    assert!(lakshmi.input.metro);
}

#[tokio::test]
async fn test_imported_client_evaluates() {
    let repo = setup_test_db().await;
    let policy = TaxPolicy::default();
    let engine = TaxEngine::new(&policy);

    let records = ClientImporter::parse(CLIENTS_CSV.as_bytes()).expect("Failed to parse CSV");
    ClientImporter::load(&repo, &records)
        .await
        .expect("Failed to load clients");

    let clients = repo.list().await.unwrap();
    let neha = clients.iter().find(|c| c.name == "Neha Shah").unwrap();
    let evaluation = engine.evaluate(&neha.input);

    assert_eq!(evaluation.old.tax_payable, dec!(4063410));
    assert_eq!(evaluation.new.tax_payable, dec!(3928860));
}

#[tokio::test]
async fn test_load_twice_appends() {
    let repo = setup_test_db().await;

    let records = ClientImporter::parse(CLIENTS_CSV.as_bytes()).expect("Failed to parse CSV");
    ClientImporter::load(&repo, &records).await.unwrap();
    ClientImporter::load(&repo, &records).await.unwrap();

    assert_eq!(repo.list().await.unwrap().len(), 8);
}

#[tokio::test]
async fn test_invalid_file_writes_nothing() {
    let repo = setup_test_db().await;
    let csv = format!("{}Bad Row,-1,0,0,0,0,0,0,0,no\n", CLIENTS_CSV);

    let result = ClientImporter::parse(csv.as_bytes());

    assert!(matches!(
        result,
        Err(ClientImportError::InvalidRow { line: 6, .. })
    ));
    assert!(repo.list().await.unwrap().is_empty());
}
