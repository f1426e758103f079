//! End-to-end tests: form input through the SQLite store to a written
//! report, plus policy files read from disk.

use std::fs;
use std::path::{Path, PathBuf};

use itax_cli::{ClientForm, ClientReport, ClientService, build_registry, load_policy};
use itax_core::db::DbConfig;
use itax_core::{Regime, TaxEngine, TaxPolicy};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Fresh scratch directory per test.
fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("itax-cli-{}-{}", test, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("failed to create scratch dir");
    dir
}

fn sqlite_config(dir: &Path) -> DbConfig {
    DbConfig {
        backend: "sqlite".to_string(),
        connection_string: dir.join("clients.db").to_string_lossy().into_owned(),
    }
}

fn asha_form() -> ClientForm {
    ClientForm {
        name: "Asha Menon".to_string(),
        basic_salary: "6,00,000".to_string(),
        hra_received: "2,40,000".to_string(),
        rent_paid: "3,00,000".to_string(),
        other_allowances: "50,000".to_string(),
        capital_gains: "20,000".to_string(),
        other_income: "10,000".to_string(),
        sec80c_investment: "2,00,000".to_string(),
        sec80ccd_contribution: "50,000".to_string(),
        metro: true,
    }
}

#[tokio::test]
async fn test_saved_client_survives_reopening_the_database() {
    let dir = scratch_dir("reopen");
    let config = sqlite_config(&dir);
    let policy = TaxPolicy::default();

    let saved = {
        let repo = build_registry().create(&config).await.expect("create store");
        let service = ClientService::new(&*repo, &policy);
        service
            .save(asha_form().to_new_client().unwrap())
            .await
            .expect("save client")
    };

    let repo = build_registry().create(&config).await.expect("reopen store");
    let service = ClientService::new(&*repo, &policy);
    let (client, evaluation) = service.show(saved.id).await.expect("load client");

    assert_eq!(client.name, "Asha Menon");
    assert_eq!(client.input.sec80c_investment, dec!(200000));
    // Old: 920k gross - (50k + 240k HRA + 150k + 50k) = 430k, rebated
    assert_eq!(evaluation.old.taxable_income, dec!(430000));
    assert_eq!(evaluation.old.tax_payable, dec!(0));
    assert_eq!(evaluation.recommended, Regime::Old);
    fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_report_for_saved_client() {
    let dir = scratch_dir("report");
    let config = sqlite_config(&dir);
    let policy = TaxPolicy::default();
    let repo = build_registry().create(&config).await.expect("create store");
    let service = ClientService::new(&*repo, &policy);
    let saved = service
        .save(asha_form().to_new_client().unwrap())
        .await
        .unwrap();

    let path = service
        .write_report(saved.id, &dir.join("reports"))
        .await
        .expect("write report");

    assert_eq!(path, dir.join("reports").join("Asha_Menon_Tax_Report.txt"));
    let text = fs::read_to_string(&path).unwrap();
    // New: 920k - 50k = 870k -> 15,000 + 27,000 = 42,000, plus cess
    assert_eq!(
        text,
        "Income Tax Report - Asha Menon\n\
         \n\
         Taxable Income: ₹430,000.00\n\
         Tax (Old Regime): ₹0.00\n\
         Tax (New Regime): ₹43,680.00\n\
         Better Option: Old Regime\n\
         Savings: ₹43,680.00\n"
    );
    fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_list_and_delete_clients() {
    let dir = scratch_dir("list");
    let config = sqlite_config(&dir);
    let policy = TaxPolicy::default();
    let repo = build_registry().create(&config).await.expect("create store");
    let service = ClientService::new(&*repo, &policy);
    let asha = service
        .save(asha_form().to_new_client().unwrap())
        .await
        .unwrap();
    let ravi_form = ClientForm {
        name: "Ravi Kumar".to_string(),
        basic_salary: "800000".to_string(),
        ..ClientForm::default()
    };
    service.save(ravi_form.to_new_client().unwrap()).await.unwrap();

    service.delete(asha.id).await.expect("delete client");
    let listed = service.list().await.unwrap();

    assert_eq!(listed.len(), 1);
    let (ravi, evaluation) = &listed[0];
    let line = ClientReport::new(&ravi.name, evaluation).summary_line(ravi.id);
    assert!(line.contains("Ravi Kumar"));
    assert!(line.ends_with("-> New Regime"));
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_policy_file_changes_the_result() {
    let policy = load_policy(Some(&fixture_path("fy_2024_25.toml"))).expect("load policy");
    let engine = TaxEngine::new(&policy);
    let input = ClientForm {
        basic_salary: "800000".to_string(),
        ..ClientForm::default()
    }
    .to_input()
    .unwrap();

    let evaluation = engine.evaluate(&input);

    assert_eq!(policy.name, "FY 2024-25");
    // New: 725k taxable -> 5% of 400k + 10% of 25k = 22,500, plus cess
    assert_eq!(evaluation.new.taxable_income, dec!(725000));
    assert_eq!(evaluation.new.tax_payable, dec!(23400));
    // Old: 12,500 + 20% of 225k = 57,500, plus cess
    assert_eq!(evaluation.old.tax_payable, dec!(59800));
}

#[test]
fn test_policy_file_round_trips_through_toml() {
    let policy = load_policy(Some(&fixture_path("fy_2024_25.toml"))).unwrap();

    let reparsed = TaxPolicy::from_toml_str(&policy.to_toml_string().unwrap()).unwrap();

    assert_eq!(reparsed, policy);
}

#[test]
fn test_policy_without_open_bracket_is_rejected() {
    let err = load_policy(Some(&fixture_path("bad_policy.toml"))).unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("bad_policy.toml"), "got: {message}");
}
