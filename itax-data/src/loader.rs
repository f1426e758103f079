use std::io::Read;

use itax_core::{ClientRepository, NewClientRecord, RepositoryError, TaxpayerInput};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when importing client records.
#[derive(Debug, Error)]
pub enum ClientImportError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid row at line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for ClientImportError {
    fn from(err: csv::Error) -> Self {
        ClientImportError::CsvParse(err.to_string())
    }
}

/// A single row from a client CSV file.
///
/// Columns:
/// - `name`: client name (required)
/// - `basic`, `hra`, `rent`, `other`, `capital`, `other_income`: yearly
///   amounts in rupees
/// - `sec80c`, `sec80ccd`: declared investments before caps
/// - `metro`: `yes`/`no`, `true`/`false` or `1`/`0`
///
/// Empty cells and missing amount columns read as zero. Amounts may carry
/// thousands separators when quoted (`"1,20,000"`).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClientCsvRecord {
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub basic: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub hra: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub rent: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub other: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub capital: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub other_income: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub sec80c: Decimal,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub sec80ccd: Decimal,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub metro: bool,
}

impl ClientCsvRecord {
    fn amounts(&self) -> [(&'static str, Decimal); 8] {
        [
            ("basic", self.basic),
            ("hra", self.hra),
            ("rent", self.rent),
            ("other", self.other),
            ("capital", self.capital),
            ("other_income", self.other_income),
            ("sec80c", self.sec80c),
            ("sec80ccd", self.sec80ccd),
        ]
    }

    pub fn into_new_client(self) -> NewClientRecord {
        NewClientRecord {
            name: self.name.trim().to_string(),
            input: TaxpayerInput {
                basic_salary: self.basic,
                hra_received: self.hra,
                rent_paid: self.rent,
                other_allowances: self.other,
                capital_gains: self.capital,
                other_income: self.other_income,
                sec80c_investment: self.sec80c,
                sec80ccd_contribution: self.sec80ccd,
                metro: self.metro,
            },
        }
    }
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(Decimal::ZERO),
        Some(s) => s
            .trim()
            .replace(',', "")
            .parse::<Decimal>()
            .map_err(|e| serde::de::Error::custom(format!("invalid amount '{}': {}", s.trim(), e))),
        None => Ok(Decimal::ZERO),
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    let Some(s) = s else {
        return Ok(false);
    };
    match s.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "n" | "no" | "false" => Ok(false),
        "1" | "y" | "yes" | "true" => Ok(true),
        other => Err(serde::de::Error::custom(format!(
            "invalid metro flag '{}'",
            other
        ))),
    }
}

/// Importer for client records from CSV files.
///
/// Parsing and loading are split so a caller can inspect or filter the
/// parsed rows before anything is written. Loading goes through the
/// `ClientRepository` trait and works with any backend.
pub struct ClientImporter;

impl ClientImporter {
    /// Parse client records from a CSV reader.
    ///
    /// Rows with an empty name or a negative amount are rejected with the
    /// line they came from.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<ClientCsvRecord>, ClientImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut records = Vec::new();

        for result in csv_reader.records() {
            let raw = result?;
            // quoted fields may span lines, so take the line the row starts on
            let line = raw.position().map(|p| p.line()).unwrap_or_default();
            let record: ClientCsvRecord = raw.deserialize(Some(&headers))?;

            if record.name.trim().is_empty() {
                return Err(ClientImportError::InvalidRow {
                    line,
                    reason: "name is empty".to_string(),
                });
            }
            if let Some((column, value)) = record
                .amounts()
                .into_iter()
                .find(|(_, value)| value.is_sign_negative() && !value.is_zero())
            {
                return Err(ClientImportError::InvalidRow {
                    line,
                    reason: format!("{} is negative ({})", column, value),
                });
            }

            records.push(record);
        }

        debug!(count = records.len(), "parsed client rows");
        Ok(records)
    }

    /// Save every record as a new client. Returns the number saved.
    ///
    /// Import is append-only; loading the same file twice creates two sets
    /// of clients.
    pub async fn load<R: ClientRepository + ?Sized>(
        repo: &R,
        records: &[ClientCsvRecord],
    ) -> Result<usize, ClientImportError> {
        let mut inserted = 0;

        for record in records {
            let saved = repo.save(record.clone().into_new_client()).await?;
            debug!(id = saved.id, name = %saved.name, "imported client");
            inserted += 1;
        }

        info!(inserted, "client import complete");
        Ok(inserted)
    }
}
