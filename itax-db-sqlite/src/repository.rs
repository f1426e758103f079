use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use itax_core::{ClientRecord, ClientRepository, NewClientRecord, RepositoryError, TaxpayerInput};
use sqlx::{
    Row,
    sqlite::{SqliteConnectOptions, SqlitePool},
};
use tracing::{debug, info};

use crate::decimal::{decimal_to_text, get_decimal};

const SELECT_CLIENT: &str = "SELECT id, name, basic, hra, rent, other, capital, other_income,
        sec80c, sec80ccd, metro, created_at
 FROM clients";

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Opens `database_url`, creating the file if it does not exist.
    ///
    /// Accepts a bare path (`clients.db`), a sqlx URL
    /// (`sqlite:clients.db?mode=rwc`) or `:memory:`.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {}", database_url))?
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        debug!(database_url, "opened sqlite pool");
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn db_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

fn row_to_client(row: &sqlx::sqlite::SqliteRow) -> Result<ClientRecord, RepositoryError> {
    let metro: i64 = row.try_get("metro").map_err(db_err)?;

    Ok(ClientRecord {
        id: row.try_get("id").map_err(db_err)?,
        name: row.try_get("name").map_err(db_err)?,
        input: TaxpayerInput {
            basic_salary: get_decimal(row, "basic")?,
            hra_received: get_decimal(row, "hra")?,
            rent_paid: get_decimal(row, "rent")?,
            other_allowances: get_decimal(row, "other")?,
            capital_gains: get_decimal(row, "capital")?,
            other_income: get_decimal(row, "other_income")?,
            sec80c_investment: get_decimal(row, "sec80c")?,
            sec80ccd_contribution: get_decimal(row, "sec80ccd")?,
            metro: metro != 0,
        },
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get created_at: {}", e)))?,
    })
}

#[async_trait]
impl ClientRepository for SqliteRepository {
    async fn save(
        &self,
        client: NewClientRecord,
    ) -> Result<ClientRecord, RepositoryError> {
        let input = &client.input;

        let result = sqlx::query(
            "INSERT INTO clients (
                name, basic, hra, rent, other, capital, other_income,
                sec80c, sec80ccd, metro, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&client.name)
        .bind(decimal_to_text(input.basic_salary))
        .bind(decimal_to_text(input.hra_received))
        .bind(decimal_to_text(input.rent_paid))
        .bind(decimal_to_text(input.other_allowances))
        .bind(decimal_to_text(input.capital_gains))
        .bind(decimal_to_text(input.other_income))
        .bind(decimal_to_text(input.sec80c_investment))
        .bind(decimal_to_text(input.sec80ccd_contribution))
        .bind(input.metro)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        let id = result.last_insert_rowid();
        info!(id, name = %client.name, "saved client");
        self.get(id).await
    }

    async fn list(&self) -> Result<Vec<ClientRecord>, RepositoryError> {
        let rows = sqlx::query(&format!("{} ORDER BY id", SELECT_CLIENT))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.iter().map(row_to_client).collect()
    }

    async fn get(
        &self,
        id: i64,
    ) -> Result<ClientRecord, RepositoryError> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_CLIENT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?
            .ok_or(RepositoryError::NotFound)?;

        row_to_client(&row)
    }

    async fn delete(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!(id, "deleted client");
        Ok(())
    }
}
