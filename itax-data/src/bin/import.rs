use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use itax_data::ClientImporter;
use itax_db_sqlite::SqliteRepository;

/// Import client records from a CSV file into the client database.
///
/// The CSV file should have a header row with these columns:
/// name, basic, hra, rent, other, capital, other_income, sec80c, sec80ccd, metro
///
/// Only `name` is required; empty or missing amount columns count as zero.
#[derive(Parser, Debug)]
#[command(name = "itax-import")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing client records
    #[arg(short, long)]
    file: PathBuf,

    /// SQLite database path or URL (created if missing)
    #[arg(short, long, default_value = itax_db_sqlite::DEFAULT_DATABASE)]
    database: String,

    /// Parse and validate the file without writing anything
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    println!("Reading clients from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = ClientImporter::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} records from CSV", records.len());

    if args.dry_run {
        println!("Dry run, nothing written.");
        return Ok(());
    }

    let repo = SqliteRepository::new(&args.database)
        .await
        .with_context(|| format!("Failed to connect to database: {}", args.database))?;
    repo.run_migrations()
        .await
        .context("Failed to run migrations")?;

    let inserted = ClientImporter::load(&repo, &records)
        .await
        .context("Failed to load clients into database")?;

    println!("Successfully imported {} clients into the database.", inserted);

    Ok(())
}
