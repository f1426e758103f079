use std::path::PathBuf;

use anyhow::bail;
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use itax_cli::{ClientForm, ClientReport, ClientService, app, logging, report::render_breakdown};
use itax_core::{Regime, TaxEngine};
use itax_core::db::DbConfig;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Indian income tax calculator comparing the Old and New regimes.
///
/// Evaluates one-off inputs or saved clients, writes text reports and
/// manages the client store.
#[derive(Debug, Parser)]
#[command(name = "itax", version)]
struct Cli {
    /// Database backend to use.
    #[arg(long, global = true, default_value = "sqlite")]
    backend: String,

    /// Database connection string.
    /// For SQLite this is a file path (e.g. `clients.db`) or `:memory:`.
    #[arg(long, global = true, default_value = itax_db_sqlite::DEFAULT_DATABASE)]
    db: String,

    /// TOML policy file overriding the built-in FY 2023-24 figures.
    #[arg(long, global = true)]
    policy: Option<PathBuf>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// More log output (-v debug, -vv trace). Ignored when RUST_LOG is set.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare both regimes for the given amounts.
    Evaluate(EvaluateArgs),

    /// Manage saved clients.
    Clients {
        #[command(subcommand)]
        command: ClientsCommand,
    },

    /// Write the text report for a saved client.
    Report {
        id: i64,

        /// Directory for `<name>_Tax_Report.txt`; prints to stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the active tax policy as TOML.
    Policy,
}

#[derive(Debug, Subcommand)]
enum ClientsCommand {
    /// List saved clients with both taxes and the better regime.
    List {
        /// Only clients better off under this regime (`old` or `new`).
        #[arg(long, value_parser = app::parse_regime)]
        regime: Option<Regime>,
    },
    /// Show the full breakdown for one client.
    Show { id: i64 },
    /// Delete a client.
    Delete { id: i64 },
}

/// Amounts are taken as text so `12,00,000` style input works.
#[derive(Debug, Args)]
struct EvaluateArgs {
    /// Client name, required with --save.
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    basic: String,
    #[arg(long, default_value = "")]
    hra: String,
    #[arg(long, default_value = "")]
    rent: String,
    /// Other allowances.
    #[arg(long, default_value = "")]
    other: String,
    #[arg(long, default_value = "")]
    capital: String,
    #[arg(long, default_value = "")]
    other_income: String,
    /// Section 80C investments before the cap.
    #[arg(long, default_value = "")]
    sec80c: String,
    /// Section 80CCD(1B) contribution before the cap.
    #[arg(long, default_value = "")]
    sec80ccd: String,
    /// Rent is paid in a metro city.
    #[arg(long)]
    metro: bool,
    /// Save the client after evaluating.
    #[arg(long)]
    save: bool,
    /// Also write a text report into this directory.
    #[arg(long)]
    report: Option<PathBuf>,
}

impl From<&EvaluateArgs> for ClientForm {
    fn from(args: &EvaluateArgs) -> Self {
        ClientForm {
            name: args.name.clone(),
            basic_salary: args.basic.clone(),
            hra_received: args.hra.clone(),
            rent_paid: args.rent.clone(),
            other_allowances: args.other.clone(),
            capital_gains: args.capital.clone(),
            other_income: args.other_income.clone(),
            sec80c_investment: args.sec80c.clone(),
            sec80ccd_contribution: args.sec80ccd.clone(),
            metro: args.metro,
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.log_file.as_deref())?;

    let policy = app::load_policy(cli.policy.as_deref())?;

    let db_config = DbConfig {
        backend: cli.backend,
        connection_string: cli.db,
    };
    let registry = app::build_registry();

    match cli.command {
        Command::Policy => {
            print!("{}", policy.to_toml_string()?);
        }
        Command::Evaluate(args) => {
            let form = ClientForm::from(&args);
            if let Err(errors) = form.validate_for_submit(args.save) {
                for error in &errors {
                    eprintln!("Invalid Input: {error}");
                }
                bail!("{} invalid field(s)", errors.len());
            }

            let input = form.to_input()?;
            let engine = TaxEngine::new(&policy);
            let evaluation = engine.evaluate(&input);
            print!("{}", render_breakdown(&evaluation));

            if args.save {
                debug!("connecting to {} backend", db_config.backend);
                let repo = registry.create(&db_config).await?;
                let service = ClientService::new(&*repo, &policy);
                let saved = service.save(form.to_new_client()?).await?;
                println!("Saved client {} ({})", saved.id, saved.name);
            }

            if let Some(dir) = &args.report {
                let path = ClientReport::new(&args.name, &evaluation).write_to(dir)?;
                println!("Report written to {}", path.display());
            }
        }
        Command::Clients { command } => {
            debug!("connecting to {} backend", db_config.backend);
            let repo = registry.create(&db_config).await?;
            let service = ClientService::new(&*repo, &policy);

            match command {
                ClientsCommand::List { regime } => {
                    let clients = service.list_recommending(regime).await?;
                    if clients.is_empty() {
                        println!("No saved clients.");
                    }
                    for (client, evaluation) in &clients {
                        println!(
                            "{}",
                            ClientReport::new(&client.name, evaluation).summary_line(client.id)
                        );
                    }
                }
                ClientsCommand::Show { id } => {
                    let (client, evaluation) = service.show(id).await?;
                    println!("Client {} saved {}", client.id, client.created_at.format("%Y-%m-%d"));
                    print!("{}", ClientForm::from(&client.input).with_name(&client.name));
                    println!();
                    print!("{}", render_breakdown(&evaluation));
                }
                ClientsCommand::Delete { id } => {
                    service.delete(id).await?;
                    println!("Deleted client {id}");
                }
            }
        }
        Command::Report { id, out } => {
            let repo = registry.create(&db_config).await?;
            let service = ClientService::new(&*repo, &policy);

            match out {
                Some(dir) => {
                    let path = service.write_report(id, &dir).await?;
                    println!("Report written to {}", path.display());
                }
                None => {
                    let (client, evaluation) = service.show(id).await?;
                    print!("{}", ClientReport::new(&client.name, &evaluation));
                }
            }
        }
    }

    debug!("done");
    Ok(())
}
