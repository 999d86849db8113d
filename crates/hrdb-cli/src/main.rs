//! HRDB CLI
//!
//! Command-line interface for the HR database

use clap::{Parser, Subcommand};
use hrdb_core::logging_facility::{init, Profile};
use hrdb_store::{DatabaseLocation, HrStore, StoreConfig};

mod commands;

use commands::Session;

/// Environment variable selecting the log format (`json` for structured logs)
const ENV_LOG_FORMAT: &str = "HRDB_LOG_FORMAT";

#[derive(Debug, Parser)]
#[command(name = "hrdb")]
#[command(about = "HRDB - Departments, employees and reviews in SQLite", long_about = None)]
struct Cli {
    /// Database file, or `:memory:` (overrides HRDB_DATABASE)
    #[arg(long, global = true)]
    db: Option<String>,

    /// Print records as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the tables if they do not exist
    Init,
    /// Drop and recreate every table
    Reset,
    /// Department operations
    Department(commands::department::DepartmentArgs),
    /// Employee operations
    Employee(commands::employee::EmployeeArgs),
    /// Review operations
    Review(commands::review::ReviewArgs),
}

fn main() {
    dotenvy::dotenv().ok();
    let format = std::env::var(ENV_LOG_FORMAT).unwrap_or_default();
    init(Profile::from_format(&format));

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> commands::CommandResult {
    let mut config = StoreConfig::from_env()?;
    if let Some(db) = &cli.db {
        config.location = DatabaseLocation::parse(db);
    }
    tracing::debug!(location = ?config.location, "resolved store config");

    let mut session = Session {
        store: HrStore::open(&config)?,
        json: cli.json,
    };

    match cli.command {
        Commands::Init => commands::schema::execute_init(&mut session, &config.location),
        Commands::Reset => commands::schema::execute_reset(&mut session, &config.location),
        Commands::Department(args) => commands::department::execute(&mut session, args),
        Commands::Employee(args) => commands::employee::execute(&mut session, args),
        Commands::Review(args) => commands::review::execute(&mut session, args),
    }
}
