use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

use accounter::cli::{
    handle_categories_command, handle_export_command, handle_stats_command,
    handle_transaction_command, ExportFormat, FilterArgs, StatsCommands, TransactionCommands,
};
use accounter::config::{paths::AccounterPaths, settings::Settings};
use accounter::models::Transaction;
use accounter::storage::{write_json_atomic, Storage};
use accounter::AccounterResult;

/// Environment variable holding a log filter, e.g. `debug` or `accounter=trace`
const LOG_ENV: &str = "ACCOUNTER_LOG";

#[derive(Parser)]
#[command(
    name = "accounter",
    version,
    about = "Terminal-based personal income and expense tracker",
    long_about = "Accounter records income and expense transactions, lists them \
                  with filters and pagination, and summarizes them by category \
                  or by week, month and year."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Transaction(TransactionCommands),

    /// Category and period statistics
    #[command(subcommand)]
    Stats(StatsCommands),

    /// Show the category table
    Categories,

    /// Export transactions
    Export {
        /// Output format
        #[arg(value_enum)]
        format: ExportFormat,

        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = AccounterPaths::new().context("Failed to resolve the data directory")?;
    let settings = Settings::load_or_create(&paths).context("Failed to load settings")?;

    init_tracing(&settings);

    if let Err(e) = run(cli.command, paths, &settings) {
        error!(error = %e, "command failed");
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Option<Commands>, paths: AccounterPaths, settings: &Settings) -> AccounterResult<()> {
    match command {
        Some(Commands::Transaction(cmd)) => {
            let storage = Storage::open(paths, settings)?;
            handle_transaction_command(&storage.transactions, settings, cmd)?;
        }
        Some(Commands::Stats(cmd)) => {
            let storage = Storage::open(paths, settings)?;
            handle_stats_command(&storage.transactions, settings, cmd)?;
        }
        Some(Commands::Categories) => handle_categories_command(),
        Some(Commands::Export {
            format,
            output,
            filter,
        }) => {
            let storage = Storage::open(paths, settings)?;
            handle_export_command(&storage.transactions, settings, format, output, filter)?;
        }
        Some(Commands::Init) => {
            println!("Initializing Accounter at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;

            let transactions_file = paths.transactions_file(settings);
            if !transactions_file.exists() {
                write_json_atomic(&transactions_file, &Vec::<Transaction>::new())?;
            }

            println!("Initialization complete!");
            println!();
            println!("Run 'accounter categories' to see the category table.");
            println!("Run 'accounter add expense food 12.50' to record a transaction.");
        }
        Some(Commands::Config) => {
            println!("Accounter Configuration");
            println!("=======================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Data directory:    {}", paths.data_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!(
                "Transactions file: {}",
                paths.transactions_file(settings).display()
            );
            println!("Initialized:       {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Default user:      {}", settings.default_user_id);
            println!("  Default page size: {}", settings.default_page_size);
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Log level:         {}", settings.log_level);
        }
        None => {
            println!("Accounter - personal income and expense tracker");
            println!();
            println!("Run 'accounter --help' for usage information.");
        }
    }

    Ok(())
}
