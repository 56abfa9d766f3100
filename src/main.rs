use cart_compare::commands::{Command, CommandError, handle_command};
use cart_compare::config::load_or_default;
use cart_compare::seed::seed_entries;
use cart_compare::storage::SqliteStorage;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "cart-compare")]
#[command(about = "Track grocery prices across stores and find the cheapest per unit", long_about = None)]
struct Cli {
    /// Path to the JSON config file
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    // Initialize logging; output goes to stderr, command results to stdout
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, CommandError> {
    let config = load_or_default(&cli.config)?;
    let storage = SqliteStorage::new(&config.db_path)?;

    if config.seed_demo_data {
        let added = storage.merge_entries(&seed_entries())?;
        if added > 0 {
            info!("Seeded {} demo entries", added);
        }
    }

    handle_command(cli.command, &storage, &config)
}
