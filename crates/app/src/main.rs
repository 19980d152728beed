mod cli;
mod console;
mod error;
mod report;
mod saved;
mod search;
mod telemetry;

use std::io;

use clap::Parser;
use tracing::{error, info};
use vacancy_hub_storage::VacancyStore;
use vacancy_hub_util::{load_env_file, AppConfig};

use cli::{Cli, Command, SearchArgs};
use console::Console;
use error::CliError;
use search::SearchOutcome;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_env_file();
    let config = AppConfig::from_env()?;
    telemetry::init_tracing(&config)?;

    let cli = Cli::parse();
    if let Err(err) = run(cli, &config).await {
        error!(stage = "app", error = %err, "command failed");
        eprintln!("{err}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli, config: &AppConfig) -> Result<(), CliError> {
    let store_path = cli.store.unwrap_or_else(|| config.store_path.clone());
    let mut store = VacancyStore::open(store_path)?;

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    match cli
        .command
        .unwrap_or_else(|| Command::Search(SearchArgs::default()))
    {
        Command::Search(args) => {
            let outcome = search::run_search(args, config, &mut store, &mut console).await?;
            if let SearchOutcome::Saved {
                shown,
                inserted,
                duplicates,
            } = outcome
            {
                info!(stage = "app", shown, inserted, duplicates, "search finished");
            }
        }
        Command::Saved { min_salary } => {
            saved::list_saved(&store, min_salary, &mut console)?;
        }
        Command::Delete { title } => {
            saved::delete_saved(&mut store, &title, &mut console)?;
        }
    }
    Ok(())
}
