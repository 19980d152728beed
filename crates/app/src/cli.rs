use std::{fmt, path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand};
use vacancy_hub_core::ProviderKind;

use crate::CliError;

#[derive(Debug, Parser)]
#[command(name = "vacancy-hub", version)]
#[command(about = "Search job boards, rank vacancies by salary and keep the best ones")]
pub struct Cli {
    /// JSON file holding saved vacancies (overrides VACANCY_STORE_PATH)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search a job board and save the top vacancies (default)
    Search(SearchArgs),
    /// List saved vacancies
    Saved {
        /// Only show vacancies whose average salary is at least this value
        #[arg(long, default_value_t = 0.0)]
        min_salary: f64,
    },
    /// Remove saved vacancies with the given title
    Delete { title: String },
}

/// Search inputs; anything left out is asked for interactively.
#[derive(Debug, Clone, Default, Args)]
pub struct SearchArgs {
    /// Job board: hh, sj or all
    #[arg(long)]
    pub provider: Option<String>,
    /// Free text search query
    #[arg(long)]
    pub query: Option<String>,
    /// Comma separated filter keywords
    #[arg(long)]
    pub keywords: Option<String>,
    /// Number of vacancies to show and save
    #[arg(long, allow_negative_numbers = true)]
    pub top: Option<i64>,
}

/// Job boards selectable for a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderChoice {
    Single(ProviderKind),
    All,
}

impl ProviderChoice {
    pub fn kinds(self) -> Vec<ProviderKind> {
        match self {
            Self::Single(kind) => vec![kind],
            Self::All => vec![ProviderKind::HeadHunter, ProviderKind::SuperJob],
        }
    }
}

impl FromStr for ProviderChoice {
    type Err = CliError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "hh" => Ok(Self::Single(ProviderKind::HeadHunter)),
            "sj" => Ok(Self::Single(ProviderKind::SuperJob)),
            "all" => Ok(Self::All),
            other => Err(CliError::InvalidProvider(other.to_string())),
        }
    }
}

impl fmt::Display for ProviderChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(kind) => write!(f, "{kind}"),
            Self::All => f.write_str("all"),
        }
    }
}
