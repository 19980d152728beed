use std::io;

use thiserror::Error;
use vacancy_hub_providers::ProviderError;
use vacancy_hub_storage::StoreError;

/// Errors that end a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("unknown job board '{0}': expected hh, sj or all")]
    InvalidProvider(String),
    #[error("'{0}' is not a valid number of vacancies")]
    InvalidCount(String),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
}
