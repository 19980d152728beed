use std::io::{BufRead, Write};

use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};
use vacancy_hub_core::{filter_sources, rank_and_truncate, KeywordFilter, Normalizer, ProviderKind};
use vacancy_hub_providers::{build_http_client, HeadHunterClient, ProviderClient, SuperJobClient};
use vacancy_hub_storage::{AddOutcome, VacancyStore};
use vacancy_hub_util::AppConfig;

use crate::{
    cli::{ProviderChoice, SearchArgs},
    console::Console,
    report, CliError,
};

/// How an interactive search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    NoVacancies,
    NoMatches,
    Saved {
        shown: usize,
        inserted: usize,
        duplicates: usize,
    },
}

/// Creates the clients for the chosen boards.
///
/// Fails when a board's credential is missing.
pub fn build_providers(
    choice: ProviderChoice,
    config: &AppConfig,
    http: &Client,
) -> Result<Vec<ProviderClient>, CliError> {
    choice
        .kinds()
        .into_iter()
        .map(|kind| match kind {
            ProviderKind::HeadHunter => Ok(HeadHunterClient::new(
                config.headhunter_base_url.clone(),
                http.clone(),
            )
            .into()),
            ProviderKind::SuperJob => {
                SuperJobClient::from_env(config.superjob_base_url.clone(), http.clone())
                    .map(ProviderClient::from)
                    .map_err(CliError::from)
            }
        })
        .collect()
}

/// Runs fetch, normalize, filter, rank, display and save for one query.
pub async fn run_search<R: BufRead, W: Write>(
    args: SearchArgs,
    config: &AppConfig,
    store: &mut VacancyStore,
    console: &mut Console<R, W>,
) -> Result<SearchOutcome, CliError> {
    let choice: ProviderChoice = console
        .value_or_ask(args.provider, "Choose a job board (hh/sj/all): ")?
        .parse()?;
    let http = build_http_client(config.http_timeout, &config.user_agent)?;
    let providers = build_providers(choice, config, &http)?;

    let query = console.value_or_ask(args.query, "Search query: ")?;
    info!(stage = "search", provider = %choice, %query, "searching vacancies");

    let mut batches = Vec::with_capacity(providers.len());
    for provider in &providers {
        let records = fetch_or_report(provider, &query, console).await?;
        batches.push(Normalizer::normalize_all(Some(provider.kind()), &records));
    }

    if batches.iter().all(Vec::is_empty) {
        console.say("No vacancies found for this query.")?;
        return Ok(SearchOutcome::NoVacancies);
    }

    let keywords = console.value_or_ask(
        args.keywords,
        "Filter keywords, comma separated (leave empty to keep all): ",
    )?;
    let filter = KeywordFilter::parse(&keywords);
    let matched = filter_sources(batches, filter.keywords());

    if matched.is_empty() {
        console.say("No vacancies match the given keywords.")?;
        return Ok(SearchOutcome::NoMatches);
    }

    let top = match args.top {
        Some(top) => top,
        None => parse_count(&console.ask("How many vacancies to show: ")?)?,
    };
    let selected = rank_and_truncate(matched, top);
    report::write_vacancies(console.output(), &selected)?;

    let mut inserted = 0;
    let mut duplicates = 0;
    for vacancy in &selected {
        match store.add(vacancy)? {
            AddOutcome::Inserted => inserted += 1,
            AddOutcome::Duplicate => duplicates += 1,
        }
    }

    console.say(&format!(
        "Saved {inserted} new vacancies to {} ({duplicates} already stored).",
        store.path().display()
    ))?;
    Ok(SearchOutcome::Saved {
        shown: selected.len(),
        inserted,
        duplicates,
    })
}

/// Fetches from one board; failures are reported and count as no results.
async fn fetch_or_report<R: BufRead, W: Write>(
    provider: &ProviderClient,
    query: &str,
    console: &mut Console<R, W>,
) -> Result<Vec<Value>, CliError> {
    match provider.fetch_vacancies(query).await {
        Ok(records) => Ok(records),
        Err(err) => {
            warn!(
                stage = "search",
                provider = %provider.kind(),
                error = %err,
                "provider request failed"
            );
            console.say(&format!(
                "{} is unavailable: {err}",
                provider.kind().display_name()
            ))?;
            Ok(Vec::new())
        }
    }
}

fn parse_count(value: &str) -> Result<i64, CliError> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::InvalidCount(value.to_string()))
}
