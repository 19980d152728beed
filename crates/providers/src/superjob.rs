use std::env;

use reqwest::Client;
use serde_json::Value;
use url::Url;
use vacancy_hub_core::ProviderKind;

use crate::{fetch_items, or_empty, ProviderError};

/// Environment variable holding the SuperJob application key.
pub const SUPERJOB_API_KEY_ENV: &str = "API_SUPERJOB";

/// Client for the SuperJob vacancy search. Requires an application key.
#[derive(Clone)]
pub struct SuperJobClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl SuperJobClient {
    pub fn new(api_key: impl Into<String>, base_url: Url, http: Client) -> Self {
        Self {
            http,
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Creates the client with the key read from [`SUPERJOB_API_KEY_ENV`].
    ///
    /// A missing or blank key is an error here rather than at request time.
    pub fn from_env(base_url: Url, http: Client) -> Result<Self, ProviderError> {
        let api_key = env::var(SUPERJOB_API_KEY_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or(ProviderError::MissingCredential {
                provider: ProviderKind::SuperJob,
                variable: SUPERJOB_API_KEY_ENV,
            })?;
        Ok(Self::new(api_key, base_url, http))
    }

    /// Searches by keyword with the default ordering.
    pub async fn fetch_vacancies(&self, query: &str) -> Result<Vec<Value>, ProviderError> {
        self.search(&SuperJobSearch::new(query)).await
    }

    /// Runs a search with explicit ordering and payment bounds. Records are
    /// taken from `objects`.
    pub async fn search(&self, params: &SuperJobSearch<'_>) -> Result<Vec<Value>, ProviderError> {
        let mut url = self.base_url.join("vacancies/")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("keyword", params.keyword);
            query.append_pair("order_field", params.order_field);
            query.append_pair("order_direction", params.order_direction);
            if let Some(payment_from) = params.payment_from {
                query.append_pair("payment_from", &payment_from.to_string());
            }
            if let Some(payment_to) = params.payment_to {
                query.append_pair("payment_to", &payment_to.to_string());
            }
        }

        let request = self.http.get(url).header("X-Api-App-Id", &self.api_key);
        fetch_items(ProviderKind::SuperJob, request, "objects").await
    }

    pub async fn get_vacancies(&self, query: &str) -> Vec<Value> {
        or_empty(ProviderKind::SuperJob, self.fetch_vacancies(query).await)
    }
}

/// Query parameters for a SuperJob search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuperJobSearch<'a> {
    pub keyword: &'a str,
    pub order_field: &'a str,
    pub order_direction: &'a str,
    pub payment_from: Option<i64>,
    pub payment_to: Option<i64>,
}

impl<'a> SuperJobSearch<'a> {
    pub fn new(keyword: &'a str) -> Self {
        Self {
            keyword,
            order_field: "payment",
            order_direction: "asc",
            payment_from: None,
            payment_to: None,
        }
    }

    pub fn payment_between(mut self, from: Option<i64>, to: Option<i64>) -> Self {
        self.payment_from = from;
        self.payment_to = to;
        self
    }
}
