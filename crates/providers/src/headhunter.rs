use reqwest::Client;
use serde_json::Value;
use url::Url;
use vacancy_hub_core::ProviderKind;

use crate::{fetch_items, or_empty, ProviderError};

/// Client for the public HeadHunter vacancy search.
#[derive(Clone)]
pub struct HeadHunterClient {
    http: Client,
    base_url: Url,
}

impl HeadHunterClient {
    pub fn new(base_url: Url, http: Client) -> Self {
        Self { http, base_url }
    }

    /// Searches vacancies by free text. Records are taken from `items`.
    pub async fn fetch_vacancies(&self, query: &str) -> Result<Vec<Value>, ProviderError> {
        let mut url = self.base_url.join("vacancies")?;
        url.query_pairs_mut().append_pair("text", query);

        fetch_items(ProviderKind::HeadHunter, self.http.get(url), "items").await
    }

    pub async fn get_vacancies(&self, query: &str) -> Vec<Value> {
        or_empty(ProviderKind::HeadHunter, self.fetch_vacancies(query).await)
    }
}
