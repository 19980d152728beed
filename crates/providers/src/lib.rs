//! HTTP clients for the supported job boards.
//!
//! Each client issues a single GET per search and returns the raw JSON
//! records. [`ProviderClient::fetch_vacancies`] reports failures as
//! [`ProviderError`]; [`ProviderClient::get_vacancies`] logs them and returns an
//! empty list instead.

pub mod headhunter;
pub mod superjob;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use vacancy_hub_core::ProviderKind;

pub use headhunter::HeadHunterClient;
pub use superjob::{SuperJobClient, SuperJobSearch, SUPERJOB_API_KEY_ENV};

/// Errors produced by provider clients.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{} credential is missing: set {variable}", provider.display_name())]
    MissingCredential {
        provider: ProviderKind,
        variable: &'static str,
    },
    #[error("failed to build url: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Builds the shared HTTP client with a request timeout.
pub fn build_http_client(timeout: Duration, user_agent: &str) -> Result<Client, ProviderError> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()?)
}

/// Any of the supported job board clients.
#[derive(Clone)]
pub enum ProviderClient {
    HeadHunter(HeadHunterClient),
    SuperJob(SuperJobClient),
}

impl ProviderClient {
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::HeadHunter(_) => ProviderKind::HeadHunter,
            Self::SuperJob(_) => ProviderKind::SuperJob,
        }
    }

    /// Runs one search and returns the raw records.
    pub async fn fetch_vacancies(&self, query: &str) -> Result<Vec<Value>, ProviderError> {
        match self {
            Self::HeadHunter(client) => client.fetch_vacancies(query).await,
            Self::SuperJob(client) => client.fetch_vacancies(query).await,
        }
    }

    /// Runs one search, degrading any failure to an empty list.
    pub async fn get_vacancies(&self, query: &str) -> Vec<Value> {
        or_empty(self.kind(), self.fetch_vacancies(query).await)
    }
}

impl From<HeadHunterClient> for ProviderClient {
    fn from(client: HeadHunterClient) -> Self {
        Self::HeadHunter(client)
    }
}

impl From<SuperJobClient> for ProviderClient {
    fn from(client: SuperJobClient) -> Self {
        Self::SuperJob(client)
    }
}

pub(crate) fn or_empty(
    provider: ProviderKind,
    result: Result<Vec<Value>, ProviderError>,
) -> Vec<Value> {
    match result {
        Ok(items) => items,
        Err(err) => {
            warn!(
                stage = "provider",
                provider = %provider,
                error = %err,
                "provider request failed"
            );
            Vec::new()
        }
    }
}

/// Sends the request and extracts the record array stored under `key`.
///
/// A body without that array is treated as zero results.
pub(crate) async fn fetch_items(
    provider: ProviderKind,
    request: RequestBuilder,
    key: &str,
) -> Result<Vec<Value>, ProviderError> {
    let response = request.send().await?;
    let body: Value = parse_json(response).await?;

    let items = match body {
        Value::Object(mut fields) => match fields.remove(key) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };
    debug!(
        stage = "provider",
        provider = %provider,
        count = items.len(),
        "vacancies fetched"
    );
    Ok(items)
}

async fn parse_json(response: Response) -> Result<Value, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<unavailable>"));
        return Err(ProviderError::Status { status, body });
    }

    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use url::Url;

    fn headhunter(server: &MockServer) -> ProviderClient {
        let base = Url::parse(&server.url("/")).expect("url");
        HeadHunterClient::new(base, Client::new()).into()
    }

    #[tokio::test]
    async fn server_error_degrades_to_empty_list() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/vacancies");
                then.status(503).body("maintenance");
            })
            .await;

        let client = headhunter(&server);
        let err = client
            .fetch_vacancies("rust")
            .await
            .expect_err("should error");
        assert!(matches!(
            err,
            ProviderError::Status { status, .. } if status == StatusCode::SERVICE_UNAVAILABLE
        ));

        assert!(client.get_vacancies("rust").await.is_empty());
    }

    #[tokio::test]
    async fn transport_failure_degrades_to_empty_list() {
        let base = Url::parse("http://127.0.0.1:1/").expect("url");
        let client: ProviderClient = HeadHunterClient::new(base, Client::new()).into();

        let err = client
            .fetch_vacancies("rust")
            .await
            .expect_err("connection should fail");
        assert!(matches!(err, ProviderError::Http(_)));
        assert!(client.get_vacancies("rust").await.is_empty());
    }

    #[tokio::test]
    async fn body_without_items_is_zero_results() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/vacancies");
                then.status(200).json_body(json!({ "found": 0 }));
            })
            .await;

        let items = headhunter(&server)
            .fetch_vacancies("rust")
            .await
            .expect("fetch");
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn invalid_json_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/vacancies");
                then.status(200).body("<html>");
            })
            .await;

        let client = headhunter(&server);
        assert!(client.fetch_vacancies("rust").await.is_err());
        assert!(client.get_vacancies("rust").await.is_empty());
    }

    #[test]
    fn http_client_builds_with_timeout() {
        build_http_client(Duration::from_secs(5), "vacancy-hub/test").expect("client");
    }
}
