use std::{env, fmt, path::PathBuf, time::Duration};

use url::Url;

use crate::{DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_STORE_PATH, DEFAULT_USER_AGENT};

pub const DEFAULT_HEADHUNTER_BASE_URL: &str = "https://api.hh.ru/";
pub const DEFAULT_SUPERJOB_BASE_URL: &str = "https://api.superjob.ru/2.0/";

/// Application runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    fn from_str(value: &str) -> Result<Self, ConfigError> {
        match value {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }

    /// Returns the canonical name used for logging labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}

/// Runtime configuration resolved from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub store_path: PathBuf,
    pub http_timeout: Duration,
    pub user_agent: String,
    pub headhunter_base_url: Url,
    pub superjob_base_url: Url,
}

impl AppConfig {
    /// Constructs the configuration by reading and validating environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_value = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let environment = Environment::from_str(&env_value)?;

        let store_path = env::var("VACANCY_STORE_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));

        let http_timeout = match env::var("HTTP_TIMEOUT_SECS") {
            Ok(value) => parse_timeout(&value)?,
            Err(_) => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        let user_agent =
            env::var("HTTP_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        Ok(Self {
            environment,
            store_path,
            http_timeout,
            user_agent,
            headhunter_base_url: base_url("HH_API_BASE_URL", DEFAULT_HEADHUNTER_BASE_URL)?,
            superjob_base_url: base_url("SUPERJOB_API_BASE_URL", DEFAULT_SUPERJOB_BASE_URL)?,
        })
    }
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(value.to_string())),
    }
}

/// Reads a base URL, appending the trailing slash relative joins rely on.
fn base_url(variable: &'static str, default: &str) -> Result<Url, ConfigError> {
    let mut value = env::var(variable).unwrap_or_else(|_| default.to_string());
    if !value.ends_with('/') {
        value.push('/');
    }
    Url::parse(&value).map_err(|source| ConfigError::InvalidUrl { variable, source })
}

/// Errors that can occur during configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    InvalidEnvironment(String),
    InvalidTimeout(String),
    InvalidUrl {
        variable: &'static str,
        source: url::ParseError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnvironment(value) => write!(
                f,
                "APP_ENV must be one of 'development', 'production', or 'test' (got {value})"
            ),
            Self::InvalidTimeout(value) => write!(
                f,
                "HTTP_TIMEOUT_SECS must be a positive number of seconds (got {value})"
            ),
            Self::InvalidUrl { variable, source } => {
                write!(f, "invalid {variable} value: {source}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{LazyLock, Mutex};

    static ENV_GUARD: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

    const VARS: &[&str] = &[
        "APP_ENV",
        "VACANCY_STORE_PATH",
        "HTTP_TIMEOUT_SECS",
        "HTTP_USER_AGENT",
        "HH_API_BASE_URL",
        "SUPERJOB_API_BASE_URL",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn loads_defaults_in_development() {
        let _guard = ENV_GUARD.lock().expect("env guard poisoned");
        clear_env();

        let config = AppConfig::from_env().expect("config should load with defaults");
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.store_path, PathBuf::from(DEFAULT_STORE_PATH));
        assert_eq!(config.http_timeout, Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));
        assert_eq!(config.headhunter_base_url.as_str(), DEFAULT_HEADHUNTER_BASE_URL);
        assert_eq!(config.superjob_base_url.as_str(), DEFAULT_SUPERJOB_BASE_URL);
        assert!(config.user_agent.starts_with("vacancy-hub/"));
    }

    #[test]
    fn rejects_invalid_environment() {
        let _guard = ENV_GUARD.lock().expect("env guard poisoned");
        clear_env();
        env::set_var("APP_ENV", "invalid");

        let err = AppConfig::from_env().expect_err("invalid env should error");
        assert!(matches!(err, ConfigError::InvalidEnvironment(value) if value == "invalid"));

        clear_env();
    }

    #[test]
    fn reads_overrides_from_env() {
        let _guard = ENV_GUARD.lock().expect("env guard poisoned");
        clear_env();
        env::set_var("APP_ENV", "production");
        env::set_var("VACANCY_STORE_PATH", "/tmp/saved.json");
        env::set_var("HTTP_TIMEOUT_SECS", "3");
        env::set_var("HH_API_BASE_URL", "http://localhost:9000/hh");

        let config = AppConfig::from_env().expect("config should load");
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.store_path, PathBuf::from("/tmp/saved.json"));
        assert_eq!(config.http_timeout, Duration::from_secs(3));
        assert_eq!(config.headhunter_base_url.as_str(), "http://localhost:9000/hh/");

        clear_env();
    }

    #[test]
    fn rejects_bad_timeout_and_url() {
        let _guard = ENV_GUARD.lock().expect("env guard poisoned");
        clear_env();

        env::set_var("HTTP_TIMEOUT_SECS", "0");
        let err = AppConfig::from_env().expect_err("zero timeout should error");
        assert!(matches!(err, ConfigError::InvalidTimeout(_)));
        env::remove_var("HTTP_TIMEOUT_SECS");

        env::set_var("SUPERJOB_API_BASE_URL", "not a url");
        let err = AppConfig::from_env().expect_err("bad url should error");
        assert!(matches!(
            err,
            ConfigError::InvalidUrl { variable: "SUPERJOB_API_BASE_URL", .. }
        ));

        clear_env();
    }
}
