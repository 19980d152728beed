pub mod config;

pub use config::{AppConfig, ConfigError, Environment};

pub const DEFAULT_STORE_PATH: &str = "vacancies.json";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = concat!("vacancy-hub/", env!("CARGO_PKG_VERSION"));

/// Loads environment variables from `.env` when available. A missing file is
/// not an error.
pub fn load_env_file() {
    let _ = dotenvy::dotenv();
}
