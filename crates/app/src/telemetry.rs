use std::{io, sync::OnceLock};

use thiserror::Error;
use tracing_subscriber::{
    fmt::{self as tracing_fmt, time::UtcTime},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter, Layer,
};

use vacancy_hub_util::{AppConfig, Environment};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to initialize tracing: {0}")]
    Tracing(#[from] TryInitError),
}

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Logs go to stderr; stdout is reserved for the vacancy report.
const DEFAULT_DIRECTIVE: &str = "warn";

/// Installs the global subscriber: compact lines while developing, JSON in
/// production. `RUST_LOG` overrides the default level.
pub fn init_tracing(config: &AppConfig) -> Result<(), TelemetryError> {
    if TRACING_INIT.get().is_some() {
        return Ok(());
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let base = tracing_fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_timer(UtcTime::rfc_3339());
    let output = match config.environment {
        Environment::Production => base.json().boxed(),
        Environment::Development | Environment::Test => base.compact().boxed(),
    };

    tracing_subscriber::registry()
        .with(output)
        .with(env_filter)
        .try_init()?;

    TRACING_INIT.set(()).ok();
    tracing::debug!(
        stage = "telemetry",
        env = config.environment.as_str(),
        version = env!("CARGO_PKG_VERSION"),
        "logging ready"
    );
    Ok(())
}
