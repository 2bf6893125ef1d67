//! Process-wide log subscriber for servers running the dispatch core.
//!
//! Dispatch code only emits `tracing` events under its own targets. A host
//! process calls [`initialise`] once at start-up to decide where those
//! events go; tests install scoped subscribers instead.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use strata_config::Config;

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Proof that the global subscriber is in place.
#[derive(Debug, Default, Clone, Copy)]
pub struct TelemetryHandle;

/// Reasons the global subscriber could not be installed.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// `log_filter` in the configuration is not a valid filter directive.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// A different global subscriber was installed first.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Routes dispatch log records to standard error as configured.
///
/// The filter and format come from `config`. Safe to call more than once:
/// the subscriber chosen by the first successful call stays in place.
///
/// ```
/// use strata_config::Config;
/// use strata_dispatch::telemetry;
///
/// # fn main() -> Result<(), telemetry::TelemetryError> {
/// telemetry::initialise(&Config::default())?;
/// telemetry::initialise(&Config::default())?;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for an unparsable filter and
/// [`TelemetryError::Subscriber`] when another subscriber is already global.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    INSTALLED
        .get_or_try_init(|| install(config))
        .map(|_| TelemetryHandle)
}

fn install(config: &Config) -> Result<(), TelemetryError> {
    let subscriber = build_subscriber(config)?;
    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
}

fn build_subscriber(config: &Config) -> Result<Box<dyn Subscriber + Send + Sync>, TelemetryError> {
    let filter = EnvFilter::try_new(config.log_filter())
        .map_err(|error| TelemetryError::Filter(error.to_string()))?;
    let stderr_is_terminal = io::stderr().is_terminal();

    let base = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    if config.log_format().is_structured() {
        return Ok(Box::new(base.json().flatten_event(true).finish()));
    }
    Ok(Box::new(base.compact().with_ansi(stderr_is_terminal).finish()))
}
