//! Structured logging for the acme CLI.
//!
//! Diagnostics go to `stderr` so `acme llm` output on `stdout` can be piped
//! straight into a prompt or a JSON parser. `CLIDEX_LOG_FORMAT` selects
//! `human` (default) or `json` lines and `RUST_LOG` filters events, falling
//! back to `info`.

use std::{env, str::FromStr, sync::OnceLock};

use thiserror::Error;
use tracing::debug;
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FORMAT_ENV: &str = "CLIDEX_LOG_FORMAT";
const DEFAULT_FILTER: &str = "info";

static INSTALLED: OnceLock<LogFormat> = OnceLock::new();

/// Errors raised while reading logging settings.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// `CLIDEX_LOG_FORMAT` contained invalid UTF-8 data.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Name of the offending environment variable.
        name: &'static str,
        /// Underlying lookup failure.
        #[source]
        source: env::VarError,
    },
    /// `CLIDEX_LOG_FORMAT` named a format other than `human` or `json`.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Raw value supplied by the user.
        provided: String,
    },
}

/// Shape of each emitted log line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Human,
    /// One JSON object per event, with the active span list.
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::UnsupportedFormat {
                provided: other.to_owned(),
            }),
        }
    }
}

impl LogFormat {
    /// Reads `CLIDEX_LOG_FORMAT` from the process environment.
    ///
    /// # Errors
    /// Returns [`LoggingError`] if the variable is not valid Unicode or names
    /// an unsupported format.
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_var(env::var(LOG_FORMAT_ENV))
    }

    fn from_var(lookup: Result<String, env::VarError>) -> Result<Self, LoggingError> {
        match lookup {
            Ok(raw) => raw.parse(),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(err @ env::VarError::NotUnicode(_)) => Err(LoggingError::InvalidUnicode {
                name: LOG_FORMAT_ENV,
                source: err,
            }),
        }
    }

    fn layer<S>(self) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
    {
        let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
        match self {
            Self::Human => layer.boxed(),
            Self::Json => layer
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .boxed(),
        }
    }
}

/// Installs the global subscriber once per process.
///
/// A subscriber installed elsewhere (a test harness, an embedding host) is
/// left in place; the acme events then flow into it.
///
/// # Errors
/// Returns [`LoggingError`] if `CLIDEX_LOG_FORMAT` cannot be read.
pub fn init_logging() -> Result<(), LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }
    let format = LogFormat::from_env()?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // The `log` bridge may already be owned by the embedding process.
    let _ = LogTracer::init();

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(format.layer())
        .try_init();
    if let Err(err) = installed {
        debug!(error = %err, "keeping the existing tracing subscriber");
    }
    let _ = INSTALLED.set(format);
    Ok(())
}
