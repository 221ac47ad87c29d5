//! Wiring configuration read once at startup.
//!
//! `CLIDEX_DISABLE_AUTO` turns off attaching the `llm` command. Accepted
//! values are `1`, `true` and `yes` to disable, and `0`, `false`, `no` or an
//! empty string to keep the default; matching ignores case and surrounding
//! whitespace.

use std::env;

use clidex_hosts_clap::attach;
use thiserror::Error;
use tracing::debug;

const DISABLE_AUTO_ENV: &str = "CLIDEX_DISABLE_AUTO";

/// Errors raised while reading the wiring configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained invalid UTF-8 data.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Name of the offending environment variable.
        name: &'static str,
        /// Underlying lookup failure.
        #[source]
        source: env::VarError,
    },
    /// Environment variable held something other than a boolean toggle.
    #[error("unsupported value `{provided}` for `{name}`; expected `1`, `true`, `yes`, `0`, `false` or `no`")]
    InvalidToggle {
        /// Name of the offending environment variable.
        name: &'static str,
        /// Raw value supplied by the user.
        provided: String,
    },
}

/// How the `llm` command is wired into the host CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WiringConfig {
    /// Whether `llm` is attached to the root command.
    pub attach_llm: bool,
}

impl Default for WiringConfig {
    fn default() -> Self {
        Self { attach_llm: true }
    }
}

impl WiringConfig {
    /// Reads `CLIDEX_DISABLE_AUTO` from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the variable is not valid Unicode or does
    /// not hold a recognised toggle.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_var(env::var(DISABLE_AUTO_ENV))
    }

    fn from_var(lookup: Result<String, env::VarError>) -> Result<Self, ConfigError> {
        let disabled = match lookup {
            Ok(raw) => parse_toggle(&raw)?,
            Err(env::VarError::NotPresent) => false,
            Err(err @ env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::InvalidUnicode {
                    name: DISABLE_AUTO_ENV,
                    source: err,
                });
            }
        };
        Ok(Self {
            attach_llm: !disabled,
        })
    }

    /// Applies the configuration to the application's root command.
    #[must_use]
    pub fn wire(self, root: clap::Command) -> clap::Command {
        if self.attach_llm {
            attach(root)
        } else {
            debug!(root = root.get_name(), "llm command disabled by {DISABLE_AUTO_ENV}");
            root
        }
    }
}

fn parse_toggle(raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "" | "0" | "false" | "no" => Ok(false),
        other => Err(ConfigError::InvalidToggle {
            name: DISABLE_AUTO_ENV,
            provided: other.to_owned(),
        }),
    }
}
