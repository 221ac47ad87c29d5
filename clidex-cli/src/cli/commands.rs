//! Command implementations and argument parsing for the acme CLI.

use std::fmt;

use clap::{ArgMatches, Args, FromArgMatches, Parser, Subcommand, ValueEnum};
use clidex_hosts_clap::{LlmCommandError, dispatch};
use thiserror::Error;
use tracing::{info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "acme", about = "Acme operations CLI.", version)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Deployment commands.
    #[command(about = "Deployment commands.")]
    Deploy(DeployCommand),
    /// Report service health.
    #[command(about = "Report service health.")]
    Health(HealthArgs),
}

/// Arguments of the `deploy` group.
#[derive(Debug, Args, Clone)]
pub struct DeployCommand {
    /// Deployment action to perform.
    #[command(subcommand)]
    pub action: DeployAction,
}

/// Actions under `deploy`.
#[derive(Debug, Subcommand, Clone)]
pub enum DeployAction {
    /// Roll out a service release.
    #[command(about = "Roll out a service release.")]
    Release(ReleaseArgs),
}

/// Options accepted by `deploy release`.
#[derive(Debug, Args, Clone)]
pub struct ReleaseArgs {
    /// Target environment
    #[arg(long, value_enum, default_value_t = Environment::Staging)]
    pub env: Environment,

    /// Print the plan without deploying
    #[arg(long)]
    pub dry_run: bool,

    /// Service to release
    pub service: String,
}

/// Deployment environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    /// Pre-production environment.
    Staging,
    /// Production environment.
    Prod,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Staging => "staging",
            Self::Prod => "prod",
        })
    }
}

/// Options accepted by `health`.
#[derive(Debug, Args, Clone)]
pub struct HealthArgs {
    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The `llm` command failed to catalog or render the command tree.
    #[error(transparent)]
    Llm(#[from] LlmCommandError),
    /// Parsed matches did not fit the declared commands.
    #[error("failed to interpret arguments: {0}")]
    Arguments(#[from] clap::Error),
    /// A JSON report could not be serialized.
    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

impl CliError {
    /// Stable machine-readable code, when the failure carries one.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Llm(err) => err.structural_code().map(|code| code.as_str()),
            Self::Arguments(_) | Self::Report(_) => None,
        }
    }
}

/// Executes the command selected by `matches` against the wired `root`.
///
/// The `llm` command is handled before the derive layer sees the matches,
/// since [`Cli`] does not declare it.
///
/// # Errors
/// Returns [`CliError`] when cataloging, argument extraction or report
/// rendering fails.
pub fn execute(root: &clap::Command, matches: &ArgMatches) -> Result<String, CliError> {
    if let Some(catalog) = dispatch(root, matches) {
        return Ok(catalog?);
    }
    let cli = Cli::from_arg_matches(matches)?;
    run_cli(cli)
}

/// Executes the CLI command represented by `cli` and returns its output.
///
/// # Errors
/// Returns [`CliError::Report`] if a JSON report cannot be serialized.
///
/// # Examples
/// ```
/// use clidex_cli::cli::{Cli, Command, HealthArgs, run_cli};
///
/// let cli = Cli {
///     command: Command::Health(HealthArgs { json: false }),
/// };
/// assert_eq!(run_cli(cli)?, "status: ok\n");
/// # Ok::<(), clidex_cli::cli::CliError>(())
/// ```
pub fn run_cli(cli: Cli) -> Result<String, CliError> {
    match cli.command {
        Command::Deploy(deploy) => match deploy.action {
            DeployAction::Release(args) => Ok(release(&args)),
        },
        Command::Health(args) => health(&args),
    }
}

#[instrument(name = "acme.release", skip_all, fields(service = %args.service, env = %args.env))]
pub(super) fn release(args: &ReleaseArgs) -> String {
    if args.dry_run {
        info!(dry_run = true, "planned release");
        format!("would release {} to {}\n", args.service, args.env)
    } else {
        info!("released service");
        format!("released {} to {}\n", args.service, args.env)
    }
}

pub(super) fn health(args: &HealthArgs) -> Result<String, CliError> {
    if !args.json {
        return Ok("status: ok\n".to_owned());
    }
    let mut report = serde_json::to_string(&serde_json::json!({ "status": "ok" }))?;
    report.push('\n');
    Ok(report)
}
