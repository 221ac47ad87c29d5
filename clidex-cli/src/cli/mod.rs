//! Command-line interface of the `acme` demonstration host.
//!
//! `acme` is a small operations CLI whose command tree is cataloged by the
//! `llm` subcommand that [`crate::config::WiringConfig`] attaches to it.

mod commands;

pub use commands::{
    Cli, CliError, Command, DeployAction, DeployCommand, Environment, HealthArgs, ReleaseArgs,
    execute, run_cli,
};
