//! clap host adapter for clidex.
//!
//! [`ClapCommand`] and [`ClapParam`] expose a borrowed [`clap::Command`] tree
//! through the `clidex-core` capability traits. [`attach`] registers the
//! `llm` subcommand on an application's root command and [`dispatch`] runs it
//! once the arguments have been parsed.
//!
//! The adapter works on both built and unbuilt commands: arguments and
//! subcommands that clap generates itself (help, version, the `help`
//! subcommand) are never cataloged.

mod command;
mod llm;
mod param;

pub use crate::{
    command::ClapCommand,
    llm::{JSON_FLAG, LLM_COMMAND, LlmCommandError, attach, dispatch, run_llm},
    param::ClapParam,
};
