//! The `llm` subcommand: registration and execution.

use clap::{Arg, ArgAction, ArgMatches, Command};
use clidex_core::{
    CatalogBuilder, RenderError, RenderFormat, StructuralError, StructuralErrorCode, render,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::command::ClapCommand;

/// Name of the catalog subcommand.
pub const LLM_COMMAND: &str = "llm";

/// Id of the `--json` switch on the catalog subcommand.
pub const JSON_FLAG: &str = "json";

const LLM_ABOUT: &str = "Describe every command of this CLI for language models.";

/// Errors raised while running the `llm` subcommand.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LlmCommandError {
    /// The command tree could not be cataloged.
    #[error(transparent)]
    Structure(#[from] StructuralError),
    /// The catalog could not be serialized.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl LlmCommandError {
    /// Stable code of the underlying structural error, if any.
    #[must_use]
    pub const fn structural_code(&self) -> Option<StructuralErrorCode> {
        match self {
            Self::Structure(err) => Some(err.code()),
            Self::Render(_) => None,
        }
    }
}

/// Registers the `llm` subcommand on `root`.
///
/// Attaching is idempotent: a root that already has a subcommand named `llm`
/// is returned unchanged. A host's own `llm` subcommand keeps its behaviour,
/// since [`dispatch`] only runs the one registered here.
///
/// # Examples
/// ```
/// use clap::Command;
/// use clidex_hosts_clap::{LLM_COMMAND, attach};
///
/// let root = attach(attach(Command::new("acme")));
/// let count = root
///     .get_subcommands()
///     .filter(|sub| sub.get_name() == LLM_COMMAND)
///     .count();
/// assert_eq!(count, 1);
/// ```
#[must_use]
pub fn attach(root: Command) -> Command {
    if root
        .get_subcommands()
        .any(|sub| sub.get_name() == LLM_COMMAND)
    {
        debug!(root = root.get_name(), "llm command already attached");
        return root;
    }
    root.subcommand(llm_command())
}

fn llm_command() -> Command {
    Command::new(LLM_COMMAND)
        .about(LLM_ABOUT)
        .arg(
            Arg::new(JSON_FLAG)
                .long(JSON_FLAG)
                .action(ArgAction::SetTrue)
                .help("Emit the catalog as JSON instead of text."),
        )
}

/// Runs the `llm` subcommand if `matches` selected it.
///
/// Returns `None` when another subcommand (or none) was selected, or when
/// `root`'s `llm` subcommand was declared by the host rather than by
/// [`attach`], leaving dispatch to the application.
pub fn dispatch(root: &Command, matches: &ArgMatches) -> Option<Result<String, LlmCommandError>> {
    let (name, sub_matches) = matches.subcommand()?;
    if name != LLM_COMMAND || !is_attached(root) {
        return None;
    }
    let json = sub_matches.get_flag(JSON_FLAG);
    Some(run_llm(root, RenderFormat::from_json_flag(json)))
}

/// Whether `root` carries the `llm` subcommand built by [`attach`].
fn is_attached(root: &Command) -> bool {
    root.find_subcommand(LLM_COMMAND).is_some_and(|llm| {
        llm.get_about().is_some_and(|about| about.to_string() == LLM_ABOUT)
            && llm.get_arguments().any(|arg| {
                arg.get_id().as_str() == JSON_FLAG
                    && matches!(arg.get_action(), ArgAction::SetTrue)
            })
    })
}

/// Catalogs `root` and renders it in `format`.
///
/// # Errors
/// Returns [`LlmCommandError::Structure`] when the tree is malformed and
/// [`LlmCommandError::Render`] when JSON serialization fails.
pub fn run_llm(root: &Command, format: RenderFormat) -> Result<String, LlmCommandError> {
    let catalog = CatalogBuilder::new().build(ClapCommand::new(root))?;
    let rendered = render(&catalog, format)?;
    info!(
        root = catalog.root_command(),
        commands = catalog.command_count(),
        ?format,
        "rendered command catalog"
    );
    Ok(rendered)
}
