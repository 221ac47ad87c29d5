//! [`HostCommand`] implementation for [`clap::Command`].

use clap::{ArgAction, Command};
use clidex_core::{Children, HostCommand, NodeId};

use crate::param::ClapParam;

/// Borrowed view of a clap command node.
#[derive(Clone, Copy, Debug)]
pub struct ClapCommand<'a> {
    command: &'a Command,
}

impl<'a> ClapCommand<'a> {
    /// Wraps `command` without copying it.
    #[must_use]
    pub const fn new(command: &'a Command) -> Self {
        Self { command }
    }

    /// Returns the wrapped clap command.
    #[must_use]
    pub const fn inner(self) -> &'a Command {
        self.command
    }

    fn subcommands(self) -> impl Iterator<Item = &'a Command> {
        let parent = self.command;
        parent
            .get_subcommands()
            .filter(move |child| !is_generated_help(parent, child))
    }
}

impl<'a> HostCommand for ClapCommand<'a> {
    type Param = ClapParam<'a>;

    fn id(&self) -> NodeId {
        NodeId::of(self.command)
    }

    fn name(&self) -> Option<String> {
        Some(self.command.get_name().to_owned())
    }

    fn summary(&self) -> Option<String> {
        self.command
            .get_about()
            .or_else(|| self.command.get_long_about())
            .map(ToString::to_string)
    }

    fn children(&self) -> Children<Self> {
        Children::Ordered(self.subcommands().map(Self::new).collect())
    }

    fn params(&self) -> Vec<ClapParam<'a>> {
        self.command
            .get_arguments()
            .filter(|arg| {
                !matches!(
                    arg.get_action(),
                    ArgAction::Help | ArgAction::HelpShort | ArgAction::HelpLong | ArgAction::Version
                )
            })
            .map(ClapParam::new)
            .collect()
    }

    fn is_invocable(&self) -> bool {
        self.subcommands().next().is_none() || !self.command.is_subcommand_required_set()
    }

    fn is_hidden(&self) -> bool {
        self.command.is_hide_set()
    }
}

/// Whether `child` is the `help` subcommand clap adds while building `parent`.
fn is_generated_help(parent: &Command, child: &Command) -> bool {
    child.get_name() == "help" && !parent.is_disable_help_subcommand_set()
}
