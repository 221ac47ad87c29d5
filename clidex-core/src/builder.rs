//! Catalog construction from a host command graph.
//!
//! Walks the graph, keeps the invocable commands and normalizes their
//! parameters into the uniform catalog schema.

use tracing::{Span, debug, field, instrument};

use crate::{
    catalog::{Catalog, CommandEntry, ParamDescriptor, ParamKind},
    error::Result,
    host::{HostCommand, HostParam},
    normalize::{normalize_param, single_line},
    walker::{WalkOptions, WalkedNode, walk},
};

/// Configures and runs catalog construction.
///
/// # Examples
/// ```
/// use clidex_core::CatalogBuilder;
///
/// let builder = CatalogBuilder::new()
///     .with_root_name("acme")
///     .with_include_hidden(true);
/// assert_eq!(builder.root_name(), Some("acme"));
/// assert!(builder.include_hidden());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    root_name: Option<String>,
    include_hidden: bool,
}

impl CatalogBuilder {
    /// Creates a builder that names the root after the host and skips hidden
    /// commands and parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the root command's name, e.g. with the invoked binary name.
    #[must_use]
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = Some(name.into());
        self
    }

    /// Returns the configured root name override.
    #[must_use]
    pub fn root_name(&self) -> Option<&str> {
        self.root_name.as_deref()
    }

    /// Includes commands and parameters the host marks as hidden.
    #[must_use]
    pub fn with_include_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }

    /// Returns whether hidden commands and parameters are cataloged.
    #[must_use]
    pub fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    /// Builds a [`Catalog`] for the graph rooted at `root`.
    ///
    /// One [`CommandEntry`] is produced per invocable command, in
    /// depth-first pre-order. Malformed parameters are degraded rather than
    /// failing the build.
    ///
    /// # Errors
    /// Returns [`crate::StructuralError`] when the graph cannot be walked:
    /// a cycle, a missing root name, an unnamed subcommand or a duplicated
    /// path.
    #[instrument(
        name = "catalog.build",
        skip_all,
        fields(root = field::Empty, commands = field::Empty)
    )]
    pub fn build<C: HostCommand>(&self, root: C) -> Result<Catalog> {
        let options = WalkOptions {
            root_name: self.root_name.clone(),
            include_hidden: self.include_hidden,
        };
        let walked = walk(root, &options)?;
        let root_command = walked
            .first()
            .map(|node| node.path.clone())
            .unwrap_or_default();

        let commands: Vec<CommandEntry> = walked
            .iter()
            .filter(|node| node.node.is_invocable())
            .map(|node| self.entry_for(node))
            .collect();

        let span = Span::current();
        span.record("root", field::display(&root_command));
        span.record("commands", commands.len());
        Ok(Catalog::new(root_command, commands))
    }

    fn entry_for<C: HostCommand>(&self, walked: &WalkedNode<C>) -> CommandEntry {
        let params: Vec<ParamDescriptor> = walked
            .node
            .params()
            .iter()
            .enumerate()
            .filter(|(_, param)| self.include_hidden || !param.is_hidden())
            .map(|(position, param)| normalize_param(&walked.path, position, param))
            .collect();
        debug!(path = %walked.path, params = params.len(), "cataloged command");

        CommandEntry {
            usage: derive_usage(&walked.path, &params),
            summary: walked
                .node
                .summary()
                .and_then(single_line)
                .unwrap_or_default(),
            path: walked.path.clone(),
            params,
        }
    }
}

/// Derives a usage line such as `acme deploy release [OPTIONS] SERVICE`.
///
/// Optional arguments are bracketed, variadic arguments end in `...` and
/// arguments taking a fixed number of values repeat their name.
///
/// # Examples
/// ```
/// use clidex_core::derive_usage;
///
/// assert_eq!(derive_usage("acme health", &[]), "acme health");
/// ```
#[must_use]
pub fn derive_usage(path: &str, params: &[ParamDescriptor]) -> String {
    let mut tokens = vec![path.to_owned()];
    if params.iter().any(|param| param.kind == ParamKind::Option) {
        tokens.push("[OPTIONS]".to_owned());
    }
    for param in params.iter().filter(|param| param.kind == ParamKind::Argument) {
        let name = param.name.to_uppercase();
        let rendered = if param.multiple {
            format!("{name}...")
        } else {
            vec![name; param.nargs.get()].join(" ")
        };
        tokens.push(if param.required {
            rendered
        } else {
            format!("[{rendered}]")
        });
    }
    tokens.join(" ")
}
