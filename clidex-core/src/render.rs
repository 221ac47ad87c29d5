//! Text and JSON renderings of a [`Catalog`].
//!
//! Both renderers are pure functions of the catalog: rendering the same
//! catalog twice yields byte-identical output.

use crate::{
    catalog::{Catalog, CommandEntry, Literal, ParamDescriptor, ParamKind},
    error::RenderError,
};

/// Output format selected by the `llm` command.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum RenderFormat {
    /// Line-oriented text intended for prompts and people.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

impl RenderFormat {
    /// Maps a `--json` switch onto a format.
    #[must_use]
    pub const fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// Renders `catalog` in `format`.
///
/// # Errors
/// Returns [`RenderError::Json`] if JSON serialization fails.
///
/// # Examples
/// ```
/// use clidex_core::{Catalog, RenderFormat, render};
///
/// let catalog = Catalog::new("acme", Vec::new());
/// let text = render(&catalog, RenderFormat::Text)?;
/// assert!(text.starts_with("catalog_version: 1\n"));
/// # Ok::<(), clidex_core::RenderError>(())
/// ```
pub fn render(catalog: &Catalog, format: RenderFormat) -> Result<String, RenderError> {
    match format {
        RenderFormat::Text => Ok(render_text(catalog)),
        RenderFormat::Json => render_json(catalog),
    }
}

/// Renders `catalog` as pretty-printed JSON.
///
/// # Errors
/// Returns [`RenderError::Json`] if serialization fails.
pub fn render_json(catalog: &Catalog) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(catalog)?)
}

/// Renders `catalog` as line-oriented text.
///
/// A header block is followed by one block per command, each introduced by
/// a blank line and a `### <path>` heading.
///
/// # Examples
/// ```
/// use clidex_core::{Catalog, CommandEntry, render_text};
///
/// let catalog = Catalog::new(
///     "acme",
///     vec![CommandEntry {
///         path: "acme health".into(),
///         summary: String::new(),
///         usage: "acme health".into(),
///         params: Vec::new(),
///     }],
/// );
/// assert_eq!(
///     render_text(&catalog),
///     "catalog_version: 1\nroot_command: acme\ncommands: 1\n\
///      \n### acme health\nsummary: (no summary)\nusage: acme health\nparams: none\n",
/// );
/// ```
#[must_use]
pub fn render_text(catalog: &Catalog) -> String {
    let mut lines = vec![
        format!("catalog_version: {}", catalog.catalog_version()),
        format!("root_command: {}", catalog.root_command()),
        format!("commands: {}", catalog.command_count()),
    ];
    for entry in catalog.commands() {
        lines.push(String::new());
        push_command(&mut lines, entry);
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn push_command(lines: &mut Vec<String>, entry: &CommandEntry) {
    lines.push(format!("### {}", entry.path));
    let summary = if entry.summary.is_empty() {
        "(no summary)"
    } else {
        entry.summary.as_str()
    };
    lines.push(format!("summary: {summary}"));
    lines.push(format!("usage: {}", entry.usage));
    if entry.params.is_empty() {
        lines.push("params: none".to_owned());
        return;
    }
    lines.push("params:".to_owned());
    lines.extend(entry.params.iter().map(param_line));
}

fn param_line(param: &ParamDescriptor) -> String {
    let mut line = match param.kind {
        ParamKind::Option => format!(
            "- option `{}`, type={}, required={}, default={}",
            flag_spelling(param),
            param.type_tag,
            py_bool(param.required),
            literal_or_null(param.default.as_ref()),
        ),
        ParamKind::Argument => format!(
            "- argument `{}`, type={}, required={}, nargs={}, default={}",
            param.name,
            param.type_tag,
            py_bool(param.required),
            param.nargs,
            literal_or_null(param.default.as_ref()),
        ),
    };
    if param.is_flag {
        line.push_str(", is_flag=True");
    }
    if param.multiple {
        line.push_str(", multiple=True");
    }
    line
}

/// The first declared spelling wins; without one, single-character names
/// are short flags.
fn flag_spelling(param: &ParamDescriptor) -> String {
    if let Some(flag) = param.flags.first() {
        return flag.clone();
    }
    let name = &param.name;
    if name.chars().count() == 1 {
        format!("-{name}")
    } else {
        format!("--{name}")
    }
}

const fn py_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

fn literal_or_null(literal: Option<&Literal>) -> String {
    literal.map_or_else(|| "null".to_owned(), Literal::to_string)
}
