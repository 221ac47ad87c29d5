//! The catalog value produced by [`crate::CatalogBuilder`].
//!
//! Field names and presence are a compatibility contract gated by
//! [`CATALOG_VERSION`]; field order carries no meaning.

use std::collections::HashSet;
use std::fmt;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Version of the catalog document layout.
pub const CATALOG_VERSION: u32 = 1;

/// Flattened, versioned description of a command tree.
///
/// # Examples
/// ```
/// use clidex_core::{CATALOG_VERSION, Catalog};
///
/// let catalog = Catalog::new("acme", Vec::new());
/// assert_eq!(catalog.catalog_version(), CATALOG_VERSION);
/// assert_eq!(catalog.root_command(), "acme");
/// assert_eq!(catalog.command_count(), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CatalogDocument")]
pub struct Catalog {
    catalog_version: u32,
    root_command: String,
    command_count: usize,
    commands: Vec<CommandEntry>,
}

impl Catalog {
    /// Assembles a catalog for `root_command` from already-ordered entries.
    #[must_use]
    pub fn new(root_command: impl Into<String>, commands: Vec<CommandEntry>) -> Self {
        Self {
            catalog_version: CATALOG_VERSION,
            root_command: root_command.into(),
            command_count: commands.len(),
            commands,
        }
    }

    /// Layout version of this catalog.
    #[must_use]
    pub fn catalog_version(&self) -> u32 {
        self.catalog_version
    }

    /// Name of the root command the catalog was built from.
    #[must_use]
    pub fn root_command(&self) -> &str {
        &self.root_command
    }

    /// Number of flattened command entries.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.command_count
    }

    /// Flattened entries in depth-first pre-order.
    #[must_use]
    pub fn commands(&self) -> &[CommandEntry] {
        &self.commands
    }

    /// Looks up an entry by its space-joined path.
    ///
    /// # Examples
    /// ```
    /// use clidex_core::{Catalog, CommandEntry};
    ///
    /// let entry = CommandEntry {
    ///     path: "acme health".into(),
    ///     summary: String::new(),
    ///     usage: "acme health".into(),
    ///     params: Vec::new(),
    /// };
    /// let catalog = Catalog::new("acme", vec![entry]);
    /// assert!(catalog.find("acme health").is_some());
    /// assert!(catalog.find("acme").is_none());
    /// ```
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&CommandEntry> {
        self.commands.iter().find(|entry| entry.path == path)
    }
}

/// Wire shape accepted when deserializing a [`Catalog`].
#[derive(Deserialize)]
struct CatalogDocument {
    catalog_version: u32,
    root_command: String,
    command_count: usize,
    commands: Vec<CommandEntry>,
}

/// Reasons a deserialized catalog document was rejected.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CatalogDocumentError {
    /// The document was written for a different layout version.
    #[error("unsupported catalog_version {found}; expected {CATALOG_VERSION}")]
    UnsupportedVersion {
        /// Version found in the document.
        found: u32,
    },
    /// `command_count` disagreed with the number of entries.
    #[error("command_count is {declared} but {actual} commands are listed")]
    CountMismatch {
        /// Count declared by the document.
        declared: usize,
        /// Number of entries actually present.
        actual: usize,
    },
    /// Two entries shared a path.
    #[error("command path `{path}` is listed more than once")]
    DuplicatePath {
        /// The repeated path.
        path: String,
    },
}

impl TryFrom<CatalogDocument> for Catalog {
    type Error = CatalogDocumentError;

    fn try_from(document: CatalogDocument) -> Result<Self, Self::Error> {
        if document.catalog_version != CATALOG_VERSION {
            return Err(CatalogDocumentError::UnsupportedVersion {
                found: document.catalog_version,
            });
        }
        if document.command_count != document.commands.len() {
            return Err(CatalogDocumentError::CountMismatch {
                declared: document.command_count,
                actual: document.commands.len(),
            });
        }
        let mut seen = HashSet::with_capacity(document.commands.len());
        for entry in &document.commands {
            if !seen.insert(entry.path.as_str()) {
                return Err(CatalogDocumentError::DuplicatePath {
                    path: entry.path.clone(),
                });
            }
        }
        Ok(Self {
            catalog_version: document.catalog_version,
            root_command: document.root_command,
            command_count: document.command_count,
            commands: document.commands,
        })
    }
}

/// One invocable command in the flattened catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommandEntry {
    /// Space-joined path from the root, e.g. `acme deploy release`.
    pub path: String,
    /// Single-line summary; empty when the host declares none.
    pub summary: String,
    /// Usage line derived from the path and parameters.
    pub usage: String,
    /// Parameters in host declaration order.
    pub params: Vec<ParamDescriptor>,
}

/// Whether a parameter is a named option or a positional argument.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// Named option such as `--env`.
    Option,
    /// Positional argument.
    Argument,
}

impl ParamKind {
    /// Lowercase label used by both renderers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Option => "option",
            Self::Argument => "argument",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized value type of a parameter.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    /// Free-form string.
    Text,
    /// Whole number.
    Integer,
    /// Floating point number.
    Float,
    /// `true` or `false`.
    Boolean,
    /// One of an enumerated set of strings.
    Choice,
    /// Filesystem path.
    Path,
    /// The host type could not be mapped.
    Unknown,
}

impl TypeTag {
    /// Maps a host framework's type name onto a tag.
    ///
    /// Matching is case-insensitive; anything unrecognised is
    /// [`TypeTag::Unknown`].
    ///
    /// # Examples
    /// ```
    /// use clidex_core::TypeTag;
    ///
    /// assert_eq!(TypeTag::from_host_name("INTEGER"), TypeTag::Integer);
    /// assert_eq!(TypeTag::from_host_name("PathBuf"), TypeTag::Path);
    /// assert_eq!(TypeTag::from_host_name("uuid"), TypeTag::Unknown);
    /// ```
    #[must_use]
    pub fn from_host_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "string" | "str" | "text" => Self::Text,
            "int" | "integer" | "count" | "i8" | "i16" | "i32" | "i64" | "i128" | "isize"
            | "u8" | "u16" | "u32" | "u64" | "u128" | "usize" => Self::Integer,
            "float" | "f32" | "f64" | "number" => Self::Float,
            "bool" | "boolean" => Self::Boolean,
            "choice" | "enum" => Self::Choice,
            "path" | "pathbuf" | "file" | "filename" | "directory" => Self::Path,
            _ => Self::Unknown,
        }
    }

    /// Lowercase label used by both renderers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Choice => "choice",
            Self::Path => "path",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized default value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// Boolean default.
    Bool(bool),
    /// Integer default.
    Integer(i64),
    /// Finite floating point default.
    Float(f64),
    /// String default.
    Text(String),
    /// Defaults of a parameter that takes several values.
    List(Vec<Literal>),
}

impl Literal {
    /// Converts the literal into its JSON representation.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Bool(value) => serde_json::Value::Bool(*value),
            Self::Integer(value) => serde_json::Value::from(*value),
            Self::Float(value) => serde_json::Number::from_f64(*value)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::Text(value) => serde_json::Value::String(value.clone()),
            Self::List(values) => values.iter().map(Self::to_json).collect(),
        }
    }
}

/// Formats as a JSON literal: strings quoted, booleans lowercase.
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

/// Normalized description of one option or positional argument.
///
/// Flags always satisfy `type_tag == Boolean`, `nargs == 1` and
/// `required == false`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    /// Option or argument.
    pub kind: ParamKind,
    /// Canonical name; options use their flag spelling without dashes.
    pub name: String,
    /// Normalized value type.
    #[serde(rename = "type")]
    pub type_tag: TypeTag,
    /// Whether the parameter must be supplied.
    pub required: bool,
    /// Default value, or `None` when the parameter has no default.
    pub default: Option<Literal>,
    /// Whether the option is a boolean switch taking no value.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_flag: bool,
    /// Number of values consumed per occurrence.
    #[serde(default = "one")]
    pub nargs: NonZeroUsize,
    /// Allowed values in declaration order, present only for choices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    /// Every spelling of an option, e.g. `--env` and `-e`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
    /// Single-line help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Whether the parameter accepts repeated or variadic values.
    #[serde(default, skip_serializing_if = "is_false")]
    pub multiple: bool,
}

const fn is_false(value: &bool) -> bool {
    !*value
}

const fn one() -> NonZeroUsize {
    NonZeroUsize::MIN
}
