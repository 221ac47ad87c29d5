//! Capability traits implemented by host CLI framework adapters.
//!
//! The walker and builder only ever see a command graph through
//! [`HostCommand`] and [`HostParam`]. Adapters wrap the framework's own
//! objects (usually by reference) and report their metadata without
//! interpreting it; normalization happens in the core.

use std::fmt;

use crate::catalog::ParamKind;

/// Identity of a host command node, used to detect revisits.
///
/// Two handles that refer to the same underlying node must report the same
/// identity.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(usize);

impl NodeId {
    /// Wraps a raw identity value.
    #[must_use]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Derives an identity from the address of `node`.
    ///
    /// # Examples
    /// ```
    /// use clidex_core::NodeId;
    ///
    /// let a = String::from("a");
    /// let b = String::from("b");
    /// assert_eq!(NodeId::of(&a), NodeId::of(&a));
    /// assert_ne!(NodeId::of(&a), NodeId::of(&b));
    /// ```
    #[must_use]
    pub fn of<T: ?Sized>(node: &T) -> Self {
        Self(std::ptr::from_ref(node).cast::<()>().addr())
    }

    /// Returns the raw identity value.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// Whether a command has subcommands.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CommandKind {
    /// Command with at least one subcommand.
    Group,
    /// Command without subcommands.
    Leaf,
}

/// Subcommands of a host command.
#[derive(Clone, Debug)]
pub enum Children<C> {
    /// The host guarantees a stable declaration order.
    Ordered(Vec<C>),
    /// The host gives no ordering guarantee; the walker sorts by name.
    Unordered(Vec<C>),
}

impl<C> Children<C> {
    /// No subcommands.
    #[must_use]
    pub const fn none() -> Self {
        Self::Ordered(Vec::new())
    }

    /// Returns whether there are no subcommands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Ordered(children) | Self::Unordered(children) => children.is_empty(),
        }
    }
}

impl<C> Default for Children<C> {
    fn default() -> Self {
        Self::none()
    }
}

/// Raw default value as declared by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum HostValue {
    /// The host's "no default" sentinel.
    Unset,
    /// String value, possibly needing conversion to the parameter's type.
    Text(String),
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// Several default values.
    List(Vec<HostValue>),
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("<unset>"),
            Self::Text(value) => f.write_str(value),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::List(values) => {
                f.write_str("[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// A command or group in the host's object graph.
///
/// Implementations are cheap handles (typically a reference wrapper); the
/// walker clones nothing but the handles returned by [`HostCommand::children`].
pub trait HostCommand: Sized {
    /// Parameter handle type exposed by this host.
    type Param: HostParam;

    /// Identity of the underlying node.
    fn id(&self) -> NodeId;

    /// Name used to invoke the command, if the host knows it.
    fn name(&self) -> Option<String>;

    /// Short help text.
    fn summary(&self) -> Option<String>;

    /// Subcommands in the host's declared order.
    fn children(&self) -> Children<Self>;

    /// Options and arguments accepted by the command itself.
    fn params(&self) -> Vec<Self::Param>;

    /// Whether the command can run without a subcommand.
    ///
    /// Leaves are always invocable; the default treats groups as
    /// dispatch-only.
    fn is_invocable(&self) -> bool {
        self.children().is_empty()
    }

    /// Whether the host hides the command from its help output.
    fn is_hidden(&self) -> bool {
        false
    }

    /// Group or leaf, derived from the presence of subcommands.
    fn kind(&self) -> CommandKind {
        if self.children().is_empty() {
            CommandKind::Leaf
        } else {
            CommandKind::Group
        }
    }
}

/// An option or positional argument as reported by the host.
///
/// Every accessor reports the host's declaration verbatim; contradictory
/// metadata is detected during normalization rather than here.
pub trait HostParam {
    /// Option or argument.
    fn kind(&self) -> ParamKind;

    /// Canonical name. Options report their preferred flag spelling with or
    /// without leading dashes.
    fn name(&self) -> Option<String>;

    /// Every spelling of an option, dashes included.
    fn flags(&self) -> Vec<String> {
        Vec::new()
    }

    /// Help text.
    fn help(&self) -> Option<String> {
        None
    }

    /// Host type name, e.g. `integer` or `PathBuf`.
    fn type_name(&self) -> Option<String>;

    /// Enumerated values in declaration order; empty when unrestricted.
    fn choices(&self) -> Vec<String> {
        Vec::new()
    }

    /// Whether the host marks the parameter as mandatory.
    fn is_required(&self) -> bool;

    /// Declared default, or `None` when the host declares none.
    fn default_value(&self) -> Option<HostValue>;

    /// Whether the option is a boolean switch taking no value.
    fn is_flag(&self) -> bool {
        false
    }

    /// Number of values consumed per occurrence.
    fn nargs(&self) -> usize {
        1
    }

    /// Whether the parameter may repeat or take a variable number of values.
    fn is_multiple(&self) -> bool {
        false
    }

    /// Whether the host hides the parameter from its help output.
    fn is_hidden(&self) -> bool {
        false
    }
}
