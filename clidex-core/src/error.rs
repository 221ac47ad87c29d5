//! Error types for the clidex core library.
//!
//! Structural errors abort catalog construction. Normalization warnings are
//! never returned; they describe why a single parameter descriptor was
//! degraded and are emitted through `tracing`.

use std::fmt;

use thiserror::Error;

use crate::catalog::TypeTag;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this value."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Fatal problem with the shape of the command tree.
///
/// Retrying cannot help: the tree is static input.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum StructuralError {
    /// A command was reached a second time while walking the tree.
    #[error("command `{path}` was reached twice; the command graph contains a cycle")]
    Cycle {
        /// Path at which the already-visited command reappeared.
        path: String,
    },
    /// Neither the caller nor the host supplied a name for the root command.
    #[error("root command has no resolvable name")]
    MissingRootName,
    /// A subcommand reported an empty or missing name.
    #[error("a subcommand of `{parent}` has no resolvable name")]
    UnnamedCommand {
        /// Path of the command owning the unnamed child.
        parent: String,
    },
    /// Two sibling commands resolved to the same path.
    #[error("command path `{path}` is declared more than once")]
    DuplicatePath {
        /// The path that was produced twice.
        path: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`StructuralError`] variants.
    enum StructuralErrorCode for StructuralError {
        /// A command was reached a second time while walking the tree.
        Cycle => Cycle { .. } => "CLIDEX_STRUCTURE_CYCLE",
        /// Neither the caller nor the host supplied a name for the root command.
        MissingRootName => MissingRootName => "CLIDEX_STRUCTURE_MISSING_ROOT_NAME",
        /// A subcommand reported an empty or missing name.
        UnnamedCommand => UnnamedCommand { .. } => "CLIDEX_STRUCTURE_UNNAMED_COMMAND",
        /// Two sibling commands resolved to the same path.
        DuplicatePath => DuplicatePath { .. } => "CLIDEX_STRUCTURE_DUPLICATE_PATH",
    }
}

/// Reason a parameter descriptor was degraded to `type=unknown`.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParamNormalizationWarning {
    /// The host parameter exposed no usable name.
    #[error("parameter #{position} of `{command}` has no name")]
    MissingName {
        /// Path of the command declaring the parameter.
        command: String,
        /// Zero-based position in the host's parameter list.
        position: usize,
    },
    /// A flag declared a value type other than boolean.
    #[error("flag `{param}` of `{command}` declares non-boolean type `{type_name}`")]
    FlagNotBoolean {
        /// Path of the command declaring the parameter.
        command: String,
        /// Parameter name.
        param: String,
        /// Type name reported by the host.
        type_name: String,
    },
    /// A choice-typed parameter exposed no choices.
    #[error("choice parameter `{param}` of `{command}` lists no choices")]
    EmptyChoices {
        /// Path of the command declaring the parameter.
        command: String,
        /// Parameter name.
        param: String,
    },
    /// A value-taking parameter declared that it consumes no values.
    #[error("parameter `{param}` of `{command}` consumes zero values")]
    ZeroArity {
        /// Path of the command declaring the parameter.
        command: String,
        /// Parameter name.
        param: String,
    },
    /// The default could not be represented in the resolved type.
    #[error("default `{raw}` of `{param}` in `{command}` is not a valid {tag}")]
    InvalidDefault {
        /// Path of the command declaring the parameter.
        command: String,
        /// Parameter name.
        param: String,
        /// Type the default was expected to match.
        tag: TypeTag,
        /// Debug rendering of the offending default.
        raw: String,
    },
    /// A float default was NaN or infinite.
    #[error("default of `{param}` in `{command}` is not a finite number")]
    NonFiniteDefault {
        /// Path of the command declaring the parameter.
        command: String,
        /// Parameter name.
        param: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`ParamNormalizationWarning`] variants.
    enum ParamNormalizationWarningCode for ParamNormalizationWarning {
        /// The host parameter exposed no usable name.
        MissingName => MissingName { .. } => "CLIDEX_PARAM_MISSING_NAME",
        /// A flag declared a value type other than boolean.
        FlagNotBoolean => FlagNotBoolean { .. } => "CLIDEX_PARAM_FLAG_NOT_BOOLEAN",
        /// A choice-typed parameter exposed no choices.
        EmptyChoices => EmptyChoices { .. } => "CLIDEX_PARAM_EMPTY_CHOICES",
        /// A value-taking parameter declared that it consumes no values.
        ZeroArity => ZeroArity { .. } => "CLIDEX_PARAM_ZERO_ARITY",
        /// The default could not be represented in the resolved type.
        InvalidDefault => InvalidDefault { .. } => "CLIDEX_PARAM_INVALID_DEFAULT",
        /// A float default was NaN or infinite.
        NonFiniteDefault => NonFiniteDefault { .. } => "CLIDEX_PARAM_NON_FINITE_DEFAULT",
    }
}

/// Failure while producing rendered output.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RenderError {
    /// The catalog could not be serialized as JSON.
    #[error("failed to serialize catalog as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenient alias for results returned by catalog construction.
pub type Result<T> = core::result::Result<T, StructuralError>;
