//! [`HostParam`] implementation for [`clap::Arg`].
//!
//! clap carries no type names, so the host type is recovered from the
//! argument's action, value hint, and the value type produced by its value
//! parser.

use std::path::PathBuf;

use clap::{
    Arg, ArgAction, ValueHint,
    builder::{PossibleValue, ValueParser},
};
use clidex_core::{HostParam, HostValue, ParamKind};

/// Borrowed view of a clap argument.
#[derive(Clone, Copy, Debug)]
pub struct ClapParam<'a> {
    arg: &'a Arg,
}

impl<'a> ClapParam<'a> {
    /// Wraps `arg` without copying it.
    #[must_use]
    pub const fn new(arg: &'a Arg) -> Self {
        Self { arg }
    }

    /// Returns the wrapped clap argument.
    #[must_use]
    pub const fn inner(self) -> &'a Arg {
        self.arg
    }

    fn is_switch(self) -> bool {
        matches!(self.arg.get_action(), ArgAction::SetTrue | ArgAction::SetFalse)
    }

    fn is_count(self) -> bool {
        matches!(self.arg.get_action(), ArgAction::Count)
    }
}

impl HostParam for ClapParam<'_> {
    fn kind(&self) -> ParamKind {
        if self.arg.is_positional() {
            ParamKind::Argument
        } else {
            ParamKind::Option
        }
    }

    fn name(&self) -> Option<String> {
        if self.arg.is_positional() {
            return Some(self.arg.get_id().as_str().to_owned());
        }
        self.arg
            .get_long()
            .map(str::to_owned)
            .or_else(|| self.arg.get_short().map(String::from))
            .or_else(|| Some(self.arg.get_id().as_str().to_owned()))
    }

    fn flags(&self) -> Vec<String> {
        let longs = self
            .arg
            .get_long()
            .into_iter()
            .chain(self.arg.get_visible_aliases().unwrap_or_default())
            .map(|long| format!("--{long}"));
        let shorts = self
            .arg
            .get_short()
            .into_iter()
            .chain(self.arg.get_visible_short_aliases().unwrap_or_default())
            .map(|short| format!("-{short}"));
        longs.chain(shorts).collect()
    }

    fn help(&self) -> Option<String> {
        self.arg
            .get_help()
            .or_else(|| self.arg.get_long_help())
            .map(ToString::to_string)
    }

    fn type_name(&self) -> Option<String> {
        if self.is_switch() {
            return Some("bool".to_owned());
        }
        if self.is_count() {
            return Some("count".to_owned());
        }
        if matches!(
            self.arg.get_value_hint(),
            ValueHint::AnyPath | ValueHint::FilePath | ValueHint::DirPath | ValueHint::ExecutablePath
        ) {
            return Some("path".to_owned());
        }
        value_type_name(self.arg.get_value_parser()).map(str::to_owned)
    }

    fn choices(&self) -> Vec<String> {
        self.arg
            .get_possible_values()
            .iter()
            .filter(|value| !value.is_hide_set())
            .map(PossibleValue::get_name)
            .map(str::to_owned)
            .collect()
    }

    fn is_required(&self) -> bool {
        self.arg.is_required_set()
    }

    fn default_value(&self) -> Option<HostValue> {
        let mut values: Vec<HostValue> = self
            .arg
            .get_default_values()
            .iter()
            .map(|value| HostValue::Text(value.to_string_lossy().into_owned()))
            .collect();
        match values.len() {
            // clap only fills implicit defaults in while building the command.
            0 if self.is_count() => Some(HostValue::Integer(0)),
            0 if self.is_switch() => Some(HostValue::Bool(matches!(
                self.arg.get_action(),
                ArgAction::SetFalse
            ))),
            0 => None,
            1 => values.pop(),
            _ => Some(HostValue::List(values)),
        }
    }

    fn is_flag(&self) -> bool {
        self.is_switch()
    }

    fn nargs(&self) -> usize {
        self.arg
            .get_num_args()
            .map_or(1, |range| range.min_values().max(1))
    }

    fn is_multiple(&self) -> bool {
        matches!(self.arg.get_action(), ArgAction::Append | ArgAction::Count)
            || self
                .arg
                .get_num_args()
                .is_some_and(|range| range.max_values() > range.min_values().max(1))
    }

    fn is_hidden(&self) -> bool {
        self.arg.is_hide_set()
    }
}

/// Maps the value type produced by `parser` onto a host type name.
fn value_type_name(parser: &ValueParser) -> Option<&'static str> {
    let produced = parser.type_id();
    let probes: [(ValueParser, &'static str); 15] = [
        (clap::value_parser!(String).into(), "string"),
        (clap::value_parser!(PathBuf).into(), "path"),
        (clap::value_parser!(bool).into(), "bool"),
        (clap::value_parser!(i8).into(), "i8"),
        (clap::value_parser!(i16).into(), "i16"),
        (clap::value_parser!(i32).into(), "i32"),
        (clap::value_parser!(i64).into(), "i64"),
        (clap::value_parser!(isize).into(), "isize"),
        (clap::value_parser!(u8).into(), "u8"),
        (clap::value_parser!(u16).into(), "u16"),
        (clap::value_parser!(u32).into(), "u32"),
        (clap::value_parser!(u64).into(), "u64"),
        (clap::value_parser!(usize).into(), "usize"),
        (clap::value_parser!(f32).into(), "f32"),
        (clap::value_parser!(f64).into(), "f64"),
    ];
    probes
        .into_iter()
        .find(|(probe, _)| probe.type_id() == produced)
        .map(|(_, name)| name)
}
