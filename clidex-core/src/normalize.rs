//! Normalization of host parameter metadata into [`ParamDescriptor`]s.
//!
//! A parameter whose metadata contradicts itself is degraded to an
//! `unknown` descriptor and reported as a [`ParamNormalizationWarning`]; the
//! rest of the catalog is unaffected.

use std::num::NonZeroUsize;

use tracing::warn;

use crate::{
    catalog::{Literal, ParamDescriptor, ParamKind, TypeTag},
    error::ParamNormalizationWarning,
    host::{HostParam, HostValue},
};

/// Normalizes the parameter at `position` of the command at `command`.
///
/// Never fails: malformed metadata yields a degraded descriptor and a
/// `warn!` event carrying the warning code.
pub(crate) fn normalize_param<P: HostParam>(
    command: &str,
    position: usize,
    param: &P,
) -> ParamDescriptor {
    match try_normalize(command, position, param) {
        Ok(descriptor) => descriptor,
        Err(warning) => {
            warn!(
                code = %warning.code(),
                command,
                position,
                %warning,
                "degraded parameter metadata"
            );
            degraded(position, param)
        }
    }
}

fn try_normalize<P: HostParam>(
    command: &str,
    position: usize,
    param: &P,
) -> Result<ParamDescriptor, ParamNormalizationWarning> {
    let kind = param.kind();
    let name = canonical_name(param).ok_or_else(|| ParamNormalizationWarning::MissingName {
        command: command.to_owned(),
        position,
    })?;
    let is_flag = kind == ParamKind::Option && param.is_flag();

    let declared_type = param.type_name();
    let mut type_tag = declared_type
        .as_deref()
        .map_or(TypeTag::Unknown, TypeTag::from_host_name);
    if is_flag {
        if let Some(type_name) = declared_type.filter(|_| type_tag != TypeTag::Boolean) {
            return Err(ParamNormalizationWarning::FlagNotBoolean {
                command: command.to_owned(),
                param: name,
                type_name,
            });
        }
        type_tag = TypeTag::Boolean;
    }

    let declared_choices = param.choices();
    if type_tag != TypeTag::Boolean && !declared_choices.is_empty() {
        type_tag = TypeTag::Choice;
    }
    let choices = if type_tag == TypeTag::Choice {
        if declared_choices.is_empty() {
            return Err(ParamNormalizationWarning::EmptyChoices {
                command: command.to_owned(),
                param: name,
            });
        }
        Some(declared_choices)
    } else {
        None
    };

    let nargs = if is_flag {
        NonZeroUsize::MIN
    } else {
        NonZeroUsize::new(param.nargs()).ok_or_else(|| ParamNormalizationWarning::ZeroArity {
            command: command.to_owned(),
            param: name.clone(),
        })?
    };

    let default = match param.default_value() {
        None | Some(HostValue::Unset) => is_flag.then_some(Literal::Bool(false)),
        Some(value) => Some(normalize_default(&value, type_tag).map_err(|issue| {
            issue.into_warning(command, &name, type_tag, &value)
        })?),
    };

    Ok(ParamDescriptor {
        kind,
        required: !is_flag && param.is_required() && default.is_none(),
        name,
        type_tag,
        default,
        is_flag,
        nargs,
        choices,
        flags: option_flags(kind, param),
        help: param.help().and_then(single_line),
        multiple: !is_flag && param.is_multiple(),
    })
}

fn degraded<P: HostParam>(position: usize, param: &P) -> ParamDescriptor {
    let kind = param.kind();
    ParamDescriptor {
        kind,
        name: canonical_name(param).unwrap_or_else(|| format!("unnamed_{position}")),
        type_tag: TypeTag::Unknown,
        required: false,
        default: None,
        is_flag: false,
        nargs: NonZeroUsize::MIN,
        choices: None,
        flags: option_flags(kind, param),
        help: param.help().and_then(single_line),
        multiple: false,
    }
}

fn canonical_name<P: HostParam>(param: &P) -> Option<String> {
    let raw = param.name()?;
    let name = raw.trim().trim_start_matches('-');
    (!name.is_empty()).then(|| name.to_owned())
}

fn option_flags<P: HostParam>(kind: ParamKind, param: &P) -> Vec<String> {
    match kind {
        ParamKind::Option => param
            .flags()
            .into_iter()
            .filter(|flag| !flag.trim().is_empty())
            .collect(),
        ParamKind::Argument => Vec::new(),
    }
}

/// Collapses runs of whitespace so the text fits on one rendered line.
pub(crate) fn single_line(text: String) -> Option<String> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}

enum DefaultIssue {
    Invalid,
    NonFinite,
}

impl DefaultIssue {
    fn into_warning(
        self,
        command: &str,
        param: &str,
        tag: TypeTag,
        value: &HostValue,
    ) -> ParamNormalizationWarning {
        match self {
            Self::Invalid => ParamNormalizationWarning::InvalidDefault {
                command: command.to_owned(),
                param: param.to_owned(),
                tag,
                raw: value.to_string(),
            },
            Self::NonFinite => ParamNormalizationWarning::NonFiniteDefault {
                command: command.to_owned(),
                param: param.to_owned(),
            },
        }
    }
}

/// Converts a host default into a literal of the resolved type.
///
/// Typed host values are kept as declared; string values are parsed for
/// numeric and boolean parameters.
fn normalize_default(value: &HostValue, tag: TypeTag) -> Result<Literal, DefaultIssue> {
    match value {
        HostValue::Unset => Err(DefaultIssue::Invalid),
        HostValue::Bool(flag) => Ok(Literal::Bool(*flag)),
        HostValue::Integer(number) => Ok(Literal::Integer(*number)),
        HostValue::Float(number) if number.is_finite() => Ok(Literal::Float(*number)),
        HostValue::Float(_) => Err(DefaultIssue::NonFinite),
        HostValue::List(values) => values
            .iter()
            .map(|item| normalize_default(item, tag))
            .collect::<Result<Vec<_>, _>>()
            .map(Literal::List),
        HostValue::Text(raw) => parse_text_default(raw, tag),
    }
}

fn parse_text_default(raw: &str, tag: TypeTag) -> Result<Literal, DefaultIssue> {
    match tag {
        TypeTag::Integer => raw
            .trim()
            .parse::<i64>()
            .map(Literal::Integer)
            .map_err(|_| DefaultIssue::Invalid),
        TypeTag::Float => {
            let number = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| DefaultIssue::Invalid)?;
            if number.is_finite() {
                Ok(Literal::Float(number))
            } else {
                Err(DefaultIssue::NonFinite)
            }
        }
        TypeTag::Boolean => parse_bool(raw)
            .map(Literal::Bool)
            .ok_or(DefaultIssue::Invalid),
        TypeTag::Text | TypeTag::Choice | TypeTag::Path | TypeTag::Unknown => {
            Ok(Literal::Text(raw.to_owned()))
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    /// In-memory parameter with every accessor overridable.
    #[derive(Clone, Default)]
    struct Param {
        kind: Option<ParamKind>,
        name: Option<&'static str>,
        type_name: Option<&'static str>,
        choices: Vec<&'static str>,
        required: bool,
        default: Option<HostValue>,
        flag: bool,
        nargs: Option<usize>,
        multiple: bool,
    }

    impl HostParam for Param {
        fn kind(&self) -> ParamKind {
            self.kind.unwrap_or(ParamKind::Option)
        }
        fn name(&self) -> Option<String> {
            self.name.map(str::to_owned)
        }
        fn type_name(&self) -> Option<String> {
            self.type_name.map(str::to_owned)
        }
        fn choices(&self) -> Vec<String> {
            self.choices.iter().map(|choice| (*choice).to_owned()).collect()
        }
        fn is_required(&self) -> bool {
            self.required
        }
        fn default_value(&self) -> Option<HostValue> {
            self.default.clone()
        }
        fn is_flag(&self) -> bool {
            self.flag
        }
        fn nargs(&self) -> usize {
            self.nargs.unwrap_or(1)
        }
        fn is_multiple(&self) -> bool {
            self.multiple
        }
    }

    fn normalize(param: &Param) -> ParamDescriptor {
        normalize_param("tool cmd", 0, param)
    }

    fn assert_degraded(descriptor: &ParamDescriptor) {
        assert_eq!(descriptor.type_tag, TypeTag::Unknown);
        assert!(!descriptor.required);
        assert_eq!(descriptor.default, None);
        assert!(!descriptor.is_flag);
        assert_eq!(descriptor.nargs.get(), 1);
    }

    #[rstest]
    #[case::text("text", TypeTag::Text)]
    #[case::integer("int", TypeTag::Integer)]
    #[case::float("f64", TypeTag::Float)]
    #[case::boolean("bool", TypeTag::Boolean)]
    #[case::path("PathBuf", TypeTag::Path)]
    #[case::unrecognised("uuid", TypeTag::Unknown)]
    fn maps_host_type_names(#[case] type_name: &'static str, #[case] expected: TypeTag) {
        let descriptor = normalize(&Param {
            name: Some("value"),
            type_name: Some(type_name),
            ..Param::default()
        });
        assert_eq!(descriptor.type_tag, expected);
        assert_eq!(descriptor.name, "value");
    }

    #[test]
    fn unrecognised_type_keeps_remaining_fields() {
        let descriptor = normalize(&Param {
            name: Some("id"),
            type_name: Some("uuid"),
            required: true,
            ..Param::default()
        });
        assert_eq!(descriptor.type_tag, TypeTag::Unknown);
        assert!(descriptor.required);
    }

    #[test]
    fn flags_default_to_false_and_are_never_required() {
        let descriptor = normalize(&Param {
            name: Some("--dry-run"),
            flag: true,
            required: true,
            nargs: Some(0),
            ..Param::default()
        });
        assert_eq!(descriptor.name, "dry-run");
        assert_eq!(descriptor.type_tag, TypeTag::Boolean);
        assert_eq!(descriptor.default, Some(Literal::Bool(false)));
        assert!(descriptor.is_flag);
        assert!(!descriptor.required);
        assert_eq!(descriptor.nargs.get(), 1);
    }

    #[test]
    fn flag_default_can_be_overridden() {
        let descriptor = normalize(&Param {
            name: Some("color"),
            type_name: Some("bool"),
            flag: true,
            default: Some(HostValue::Text("true".into())),
            ..Param::default()
        });
        assert_eq!(descriptor.default, Some(Literal::Bool(true)));
    }

    #[test]
    fn choices_keep_declaration_order() {
        let descriptor = normalize(&Param {
            name: Some("env"),
            type_name: Some("string"),
            choices: vec!["staging", "prod", "dev"],
            default: Some(HostValue::Text("staging".into())),
            ..Param::default()
        });
        assert_eq!(descriptor.type_tag, TypeTag::Choice);
        assert_eq!(
            descriptor.choices,
            Some(vec!["staging".to_owned(), "prod".to_owned(), "dev".to_owned()])
        );
        assert_eq!(descriptor.default, Some(Literal::Text("staging".into())));
    }

    #[test]
    fn boolean_possible_values_do_not_become_choices() {
        let descriptor = normalize(&Param {
            name: Some("enabled"),
            type_name: Some("bool"),
            choices: vec!["true", "false"],
            ..Param::default()
        });
        assert_eq!(descriptor.type_tag, TypeTag::Boolean);
        assert_eq!(descriptor.choices, None);
    }

    #[rstest]
    #[case::integer("integer", "8", Literal::Integer(8))]
    #[case::float("float", "0.5", Literal::Float(0.5))]
    #[case::boolean("boolean", "off", Literal::Bool(false))]
    #[case::text("text", "42", Literal::Text("42".into()))]
    fn parses_text_defaults_by_type(
        #[case] type_name: &'static str,
        #[case] raw: &str,
        #[case] expected: Literal,
    ) {
        let descriptor = normalize(&Param {
            name: Some("value"),
            type_name: Some(type_name),
            default: Some(HostValue::Text(raw.to_owned())),
            ..Param::default()
        });
        assert_eq!(descriptor.default, Some(expected));
    }

    #[test]
    fn required_only_without_default() {
        let with_default = normalize(&Param {
            name: Some("retries"),
            type_name: Some("integer"),
            required: true,
            default: Some(HostValue::Integer(3)),
            ..Param::default()
        });
        assert!(!with_default.required);

        let unset = normalize(&Param {
            name: Some("retries"),
            type_name: Some("integer"),
            required: true,
            default: Some(HostValue::Unset),
            ..Param::default()
        });
        assert!(unset.required);
        assert_eq!(unset.default, None);
    }

    #[test]
    fn list_defaults_become_arrays() {
        let descriptor = normalize(&Param {
            name: Some("tag"),
            type_name: Some("string"),
            multiple: true,
            default: Some(HostValue::List(vec![
                HostValue::Text("a".into()),
                HostValue::Text("b".into()),
            ])),
            ..Param::default()
        });
        assert!(descriptor.multiple);
        assert_eq!(
            descriptor.default,
            Some(Literal::List(vec![
                Literal::Text("a".into()),
                Literal::Text("b".into())
            ]))
        );
    }

    #[rstest]
    #[case::missing_name(Param { type_name: Some("text"), ..Param::default() })]
    #[case::flag_not_boolean(Param {
        name: Some("level"),
        type_name: Some("integer"),
        flag: true,
        ..Param::default()
    })]
    #[case::empty_choices(Param { name: Some("mode"), type_name: Some("choice"), ..Param::default() })]
    #[case::zero_arity(Param { name: Some("value"), type_name: Some("text"), nargs: Some(0), ..Param::default() })]
    #[case::invalid_default(Param {
        name: Some("port"),
        type_name: Some("integer"),
        required: true,
        default: Some(HostValue::Text("eighty".into())),
        ..Param::default()
    })]
    #[case::non_finite_default(Param {
        name: Some("ratio"),
        type_name: Some("float"),
        default: Some(HostValue::Float(f64::NAN)),
        ..Param::default()
    })]
    fn malformed_metadata_degrades_descriptor(#[case] param: Param) {
        assert_degraded(&normalize(&param));
    }

    #[test]
    fn degraded_descriptor_names_unnamed_parameters_by_position() {
        let descriptor = normalize_param(
            "tool",
            3,
            &Param {
                kind: Some(ParamKind::Argument),
                ..Param::default()
            },
        );
        assert_eq!(descriptor.name, "unnamed_3");
        assert_eq!(descriptor.kind, ParamKind::Argument);
    }

    #[rstest]
    #[case("  Roll out\n  a release. ", Some("Roll out a release."))]
    #[case(" \n ", None)]
    fn single_line_collapses_whitespace(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(single_line(raw.to_owned()).as_deref(), expected);
    }
}
