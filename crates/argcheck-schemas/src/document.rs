//! Check documents and their compilation into decorators
//!
//! A document names the function (optional) and maps argument names to
//! rules:
//!
//! ```yaml
//! function: floordiff
//! arguments:
//!   x:
//!     coerce: { from: [float], to: int }
//!     bounded: { lower: 0 }
//!   tz:
//!     ensure: timezone
//!     optional: true
//! ```
//!
//! Copyright (c) 2025 Argcheck Team
//! Licensed under the Apache-2.0 license

use crate::error::{SchemaError, SchemaResult};
use argcheck_core::{
    ensure_dtype, ensure_timestamp, ensure_timezone, ensure_upper_case, optionally, Bounds,
    Callable, Check, Coercer, Conversion, DType, ParamSpec, Preprocess, Preprocessed,
    Preprocessor, TypeSet, Value, ValueType,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A declarative set of argument checks for one function
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckDocument {
    /// Function name used in messages instead of the signature's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,

    #[serde(default)]
    pub arguments: BTreeMap<String, ArgumentRule>,

    /// Keyword arguments that fail the call, with their messages
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub reject_keywords: BTreeMap<String, String>,
}

/// Rule for a single argument: at most one coercion and at most one validator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArgumentRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coerce: Option<CoerceRule>,

    /// Accept the null sentinel before running the validator
    #[serde(default)]
    pub optional: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,

    /// Kind codes, e.g. `"iu"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kinds: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounded: Option<BoundsRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strictly_bounded: Option<BoundsRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<Vec<serde_json::Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dtypes: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ensure: Option<EnsureKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoerceRule {
    /// Source type names
    pub from: Vec<String>,
    /// Target conversion: `int`, `float`, `str`, `bool`, `list` or `tuple`
    pub to: String,
    /// Conversion keywords, e.g. `base: 2`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub kwargs: BTreeMap<String, serde_json::Value>,
}

/// Bounds with either side optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundsRule {
    #[serde(default)]
    pub lower: Option<serde_json::Value>,
    #[serde(default)]
    pub upper: Option<serde_json::Value>,
}

/// Built-in normalizing preprocessors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnsureKind {
    Dtype,
    Timestamp,
    Timezone,
    UpperCase,
}

impl EnsureKind {
    fn preprocessor(self) -> Preprocessor {
        match self {
            EnsureKind::Dtype => ensure_dtype(),
            EnsureKind::Timestamp => ensure_timestamp(),
            EnsureKind::Timezone => ensure_timezone(),
            EnsureKind::UpperCase => ensure_upper_case(),
        }
    }
}

impl CheckDocument {
    /// Build the decorator the document describes
    pub fn compile(&self) -> SchemaResult<Preprocess> {
        let mut decorator = Preprocess::new();
        if let Some(function) = &self.function {
            decorator = decorator.funcname(function);
        }
        for (name, rule) in &self.arguments {
            for spec in rule.compile(name)? {
                decorator = decorator.arg(name, spec);
            }
        }
        for (keyword, message) in &self.reject_keywords {
            decorator = decorator.reject_keyword(keyword, message);
        }
        Ok(decorator)
    }

    /// Compile and apply to `callable` in one step
    pub fn decorate<C: Callable + 'static>(&self, callable: C) -> SchemaResult<Preprocessed> {
        Ok(self.compile()?.apply(callable)?)
    }
}

impl ArgumentRule {
    /// Specs for one argument, coercion first
    pub fn compile(&self, argument: &str) -> SchemaResult<Vec<ParamSpec>> {
        let mut specs = Vec::new();
        if let Some(coerce) = &self.coerce {
            specs.push(ParamSpec::Coerce(coerce.compile(argument)?.into()));
        }

        let declared: Vec<&str> = [
            ("types", self.types.is_some()),
            ("kinds", self.kinds.is_some()),
            ("bounded", self.bounded.is_some()),
            ("strictly_bounded", self.strictly_bounded.is_some()),
            ("element", self.element.is_some()),
            ("dimensions", self.dimensions.is_some()),
            ("dtypes", self.dtypes.is_some()),
            ("ensure", self.ensure.is_some()),
        ]
        .into_iter()
        .filter_map(|(key, present)| present.then_some(key))
        .collect();

        if declared.len() > 1 {
            return Err(SchemaError::invalid_rule(
                argument,
                format!("at most one validator is allowed, found {}", declared.join(", ")),
            ));
        }

        if let Some(kind) = self.ensure {
            let preprocessor = kind.preprocessor();
            specs.push(ParamSpec::Custom(if self.optional {
                optionally(preprocessor)
            } else {
                preprocessor
            }));
        } else if let Some(check) = self.check(argument)? {
            specs.push(ParamSpec::Validate(if self.optional {
                check.optional()
            } else {
                check
            }));
        } else if self.optional {
            return Err(SchemaError::invalid_rule(
                argument,
                "'optional' needs a validator to wrap",
            ));
        }

        if specs.is_empty() {
            return Err(SchemaError::invalid_rule(argument, "rule declares no check"));
        }
        Ok(specs)
    }

    fn check(&self, argument: &str) -> SchemaResult<Option<Check>> {
        let check = if let Some(types) = &self.types {
            Check::Types(parse_types(argument, types)?)
        } else if let Some(kinds) = &self.kinds {
            Check::Kinds(kinds.chars().collect())
        } else if let Some(bounds) = &self.bounded {
            Check::Bounded(bounds.to_bounds())
        } else if let Some(bounds) = &self.strictly_bounded {
            Check::StrictlyBounded(bounds.to_bounds())
        } else if let Some(elements) = &self.element {
            Check::Element(elements.iter().cloned().map(Value::from).collect())
        } else if let Some(ndim) = self.dimensions {
            Check::Dimensions(ndim)
        } else if let Some(dtypes) = &self.dtypes {
            Check::Dtypes(
                dtypes
                    .iter()
                    .map(|name| {
                        DType::from_name(name).ok_or_else(|| {
                            SchemaError::invalid_rule(argument, format!("unknown dtype '{}'", name))
                        })
                    })
                    .collect::<SchemaResult<Vec<_>>>()?,
            )
        } else {
            return Ok(None);
        };
        Ok(Some(check))
    }
}

impl CoerceRule {
    pub fn compile(&self, argument: &str) -> SchemaResult<Coercer> {
        let to = Conversion::from_name(&self.to).ok_or_else(|| {
            SchemaError::invalid_rule(argument, format!("unknown conversion target '{}'", self.to))
        })?;
        let coercer = Coercer::new(parse_types(argument, &self.from)?, to);
        Ok(self
            .kwargs
            .iter()
            .fold(coercer, |coercer, (key, value)| {
                coercer.kwarg(key, Value::from(value.clone()))
            }))
    }
}

impl BoundsRule {
    pub fn to_bounds(&self) -> Bounds {
        Bounds::new(
            self.lower.clone().map(Value::from),
            self.upper.clone().map(Value::from),
        )
    }
}

fn parse_types(argument: &str, names: &[String]) -> SchemaResult<TypeSet> {
    names
        .iter()
        .map(|name| {
            ValueType::from_name(name).ok_or_else(|| {
                SchemaError::invalid_rule(argument, format!("unknown type '{}'", name))
            })
        })
        .collect::<SchemaResult<Vec<_>>>()
        .map(TypeSet::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argcheck_core::{Function, Signature};

    fn rule(yaml: &str) -> ArgumentRule {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn pair() -> Function {
        Function::new(
            Signature::new("foo").param("x").param_with_default("y", Value::None),
            |args| Ok(Value::tuple([args["x"].clone(), args["y"].clone()])),
        )
    }

    #[test]
    fn test_optional_types_rule() {
        let specs = rule("{types: [str, int], optional: true}").compile("y").unwrap();
        assert_eq!(specs.len(), 1);
        match &specs[0] {
            ParamSpec::Validate(check) => {
                assert_eq!(check.describe(), "a value of type str or int or NoneType");
                assert!(check.accepts(&Value::None));
            }
            other => panic!("expected a validator, got {:?}", other),
        }
    }

    #[test]
    fn test_coerce_then_bounds() {
        let specs = rule("{coerce: {from: [str], to: int, kwargs: {base: 2}}, bounded: {lower: 1}}")
            .compile("x")
            .unwrap();
        assert!(matches!(specs[0], ParamSpec::Coerce(_)));
        assert!(matches!(specs[1], ParamSpec::Validate(Check::Bounded(_))));
    }

    #[test]
    fn test_invalid_rules() {
        let err = rule("{types: [int], bounded: {lower: 1}}").compile("x").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid rule for argument 'x': at most one validator is allowed, found types, bounded"
        );
        assert!(rule("{optional: true}").compile("x").is_err());
        assert!(rule("{}").compile("x").is_err());
        assert!(rule("{types: ['no such type!']}").compile("x").is_err());
        assert!(rule("{dtypes: [int99]}").compile("x").is_err());
        assert!(rule("{coerce: {from: [str], to: complex}}").compile("x").is_err());
        assert!(serde_yaml::from_str::<ArgumentRule>("{typo: 1}").is_err());
    }

    #[test]
    fn test_document_decorates() {
        let document: CheckDocument = serde_yaml::from_str(
            "function: test.foo\narguments:\n  y:\n    element: [a, b]\n    optional: true\n",
        )
        .unwrap();
        let foo = document.decorate(pair()).unwrap();
        assert!(foo.call_positional(vec![Value::Int(1)]).is_ok());
        assert!(foo.call_positional(vec![Value::Int(1), "a".into()]).is_ok());
        let err = foo.call_positional(vec![Value::Int(1), "c".into()]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "test.foo() expected None or a value in ('a', 'b') for argument 'y', but got 'c' instead."
        );
    }

    #[test]
    fn test_decoration_errors_become_compile_errors() {
        let document: CheckDocument =
            serde_yaml::from_str("arguments:\n  z:\n    types: [int]\n").unwrap();
        let err = document.decorate(pair()).unwrap_err();
        assert!(matches!(err, SchemaError::Compile(_)));
    }

    #[test]
    fn test_ensure_rule() {
        let document: CheckDocument =
            serde_yaml::from_str("arguments:\n  x:\n    ensure: upper_case\n").unwrap();
        let foo = document.decorate(pair()).unwrap();
        assert_eq!(
            foo.call_positional(vec!["abc".into()]).unwrap(),
            Value::tuple([Value::from("ABC"), Value::None])
        );
    }
}
