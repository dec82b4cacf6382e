//! Coercer family
//!
//! A [`Coercer`] converts an argument whose runtime type is in its source
//! set and passes every other value through unchanged. Conversion errors are
//! returned to the caller as they are.
//!
//! # Examples
//!
//! ```
//! use argcheck_core::{coerce, Conversion, Value, ValueType};
//!
//! let to_int = coerce(ValueType::Float, Conversion::Int);
//! assert_eq!(to_int.apply(Value::Float(3.2)).unwrap(), Value::Int(3));
//! assert_eq!(to_int.apply(Value::from("3.2")).unwrap(), Value::from("3.2"));
//! ```
//!
//! Copyright (c) 2025 Argcheck Team
//! Licensed under the Apache-2.0 license

use crate::check::TypeSet;
use crate::error::{Error, MismatchKind, Result};
use crate::preprocess::{ParamSpec, Preprocess};
use crate::value::{Number, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Keyword parameters passed to a conversion
pub type Kwargs = BTreeMap<String, Value>;

/// A user-supplied conversion function
pub type ConversionFn = dyn Fn(Value, &Kwargs) -> Result<Value> + Send + Sync;

/// Target of a coercion
#[derive(Clone)]
pub enum Conversion {
    /// Integer; floats truncate, strings parse with an optional `base`
    Int,
    Float,
    /// Text form of the value, see [`coerce_string`]
    Str,
    /// Truthiness
    Bool,
    List,
    Tuple,
    /// Named user conversion
    Custom {
        name: String,
        convert: Arc<ConversionFn>,
    },
}

impl fmt::Debug for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conversion::Custom { name, .. } => write!(f, "Custom({})", name),
            other => f.write_str(other.name()),
        }
    }
}

impl PartialEq for Conversion {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // Compare only by name for user functions
            (Self::Custom { name: n1, .. }, Self::Custom { name: n2, .. }) => n1 == n2,
            (Self::Custom { .. }, _) | (_, Self::Custom { .. }) => false,
            (a, b) => a.name() == b.name(),
        }
    }
}

impl Conversion {
    /// Wrap a function as a named conversion
    pub fn custom<F>(name: impl Into<String>, convert: F) -> Self
    where
        F: Fn(Value, &Kwargs) -> Result<Value> + Send + Sync + 'static,
    {
        Conversion::Custom {
            name: name.into(),
            convert: Arc::new(convert),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Conversion::Int => "int",
            Conversion::Float => "float",
            Conversion::Str => "str",
            Conversion::Bool => "bool",
            Conversion::List => "list",
            Conversion::Tuple => "tuple",
            Conversion::Custom { name, .. } => name,
        }
    }

    /// Built-in conversion by target type name
    pub fn from_name(name: &str) -> Option<Self> {
        let conversion = match name {
            "int" => Conversion::Int,
            "float" => Conversion::Float,
            "str" | "string" => Conversion::Str,
            "bool" => Conversion::Bool,
            "list" => Conversion::List,
            "tuple" => Conversion::Tuple,
            _ => return None,
        };
        Some(conversion)
    }

    /// Keyword parameters the conversion understands; `None` accepts any
    pub fn accepted_kwargs(&self) -> Option<&'static [&'static str]> {
        match self {
            Conversion::Int => Some(&["base"]),
            Conversion::Custom { .. } => None,
            _ => Some(&[]),
        }
    }

    pub fn convert(&self, value: Value, kwargs: &Kwargs) -> Result<Value> {
        match self {
            Conversion::Int => to_int(value, kwargs),
            Conversion::Float => to_float(value),
            Conversion::Str => Ok(Value::Str(coerce_string(&value))),
            Conversion::Bool => Ok(Value::Bool(value.is_truthy())),
            Conversion::List => to_items(value, "list").map(Value::List),
            Conversion::Tuple => to_items(value, "tuple").map(Value::Tuple),
            Conversion::Custom { convert, .. } => convert(value, kwargs),
        }
    }
}

/// Convert values of the source types, pass everything else through
#[derive(Debug, Clone, PartialEq)]
pub struct Coercer {
    from: TypeSet,
    to: Conversion,
    kwargs: Kwargs,
}

impl Coercer {
    pub fn new(from: impl Into<TypeSet>, to: Conversion) -> Self {
        Self {
            from: from.into(),
            to,
            kwargs: Kwargs::new(),
        }
    }

    /// Add a keyword parameter for the conversion, e.g. `base`
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(name.into(), value.into());
        self
    }

    pub fn source_types(&self) -> &TypeSet {
        &self.from
    }

    pub fn target(&self) -> &Conversion {
        &self.to
    }

    pub fn kwargs(&self) -> &Kwargs {
        &self.kwargs
    }

    pub fn matches(&self, value: &Value) -> bool {
        self.from.matches(value)
    }

    pub fn apply(&self, value: Value) -> Result<Value> {
        if !self.matches(&value) {
            return Ok(value);
        }
        log::trace!("coercing {} to {}", value.type_name(), self.to.name());
        self.to.convert(value, &self.kwargs)
    }

    pub(crate) fn validate_config(&self, argument: &str) -> Result<()> {
        if self.from.is_empty() {
            return Err(Error::configuration(format!(
                "coerce() expected at least one source type for argument '{}'",
                argument
            )));
        }
        if let Some(accepted) = self.to.accepted_kwargs() {
            if let Some(unknown) = self.kwargs.keys().find(|k| !accepted.contains(&k.as_str())) {
                return Err(Error::configuration(format!(
                    "'{}' is an invalid keyword argument for {}() in coercion of argument '{}'",
                    unknown,
                    self.to.name(),
                    argument
                )));
            }
        }
        Ok(())
    }
}

/// Coercer converting `from` types with `to`
pub fn coerce(from: impl Into<TypeSet>, to: Conversion) -> Coercer {
    Coercer::new(from, to)
}

/// Candidate coercers for one argument; the first whose source types match wins
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coercion(Vec<Coercer>);

impl Coercion {
    pub fn new<I: IntoIterator<Item = Coercer>>(candidates: I) -> Self {
        Self(candidates.into_iter().collect())
    }

    pub fn candidates(&self) -> &[Coercer] {
        &self.0
    }

    pub fn apply(&self, value: Value) -> Result<Value> {
        match self.0.iter().find(|c| c.matches(&value)) {
            Some(coercer) => coercer.apply(value),
            None => Ok(value),
        }
    }

    pub(crate) fn validate_config(&self, argument: &str) -> Result<()> {
        if self.0.is_empty() {
            return Err(Error::configuration(format!(
                "coerce_types() expected at least one (from, to) pair for argument '{}'",
                argument
            )));
        }
        self.0.iter().try_for_each(|c| c.validate_config(argument))
    }
}

impl From<Coercer> for Coercion {
    fn from(coercer: Coercer) -> Self {
        Coercion(vec![coercer])
    }
}

impl From<Vec<Coercer>> for Coercion {
    fn from(candidates: Vec<Coercer>) -> Self {
        Coercion(candidates)
    }
}

impl<T: Into<TypeSet>> From<(T, Conversion)> for Coercion {
    fn from((from, to): (T, Conversion)) -> Self {
        Coercion(vec![Coercer::new(from, to)])
    }
}

/// Decorator applying a type coercion per argument
///
/// Each argument maps to one `(from, to)` pair or to several candidate
/// coercers, of which the first matching one is applied.
pub fn coerce_types<I, N, C>(named: I) -> Preprocess
where
    I: IntoIterator<Item = (N, C)>,
    N: Into<String>,
    C: Into<Coercion>,
{
    named
        .into_iter()
        .fold(Preprocess::new().factory("coerce_types"), |decorator, (name, coercion)| {
            decorator.arg(name, ParamSpec::Coerce(coercion.into()))
        })
}

/// Canonical text form of a value: strings as-is, composites as their representation
pub fn coerce_string(value: &Value) -> String {
    value.to_string()
}

fn to_int(value: Value, kwargs: &Kwargs) -> Result<Value> {
    let base = match kwargs.get("base") {
        None => None,
        Some(Value::Int(b)) if *b == 0 || (2..=36).contains(b) => Some(*b as u32),
        Some(_) => {
            return Err(Error::conversion(
                MismatchKind::Value,
                "int() base must be >= 2 and <= 36, or 0",
            ))
        }
    };

    match (&value, base) {
        (Value::Str(text), base) => parse_int(text, base.unwrap_or(10)),
        (_, Some(_)) => Err(Error::conversion(
            MismatchKind::Type,
            "int() can't convert non-string with explicit base",
        )),
        (Value::Int(i), None) => Ok(Value::Int(*i)),
        (Value::Bool(b), None) => Ok(Value::Int(*b as i64)),
        (Value::Float(f), None) => float_to_int(*f),
        (Value::Scalar(s), None) => match s.number() {
            Number::Int(i) => Ok(Value::Int(i)),
            Number::Float(f) => float_to_int(f),
        },
        _ => Err(Error::conversion(
            MismatchKind::Type,
            format!(
                "int() argument must be a string or a real number, not '{}'",
                value.type_name()
            ),
        )),
    }
}

fn parse_int(text: &str, base: u32) -> Result<Value> {
    let invalid = || {
        Error::conversion(
            MismatchKind::Value,
            format!(
                "invalid literal for int() with base {}: {}",
                base,
                Value::from(text).repr()
            ),
        )
    };

    let cleaned = text.trim().replace('_', "");
    let (negative, unsigned) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.strip_prefix('+').unwrap_or(cleaned.as_str())),
    };

    let lower = unsigned.to_ascii_lowercase();
    let (radix, digits) = match (base, lower.get(..2)) {
        (0 | 16, Some("0x")) => (16, &unsigned[2..]),
        (0 | 8, Some("0o")) => (8, &unsigned[2..]),
        (0 | 2, Some("0b")) => (2, &unsigned[2..]),
        (0, _) => (10, unsigned),
        (b, _) => (b, unsigned),
    };

    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(invalid());
    }
    let signed = if negative {
        format!("-{}", digits)
    } else {
        digits.to_string()
    };
    i64::from_str_radix(&signed, radix)
        .map(Value::Int)
        .map_err(|_| invalid())
}

fn float_to_int(f: f64) -> Result<Value> {
    if f.is_nan() {
        return Err(Error::conversion(
            MismatchKind::Value,
            "cannot convert float NaN to integer",
        ));
    }
    if f.is_infinite() {
        return Err(Error::conversion(
            MismatchKind::Value,
            "cannot convert float infinity to integer",
        ));
    }
    let truncated = f.trunc();
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(Error::conversion(
            MismatchKind::Value,
            "int too large to convert",
        ));
    }
    Ok(Value::Int(truncated as i64))
}

fn to_float(value: Value) -> Result<Value> {
    if let Value::Str(text) = &value {
        return text
            .trim()
            .replace('_', "")
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| {
                Error::conversion(
                    MismatchKind::Value,
                    format!("could not convert string to float: {}", value.repr()),
                )
            });
    }
    match value.as_number() {
        Some(number) => Ok(Value::Float(number.as_f64())),
        None => Err(Error::conversion(
            MismatchKind::Type,
            format!(
                "float() argument must be a string or a real number, not '{}'",
                value.type_name()
            ),
        )),
    }
}

fn to_items(value: Value, target: &str) -> Result<Vec<Value>> {
    match value {
        Value::List(items) | Value::Tuple(items) => Ok(items),
        Value::Str(s) => Ok(s.chars().map(|c| Value::Str(c.to_string())).collect()),
        Value::Dict(map) => Ok(map.into_keys().map(Value::Str).collect()),
        Value::Array(array) => Ok(array.data().to_vec()),
        other => Err(Error::conversion(
            MismatchKind::Type,
            format!(
                "{}() argument must be iterable, not '{}'",
                target,
                other.type_name()
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Scalar, ValueType};

    #[test]
    fn test_coerce_passes_through_unmatched_types() {
        let coercer = coerce(ValueType::Float, Conversion::Int);
        assert_eq!(coercer.apply(Value::Int(7)).unwrap(), Value::Int(7));
        assert!(matches!(coercer.apply(Value::Int(7)).unwrap(), Value::Int(_)));
        assert!(matches!(coercer.apply(Value::Float(3.9)).unwrap(), Value::Int(3)));
        assert!(matches!(coercer.apply(Value::Float(-2.5)).unwrap(), Value::Int(-2)));
    }

    #[test]
    fn test_bools_match_int_sources() {
        let coercer = coerce(ValueType::Int, Conversion::Str);
        assert_eq!(coercer.apply(Value::Bool(true)).unwrap(), Value::from("True"));
        assert_eq!(coercer.apply(Value::Int(3)).unwrap(), Value::from("3"));
        let back = coerce(ValueType::Bool, Conversion::Int);
        assert!(matches!(back.apply(Value::Int(1)).unwrap(), Value::Int(1)));
    }

    #[test]
    fn test_int_with_base() {
        let coercer = coerce(ValueType::Str, Conversion::Int).kwarg("base", 2);
        assert!(matches!(coercer.apply("101".into()).unwrap(), Value::Int(5)));
        assert!(matches!(coercer.apply("0b11".into()).unwrap(), Value::Int(3)));
        let err = coercer.apply("102".into()).unwrap_err();
        assert_eq!(err.to_string(), "invalid literal for int() with base 2: '102'");
        assert!(err.is_value_mismatch());
    }

    #[test]
    fn test_int_parsing_edge_cases() {
        let kwargs = Kwargs::new();
        assert!(matches!(to_int(" -42 ".into(), &kwargs).unwrap(), Value::Int(-42)));
        assert!(matches!(to_int("1_000".into(), &kwargs).unwrap(), Value::Int(1000)));
        assert!(to_int("--1".into(), &kwargs).is_err());
        assert!(to_int("".into(), &kwargs).is_err());
        assert!(to_int(Value::Float(f64::NAN), &kwargs).is_err());
        assert!(to_int(Value::list([1]), &kwargs).unwrap_err().is_type_mismatch());
        assert!(matches!(
            to_int(Scalar::float32(2.7).into(), &kwargs).unwrap(),
            Value::Int(2)
        ));
    }

    #[test]
    fn test_explicit_base_needs_string() {
        let mut kwargs = Kwargs::new();
        kwargs.insert("base".to_string(), Value::Int(2));
        let err = to_int(Value::Int(3), &kwargs).unwrap_err();
        assert!(err.is_type_mismatch());
    }

    #[test]
    fn test_float_conversion() {
        assert!(matches!(to_float("2.5".into()).unwrap(), Value::Float(f) if f == 2.5));
        assert!(matches!(to_float(Value::Int(2)).unwrap(), Value::Float(f) if f == 2.0));
        let err = to_float("abc".into()).unwrap_err();
        assert_eq!(err.to_string(), "could not convert string to float: 'abc'");
    }

    #[test]
    fn test_coercion_takes_first_match() {
        let coercion = Coercion::new([
            coerce(ValueType::Float, Conversion::Int),
            coerce([ValueType::Float, ValueType::Int], Conversion::Str),
        ]);
        assert!(matches!(coercion.apply(Value::Float(1.5)).unwrap(), Value::Int(1)));
        assert_eq!(coercion.apply(Value::Int(3)).unwrap(), Value::from("3"));
        assert_eq!(coercion.apply(Value::None).unwrap(), Value::None);
    }

    #[test]
    fn test_coerce_string() {
        assert_eq!(coerce_string(&Value::tuple(["a", "b"])), "('a', 'b')");
        assert_eq!(coerce_string(&Value::from("plain")), "plain");
        assert_eq!(coerce_string(&Value::Float(1.0)), "1.0");
    }

    #[test]
    fn test_custom_conversion_errors_propagate() {
        let coercer = coerce(
            ValueType::Str,
            Conversion::custom("explode", |_, _| Err(Error::custom("boom"))),
        );
        assert_eq!(coercer.apply("x".into()).unwrap_err().to_string(), "boom");
        assert_eq!(format!("{:?}", coercer.target()), "Custom(explode)");
    }

    #[test]
    fn test_validate_kwargs() {
        let bad = coerce(ValueType::Str, Conversion::Float).kwarg("base", 2);
        assert!(bad.validate_config("x").is_err());
        let custom = coerce(ValueType::Str, Conversion::custom("c", |v, _| Ok(v))).kwarg("anything", 1);
        assert!(custom.validate_config("x").is_ok());
    }

    #[test]
    fn test_sequence_conversions() {
        assert_eq!(
            Conversion::Tuple.convert(Value::list([1, 2]), &Kwargs::new()).unwrap(),
            Value::tuple([1, 2])
        );
        assert_eq!(
            Conversion::List.convert("ab".into(), &Kwargs::new()).unwrap(),
            Value::list(["a", "b"])
        );
        assert!(Conversion::List.convert(Value::Int(1), &Kwargs::new()).is_err());
    }
}
