//! Custom preprocessors and per-parameter specs
//!
//! A [`Preprocessor`] receives the owning function's name, the argument name
//! and the bound value, and returns the value to pass on. Returning an error
//! rejects the call; the error reaches the caller unchanged.
//!
//! Copyright (c) 2025 Argcheck Team
//! Licensed under the Apache-2.0 license

pub mod decorator;

pub use decorator::{preprocess, reject_keywords, Preprocess, Preprocessed};

use crate::check::{Check, TypeSet};
use crate::coerce::{Coercer, Coercion};
use crate::error::Result;
use crate::report::Rejection;
use crate::value::{Value, ValueType};
use std::fmt;
use std::sync::Arc;

type PreprocessorFn = dyn Fn(&str, &str, Value) -> Result<Value> + Send + Sync;

/// A user-supplied `(function, argument, value) -> value` transform
#[derive(Clone)]
pub struct Preprocessor {
    name: String,
    func: Arc<PreprocessorFn>,
}

impl Preprocessor {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str, &str, Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, function: &str, argument: &str, value: Value) -> Result<Value> {
        (self.func)(function, argument, value)
    }
}

impl fmt::Debug for Preprocessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Preprocessor({})", self.name)
    }
}

/// Run the check as a preprocessor, raising the standard message
impl From<Check> for Preprocessor {
    fn from(check: Check) -> Self {
        let name = check.describe();
        Preprocessor::new(name, move |function, argument, value| {
            check.apply(function, argument, value)
        })
    }
}

/// Skip `preprocessor` when the bound value is the null sentinel
pub fn optionally(preprocessor: Preprocessor) -> Preprocessor {
    let name = format!("optionally({})", preprocessor.name);
    Preprocessor::new(name, move |function, argument, value| {
        if value.is_none() {
            Ok(value)
        } else {
            preprocessor.apply(function, argument, value)
        }
    })
}

/// Adapt a single-value check into a preprocessor
///
/// The function sees only the value; a [`Rejection`] it returns is reported
/// with the standard message naming the owning function and argument.
///
/// ```
/// use argcheck_core::{call, Rejection, Value};
///
/// let even = call("even", |value: Value| match value.as_int() {
///     Some(i) if i % 2 == 0 => Ok(value),
///     _ => Err(Rejection::value_mismatch("an even integer", value.repr())),
/// });
/// let err = even.apply("half", "n", Value::Int(3)).unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "half() expected an even integer for argument 'n', but got 3 instead."
/// );
/// ```
pub fn call<F>(name: impl Into<String>, func: F) -> Preprocessor
where
    F: Fn(Value) -> std::result::Result<Value, Rejection> + Send + Sync + 'static,
{
    Preprocessor::new(name, move |function, argument, value| {
        func(value).map_err(|rejection| rejection.into_error(function, argument))
    })
}

/// What a decorator does with one parameter
#[derive(Debug, Clone)]
pub enum ParamSpec {
    /// Reject values the check does not accept
    Validate(Check),
    /// Convert matching values before any validation
    Coerce(Coercion),
    /// Replace the value with whatever the preprocessor returns
    Custom(Preprocessor),
}

impl ParamSpec {
    pub(crate) fn is_coercion(&self) -> bool {
        matches!(self, ParamSpec::Coerce(_))
    }
}

impl From<Check> for ParamSpec {
    fn from(check: Check) -> Self {
        ParamSpec::Validate(check)
    }
}

impl From<ValueType> for ParamSpec {
    fn from(ty: ValueType) -> Self {
        ParamSpec::Validate(ty.into())
    }
}

impl From<TypeSet> for ParamSpec {
    fn from(types: TypeSet) -> Self {
        ParamSpec::Validate(types.into())
    }
}

impl<const N: usize> From<[ValueType; N]> for ParamSpec {
    fn from(types: [ValueType; N]) -> Self {
        ParamSpec::Validate(types.into())
    }
}

impl From<Coercer> for ParamSpec {
    fn from(coercer: Coercer) -> Self {
        ParamSpec::Coerce(coercer.into())
    }
}

impl From<Coercion> for ParamSpec {
    fn from(coercion: Coercion) -> Self {
        ParamSpec::Coerce(coercion)
    }
}

impl From<Preprocessor> for ParamSpec {
    fn from(preprocessor: Preprocessor) -> Self {
        ParamSpec::Custom(preprocessor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn must_be_int() -> Preprocessor {
        Preprocessor::new("must_be_int", |_, _, value| match value {
            Value::Int(_) => Ok(value),
            _ => Err(Error::custom("arg must be int")),
        })
    }

    #[test]
    fn test_optionally_skips_null() {
        let pre = optionally(must_be_int());
        assert!(pre.apply("f", "a", Value::None).unwrap().is_none());
        assert_eq!(pre.apply("f", "a", Value::Int(1)).unwrap(), Value::Int(1));
        let err = pre.apply("f", "a", Value::from("a")).unwrap_err();
        assert_eq!(err.to_string(), "arg must be int");
        assert_eq!(pre.name(), "optionally(must_be_int)");
    }

    #[test]
    fn test_check_as_preprocessor() {
        let pre = Preprocessor::from(Check::from(ValueType::Str));
        let err = pre.apply("foo", "x", Value::Int(1)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "foo() expected a value of type str for argument 'x', but got int instead."
        );
    }

    #[test]
    fn test_call_keeps_accepted_value() {
        let upper = call("upper", |value: Value| match value.as_str() {
            Some(s) => Ok(Value::from(s.to_uppercase())),
            None => Err(Rejection::type_mismatch("a string", value.type_name())),
        });
        assert_eq!(upper.apply("f", "s", "abc".into()).unwrap(), Value::from("ABC"));
        assert!(upper.apply("f", "s", Value::Int(1)).unwrap_err().is_type_mismatch());
    }
}
