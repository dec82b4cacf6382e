//! `expect_*` decorator factories
//!
//! Each factory takes `(parameter, configuration)` pairs and returns a
//! [`Preprocess`] whose parameters all get the same family of check. Bad
//! configuration surfaces when the decorator is applied.
//!
//! ```
//! use argcheck_core::{expect_bounded, Callable, Function, Signature, Value};
//!
//! let inc = Function::new(Signature::new("foo").param("x"), |args| {
//!     Ok(Value::Int(args["x"].as_int().unwrap_or(0) + 1))
//! });
//! let foo = expect_bounded([("x", (1, 5))]).apply(inc).unwrap();
//!
//! assert_eq!(foo.call_positional(vec![Value::Int(3)]).unwrap(), Value::Int(4));
//! let err = foo.call_positional(vec![Value::Int(6)]).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "foo() expected a value inclusively between 1 and 5 for argument 'x', but got 6 instead."
//! );
//! ```
//!
//! Copyright (c) 2025 Argcheck Team
//! Licensed under the Apache-2.0 license

use crate::check::{Bounds, Check};
use crate::preprocess::Preprocess;
use crate::value::{DType, Value};

fn factory<I, N, T, F>(name: &str, named: I, to_check: F) -> Preprocess
where
    I: IntoIterator<Item = (N, T)>,
    N: Into<String>,
    F: Fn(T) -> Check,
{
    named
        .into_iter()
        .fold(Preprocess::new().factory(name), |decorator, (arg, config)| {
            decorator.arg(arg, to_check(config))
        })
}

/// Type-membership per argument; accepts type sets and `optional(...)`
pub fn expect_types<I, N, C>(named: I) -> Preprocess
where
    I: IntoIterator<Item = (N, C)>,
    N: Into<String>,
    C: Into<Check>,
{
    let mut decorator = Preprocess::new().factory("expect_types");
    for (name, check) in named {
        let name = name.into();
        let check = check.into();
        let is_type_check = match &check {
            Check::Types(_) => true,
            Check::Optional(inner) => matches!(inner.as_ref(), Check::Types(_)),
            _ => false,
        };
        if !is_type_check {
            decorator = decorator.problem(format!(
                "expect_types() expected a type or a tuple of types for argument '{}', but got {} instead",
                name,
                check.describe()
            ));
        }
        decorator = decorator.arg(name, check);
    }
    decorator
}

/// Numeric kind per argument, as a string of kind codes (`"i"`, `"iu"`)
pub fn expect_kinds<I, N, K>(named: I) -> Preprocess
where
    I: IntoIterator<Item = (N, K)>,
    N: Into<String>,
    K: AsRef<str>,
{
    factory("expect_kinds", named, |kinds: K| {
        Check::Kinds(kinds.as_ref().chars().collect())
    })
}

/// Inclusive `(lower, upper)` bounds per argument; `Value::None` leaves a side open
pub fn expect_bounded<I, N, B>(named: I) -> Preprocess
where
    I: IntoIterator<Item = (N, B)>,
    N: Into<String>,
    B: Into<Bounds>,
{
    factory("expect_bounded", named, |bounds: B| Check::Bounded(bounds.into()))
}

/// Exclusive `(lower, upper)` bounds per argument
pub fn expect_strictly_bounded<I, N, B>(named: I) -> Preprocess
where
    I: IntoIterator<Item = (N, B)>,
    N: Into<String>,
    B: Into<Bounds>,
{
    factory("expect_strictly_bounded", named, |bounds: B| {
        Check::StrictlyBounded(bounds.into())
    })
}

/// Allowed elements per argument
pub fn expect_element<I, N, E, V>(named: I) -> Preprocess
where
    I: IntoIterator<Item = (N, E)>,
    N: Into<String>,
    E: IntoIterator<Item = V>,
    V: Into<Value>,
{
    factory("expect_element", named, |elements: E| {
        Check::Element(elements.into_iter().map(Into::into).collect())
    })
}

/// Array rank per argument
pub fn expect_dimensions<I, N>(named: I) -> Preprocess
where
    I: IntoIterator<Item = (N, usize)>,
    N: Into<String>,
{
    factory("expect_dimensions", named, Check::Dimensions)
}

/// Allowed dtypes per argument
pub fn expect_dtypes<I, N, D>(named: I) -> Preprocess
where
    I: IntoIterator<Item = (N, D)>,
    N: Into<String>,
    D: IntoIterator<Item = DType>,
{
    factory("expect_dtypes", named, |dtypes: D| {
        Check::Dtypes(dtypes.into_iter().collect())
    })
}
