//! Validator family
//!
//! A [`Check`] is an immutable predicate over one value together with the
//! description used when it rejects. Checks never modify their input; the
//! decorator dispatches on the variant tag.
//!
//! Copyright (c) 2025 Argcheck Team
//! Licensed under the Apache-2.0 license

pub mod bounds;

pub use bounds::Bounds;

use crate::coerce::coerce_string;
use crate::error::{Error, MismatchKind, Result};
use crate::report::Rejection;
use crate::value::dtype::KIND_CODES;
use crate::value::{DType, Value, ValueType};

/// A set of acceptable types; membership of any one type accepts
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeSet(Vec<ValueType>);

impl TypeSet {
    pub fn new<I: IntoIterator<Item = ValueType>>(types: I) -> Self {
        let mut set = Vec::new();
        for ty in types {
            if !set.contains(&ty) {
                set.push(ty);
            }
        }
        Self(set)
    }

    pub fn types(&self) -> &[ValueType] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Type-membership of a value's runtime type
    pub fn matches(&self, value: &Value) -> bool {
        self.0.iter().any(|ty| value.is_instance(ty))
    }

    /// `int or str`
    pub fn describe(&self) -> String {
        self.0
            .iter()
            .map(ValueType::name)
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

impl From<ValueType> for TypeSet {
    fn from(ty: ValueType) -> Self {
        TypeSet(vec![ty])
    }
}

impl<const N: usize> From<[ValueType; N]> for TypeSet {
    fn from(types: [ValueType; N]) -> Self {
        TypeSet::new(types)
    }
}

impl From<Vec<ValueType>> for TypeSet {
    fn from(types: Vec<ValueType>) -> Self {
        TypeSet::new(types)
    }
}

/// A single-argument validator
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    /// Runtime type is one of the set
    Types(TypeSet),
    /// Dtype kind code is one of the listed codes
    Kinds(Vec<char>),
    /// `lower <= value <= upper`
    Bounded(Bounds),
    /// `lower < value < upper`
    StrictlyBounded(Bounds),
    /// Value equals one of the allowed elements
    Element(Vec<Value>),
    /// Array rank equals the given number
    Dimensions(usize),
    /// Dtype is one of the set
    Dtypes(Vec<DType>),
    /// The null sentinel, or whatever the inner check accepts
    Optional(Box<Check>),
}

impl Check {
    /// Accept or reject a value; never modifies it
    pub fn evaluate(&self, value: &Value) -> std::result::Result<(), Rejection> {
        match self {
            Check::Types(types) => {
                if types.matches(value) {
                    Ok(())
                } else {
                    Err(Rejection::type_mismatch(self.describe(), value.type_name()))
                }
            }
            Check::Kinds(kinds) => match value.dtype() {
                Some(dtype) if kinds.contains(&dtype.kind()) => Ok(()),
                Some(dtype) => Err(Rejection::type_mismatch(
                    self.describe(),
                    format!("'{}'", dtype.kind()),
                )),
                None => Err(Rejection::type_mismatch(self.describe(), "no dtype")),
            },
            Check::Bounded(bounds) => evaluate_bounds(self, bounds, value, false),
            Check::StrictlyBounded(bounds) => evaluate_bounds(self, bounds, value, true),
            Check::Element(allowed) => {
                if allowed.iter().any(|candidate| candidate == value) {
                    Ok(())
                } else {
                    Err(Rejection::value_mismatch(self.describe(), value.repr()))
                }
            }
            Check::Dimensions(expected) => match value.ndim() {
                Some(ndim) if ndim == *expected => Ok(()),
                Some(ndim) => Err(Rejection::value_mismatch(self.describe(), describe_rank(ndim))),
                None => Err(Rejection::type_mismatch(self.describe(), value.type_name())),
            },
            Check::Dtypes(dtypes) => match value.dtype() {
                Some(dtype) if dtypes.contains(&dtype) => Ok(()),
                Some(dtype) => Err(Rejection::type_mismatch(
                    self.describe(),
                    format!("'{}'", dtype.name()),
                )),
                None => Err(Rejection::type_mismatch(self.describe(), "no dtype")),
            },
            Check::Optional(inner) => {
                if value.is_none() {
                    return Ok(());
                }
                inner.evaluate(value).map_err(|rejection| Rejection {
                    expected: self.describe(),
                    ..rejection
                })
            }
        }
    }

    pub fn accepts(&self, value: &Value) -> bool {
        self.evaluate(value).is_ok()
    }

    /// What the check expects, as it appears after "expected" in messages
    pub fn describe(&self) -> String {
        match self {
            Check::Types(types) => format!("a value of type {}", types.describe()),
            Check::Kinds(kinds) => format!("a numpy object of kind {}", quote_join(kinds.iter())),
            Check::Bounded(bounds) => format!("a value {}", bounds.predicate(false)),
            Check::StrictlyBounded(bounds) => format!("a value {}", bounds.predicate(true)),
            Check::Element(allowed) => {
                format!("a value in {}", coerce_string(&Value::Tuple(allowed.clone())))
            }
            Check::Dimensions(ndim) => format!("a {}-D array", ndim),
            Check::Dtypes(dtypes) => format!(
                "a value with dtype {}",
                quote_join(dtypes.iter().map(|d| d.name()))
            ),
            Check::Optional(inner) => match inner.as_ref() {
                Check::Types(types) => {
                    format!("a value of type {} or NoneType", types.describe())
                }
                other => format!("None or {}", other.describe()),
            },
        }
    }

    /// Error kind raised when the check rejects a non-null value
    pub fn kind(&self) -> MismatchKind {
        match self {
            Check::Types(_) | Check::Kinds(_) | Check::Dtypes(_) => MismatchKind::Type,
            Check::Bounded(_)
            | Check::StrictlyBounded(_)
            | Check::Element(_)
            | Check::Dimensions(_) => MismatchKind::Value,
            Check::Optional(inner) => inner.kind(),
        }
    }

    /// Wrap in [`Check::Optional`] unless already optional
    pub fn optional(self) -> Check {
        match self {
            Check::Optional(_) => self,
            other => Check::Optional(Box::new(other)),
        }
    }

    /// Run the check against one named value, raising the standard message
    ///
    /// Useful inside custom preprocessors that combine several checks.
    pub fn apply(&self, function: &str, argument: &str, value: Value) -> Result<Value> {
        match self.evaluate(&value) {
            Ok(()) => Ok(value),
            Err(rejection) => Err(rejection.into_error(function, argument)),
        }
    }

    /// Decoration-time sanity checks on the check's own configuration
    pub(crate) fn validate_config(&self, factory: &str, argument: &str) -> Result<()> {
        let problem = match self {
            Check::Types(types) if types.is_empty() => Some("at least one type".to_string()),
            Check::Kinds(kinds) if kinds.is_empty() => Some("at least one kind code".to_string()),
            Check::Kinds(kinds) => kinds
                .iter()
                .find(|k| !KIND_CODES.contains(*k))
                .map(|k| format!("a known dtype kind code, not '{}'", k)),
            Check::Bounded(bounds) | Check::StrictlyBounded(bounds) => bounds.validate().err(),
            Check::Element(allowed) if allowed.is_empty() => {
                Some("a non-empty collection of elements".to_string())
            }
            Check::Dtypes(dtypes) if dtypes.is_empty() => Some("at least one dtype".to_string()),
            Check::Optional(inner) => return inner.validate_config(factory, argument),
            _ => None,
        };
        match problem {
            Some(problem) => Err(Error::configuration(format!(
                "{}() expected {} for argument '{}'",
                factory, problem, argument
            ))),
            None => Ok(()),
        }
    }
}

fn evaluate_bounds(
    check: &Check,
    bounds: &Bounds,
    value: &Value,
    strict: bool,
) -> std::result::Result<(), Rejection> {
    match bounds.contains(value, strict) {
        Some(true) => Ok(()),
        Some(false) => Err(Rejection::value_mismatch(check.describe(), value.repr())),
        None => Err(Rejection::type_mismatch(check.describe(), value.repr())),
    }
}

fn describe_rank(ndim: usize) -> String {
    if ndim == 0 {
        "scalar".to_string()
    } else {
        format!("a {}-D array", ndim)
    }
}

fn quote_join<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items
        .map(|item| format!("'{}'", item))
        .collect::<Vec<_>>()
        .join(" or ")
}

impl From<ValueType> for Check {
    fn from(ty: ValueType) -> Self {
        Check::Types(ty.into())
    }
}

impl From<TypeSet> for Check {
    fn from(types: TypeSet) -> Self {
        Check::Types(types)
    }
}

impl<const N: usize> From<[ValueType; N]> for Check {
    fn from(types: [ValueType; N]) -> Self {
        Check::Types(types.into())
    }
}

/// Accept the null sentinel or any of the given types
pub fn optional(types: impl Into<TypeSet>) -> Check {
    Check::Optional(Box::new(Check::Types(types.into())))
}
