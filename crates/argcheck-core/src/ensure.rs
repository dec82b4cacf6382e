//! Normalizing preprocessors
//!
//! Each `ensure_*` function returns a [`Preprocessor`] that passes values
//! already of the target type through, converts the forms it understands,
//! and fails with a conversion error otherwise.
//!
//! Copyright (c) 2025 Argcheck Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, MismatchKind};
use crate::preprocess::Preprocessor;
use crate::value::time::{parse_timestamp, timestamp_from_nanos};
use crate::value::{DType, Number, Timezone, Value};

/// Upper-case strings; anything else is a type mismatch
pub fn ensure_upper_case() -> Preprocessor {
    Preprocessor::new("ensure_upper_case", |function, argument, value| match value {
        Value::Str(s) => Ok(Value::Str(s.to_uppercase())),
        other => Err(Error::conversion(
            MismatchKind::Type,
            format!(
                "{}() expected argument '{}' to be a string, but got {} instead.",
                function,
                argument,
                other.type_name()
            ),
        )),
    })
}

/// Accept dtypes and dtype names such as `"float64"` or `"<i4"`
pub fn ensure_dtype() -> Preprocessor {
    Preprocessor::new("ensure_dtype", |function, argument, value| {
        let dtype = match &value {
            Value::DType(dtype) => Some(*dtype),
            Value::Str(name) => DType::from_name(name),
            _ => None,
        };
        dtype.map(Value::DType).ok_or_else(|| {
            Error::conversion(
                MismatchKind::Type,
                format!(
                    "{}() couldn't convert argument {}={} to a numpy dtype.",
                    function,
                    argument,
                    value.repr()
                ),
            )
        })
    })
}

/// Accept timestamps, ISO-8601 strings and integer nanoseconds since the epoch
pub fn ensure_timestamp() -> Preprocessor {
    Preprocessor::new("ensure_timestamp", |function, argument, value| {
        let converted = match &value {
            Value::Timestamp(ts) => Ok(*ts),
            Value::Str(text) => parse_timestamp(text),
            Value::Int(nanos) => Ok(timestamp_from_nanos(*nanos)),
            Value::Scalar(s) if s.dtype() == DType::DateTime64 || s.dtype().is_integer() => {
                match s.number() {
                    Number::Int(nanos) => Ok(timestamp_from_nanos(nanos)),
                    Number::Float(_) => Err(format!("Cannot convert input {} to Timestamp", s)),
                }
            }
            other => Err(format!(
                "Cannot convert input {} of type {} to Timestamp",
                other.repr(),
                other.type_name()
            )),
        };
        converted.map(Value::Timestamp).map_err(|original| {
            Error::conversion(
                MismatchKind::Type,
                format!(
                    "{}() couldn't convert argument {}={} to a pandas Timestamp.\nOriginal error was: ValueError: {}",
                    function,
                    argument,
                    value.repr(),
                    original
                ),
            )
        })
    })
}

/// Accept timezones and timezone names such as `"UTC"` or `"+05:30"`
pub fn ensure_timezone() -> Preprocessor {
    Preprocessor::new("ensure_timezone", |function, argument, value| {
        let (timezone, kind) = match &value {
            Value::Timezone(tz) => (Some(*tz), MismatchKind::Type),
            Value::Str(name) => (Timezone::parse(name), MismatchKind::Value),
            _ => (None, MismatchKind::Type),
        };
        timezone.map(Value::Timezone).ok_or_else(|| {
            Error::conversion(
                kind,
                format!(
                    "{}() couldn't convert argument {}={} to a timezone.",
                    function,
                    argument,
                    value.repr()
                ),
            )
        })
    })
}
