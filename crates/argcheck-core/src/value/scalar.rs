//! Typed numeric scalars
//!
//! Copyright (c) 2025 Argcheck Team
//! Licensed under the Apache-2.0 license

use super::dtype::DType;
use std::cmp::Ordering;
use std::fmt;

/// A plain number, used to compare numeric values across representations
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    pub fn partial_cmp(&self, other: &Number) -> Option<Ordering> {
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            (Number::Int(a), Number::Float(b)) => cmp_int_float(a, b),
            (Number::Float(a), Number::Int(b)) => cmp_int_float(b, a).map(Ordering::reverse),
            (Number::Float(a), Number::Float(b)) => a.partial_cmp(&b),
        }
    }

    pub fn eq(&self, other: &Number) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

/// Compare an integer with a float without losing precision for large integers
fn cmp_int_float(i: i64, f: f64) -> Option<Ordering> {
    if f.is_nan() {
        return None;
    }
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        return Some(i.cmp(&(f as i64)));
    }
    (i as f64).partial_cmp(&f)
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(x) => write!(f, "{}", format_float(*x)),
        }
    }
}

/// Python-style float text: `3.0`, `2.5`, `nan`, `inf`
pub(crate) fn format_float(x: f64) -> String {
    if x.is_nan() {
        "nan".to_string()
    } else if x.is_infinite() {
        let text = if x > 0.0 { "inf" } else { "-inf" };
        text.to_string()
    } else {
        format!("{:?}", x)
    }
}

/// A numeric scalar that carries its element dtype, e.g. a 32-bit integer
#[derive(Debug, Clone, Copy)]
pub struct Scalar {
    dtype: DType,
    value: Number,
}

impl Scalar {
    /// Create a scalar; integer dtypes truncate floats, float dtypes widen integers
    pub fn new(dtype: DType, value: Number) -> Self {
        let value = match (dtype.is_integer(), value) {
            (true, Number::Float(f)) => Number::Int(f as i64),
            (false, Number::Int(i)) if dtype.is_float() => Number::Float(i as f64),
            (_, v) => v,
        };
        Self { dtype, value }
    }

    pub fn int64(value: i64) -> Self {
        Self::new(DType::Int64, Number::Int(value))
    }

    pub fn int32(value: i32) -> Self {
        Self::new(DType::Int32, Number::Int(value as i64))
    }

    pub fn float64(value: f64) -> Self {
        Self::new(DType::Float64, Number::Float(value))
    }

    pub fn float32(value: f32) -> Self {
        Self::new(DType::Float32, Number::Float(value as f64))
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn number(&self) -> Number {
        self.value
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.value.eq(&other.value)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dtype == DType::Bool {
            let truthy = self.value.as_f64() != 0.0;
            return f.write_str(if truthy { "True" } else { "False" });
        }
        write!(f, "{}", self.value)
    }
}
