//! Dynamic values that flow through decorated calls
//!
//! A [`Value`] is whatever a caller passes for one argument. Checks inspect
//! its [`ValueType`], numeric representation, dtype and rank; coercers
//! replace it with a new value.
//!
//! Copyright (c) 2025 Argcheck Team
//! Licensed under the Apache-2.0 license

pub mod array;
pub mod dtype;
pub mod scalar;
pub mod time;

pub use array::NdArray;
pub use dtype::DType;
pub use scalar::{Number, Scalar};
pub use time::Timezone;

use chrono::{DateTime, FixedOffset};
use scalar::format_float;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// A dynamically typed argument value
#[derive(Debug, Clone)]
pub enum Value {
    /// The universal null sentinel
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Dict(BTreeMap<String, Value>),
    Scalar(Scalar),
    Array(NdArray),
    DType(DType),
    Timestamp(DateTime<FixedOffset>),
    Timezone(Timezone),
    Object(Object),
}

/// An instance of a user-defined class
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub class: String,
    pub attrs: BTreeMap<String, Value>,
}

impl Object {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            attrs: BTreeMap::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}

/// Runtime type tag of a [`Value`], the unit of type-membership checks
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    None,
    Bool,
    Int,
    Float,
    Str,
    List,
    Tuple,
    Dict,
    Scalar(DType),
    Array,
    DType,
    Timestamp,
    Timezone,
    Object(String),
}

impl ValueType {
    /// Qualified type name used in error messages
    pub fn name(&self) -> String {
        match self {
            ValueType::None => "NoneType".to_string(),
            ValueType::Bool => "bool".to_string(),
            ValueType::Int => "int".to_string(),
            ValueType::Float => "float".to_string(),
            ValueType::Str => "str".to_string(),
            ValueType::List => "list".to_string(),
            ValueType::Tuple => "tuple".to_string(),
            ValueType::Dict => "dict".to_string(),
            ValueType::Scalar(dtype) => format!("numpy.{}", dtype),
            ValueType::Array => "numpy.ndarray".to_string(),
            ValueType::DType => "numpy.dtype".to_string(),
            ValueType::Timestamp => "Timestamp".to_string(),
            ValueType::Timezone => "tzinfo".to_string(),
            ValueType::Object(class) => class.clone(),
        }
    }

    /// Whether values of this type are also instances of `other`
    ///
    /// `bool` is a subtype of `int`, and a `float64` scalar is a subtype of `float`.
    pub fn is_subtype_of(&self, other: &ValueType) -> bool {
        self == other
            || matches!(
                (self, other),
                (ValueType::Bool, ValueType::Int)
                    | (ValueType::Scalar(DType::Float64), ValueType::Float)
            )
    }

    /// Parse a type name as written in check documents
    pub fn from_name(name: &str) -> Option<Self> {
        let ty = match name.trim() {
            "None" | "NoneType" | "null" => ValueType::None,
            "bool" => ValueType::Bool,
            "int" => ValueType::Int,
            "float" => ValueType::Float,
            "str" | "string" => ValueType::Str,
            "list" => ValueType::List,
            "tuple" => ValueType::Tuple,
            "dict" => ValueType::Dict,
            "ndarray" | "numpy.ndarray" | "array" => ValueType::Array,
            "dtype" | "numpy.dtype" => ValueType::DType,
            "Timestamp" | "timestamp" => ValueType::Timestamp,
            "tzinfo" | "timezone" => ValueType::Timezone,
            other => {
                if let Some(dtype) = other.strip_prefix("numpy.").and_then(DType::from_name) {
                    ValueType::Scalar(dtype)
                } else if !other.is_empty() && other.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.') {
                    ValueType::Object(other.to_string())
                } else {
                    return None;
                }
            }
        };
        Some(ty)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl Value {
    /// Build a tuple from anything convertible to values
    pub fn tuple<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Build a list from anything convertible to values
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::None => ValueType::None,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Str(_) => ValueType::Str,
            Value::List(_) => ValueType::List,
            Value::Tuple(_) => ValueType::Tuple,
            Value::Dict(_) => ValueType::Dict,
            Value::Scalar(s) => ValueType::Scalar(s.dtype()),
            Value::Array(_) => ValueType::Array,
            Value::DType(_) => ValueType::DType,
            Value::Timestamp(_) => ValueType::Timestamp,
            Value::Timezone(_) => ValueType::Timezone,
            Value::Object(o) => ValueType::Object(o.class.clone()),
        }
    }

    /// Type-membership: the runtime type is `ty` or one of its subtypes
    pub fn is_instance(&self, ty: &ValueType) -> bool {
        self.value_type().is_subtype_of(ty)
    }

    pub fn type_name(&self) -> String {
        self.value_type().name()
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Scalar(s) => match s.number() {
                Number::Int(i) => Some(i),
                Number::Float(_) => None,
            },
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        self.as_number().map(|n| n.as_f64())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&NdArray> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Numeric view of booleans, integers, floats and scalars
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Bool(b) => Some(Number::Int(*b as i64)),
            Value::Int(i) => Some(Number::Int(*i)),
            Value::Float(f) => Some(Number::Float(*f)),
            Value::Scalar(s) => Some(s.number()),
            _ => None,
        }
    }

    /// Element dtype of scalars and arrays
    pub fn dtype(&self) -> Option<DType> {
        match self {
            Value::Scalar(s) => Some(s.dtype()),
            Value::Array(a) => Some(a.dtype()),
            _ => None,
        }
    }

    /// Array rank; scalars have rank 0, other values have none
    pub fn ndim(&self) -> Option<usize> {
        match self {
            Value::Scalar(_) => Some(0),
            Value::Array(a) => Some(a.ndim()),
            _ => None,
        }
    }

    /// Truthiness, as used by boolean conversion
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) | Value::Tuple(items) => !items.is_empty(),
            Value::Dict(map) => !map.is_empty(),
            Value::Scalar(s) => s.number().as_f64() != 0.0,
            Value::Array(a) => a.size() != 0,
            _ => true,
        }
    }

    /// Ordering across numeric representations, strings and timestamps
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
            (Value::Tuple(a), Value::Tuple(b)) | (Value::List(a), Value::List(b)) => {
                for (x, y) in a.iter().zip(b) {
                    match x.compare(y)? {
                        Ordering::Equal => continue,
                        unequal => return Some(unequal),
                    }
                }
                Some(a.len().cmp(&b.len()))
            }
            _ => {
                let (a, b) = (self.as_number()?, other.as_number()?);
                a.partial_cmp(&b)
            }
        }
    }

    /// Debugging representation used for the actual value in messages
    pub fn repr(&self) -> String {
        match self {
            Value::None => "None".to_string(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
            Value::Str(s) => quote(s),
            Value::List(items) => format!("[{}]", join_repr(items)),
            Value::Tuple(items) if items.len() == 1 => format!("({},)", items[0].repr()),
            Value::Tuple(items) => format!("({})", join_repr(items)),
            Value::Dict(map) => {
                let entries: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("{}: {}", quote(k), v.repr()))
                    .collect();
                format!("{{{}}}", entries.join(", "))
            }
            Value::Scalar(s) => s.to_string(),
            Value::Array(a) => format!(
                "array(shape=({}), dtype={})",
                a.shape()
                    .iter()
                    .map(|d| d.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
                a.dtype()
            ),
            Value::DType(d) => format!("dtype({})", quote(d.name())),
            Value::Timestamp(t) => format!("Timestamp({})", quote(&t.to_rfc3339())),
            Value::Timezone(tz) => format!("<timezone {}>", tz),
            Value::Object(o) => format!("<{} object>", o.class),
        }
    }
}

fn quote(s: &str) -> String {
    if s.contains('\'') && !s.contains('"') {
        format!("\"{}\"", s)
    } else {
        format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

fn join_repr(items: &[Value]) -> String {
    items.iter().map(Value::repr).collect::<Vec<_>>().join(", ")
}

/// Text form: strings unquoted, everything else as its representation
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::DType(d) => f.write_str(d.name()),
            Value::Timestamp(t) => f.write_str(&t.to_rfc3339()),
            Value::Timezone(tz) => write!(f, "{}", tz),
            other => f.write_str(&other.repr()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Dict(a), Value::Dict(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::DType(a), Value::DType(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Timezone(a), Value::Timezone(b)) => a.offset() == b.offset(),
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a.eq(&b),
                _ => false,
            },
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<NdArray> for Value {
    fn from(a: NdArray) -> Self {
        Value::Array(a)
    }
}

impl From<DType> for Value {
    fn from(d: DType) -> Self {
        Value::DType(d)
    }
}

impl From<Timezone> for Value {
    fn from(tz: Timezone) -> Self {
        Value::Timezone(tz)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(t: DateTime<FixedOffset>) -> Self {
        Value::Timestamp(t)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::None, Into::into)
    }
}

/// JSON documents map onto values: arrays become lists, objects become dicts
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::None,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => Value::list(items),
            serde_json::Value::Object(map) => {
                Value::Dict(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}
