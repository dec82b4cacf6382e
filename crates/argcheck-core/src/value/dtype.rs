//! Element data types for scalars and arrays
//!
//! Copyright (c) 2025 Argcheck Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind codes understood by `expect_kinds`
pub const KIND_CODES: [char; 11] = ['b', 'i', 'u', 'f', 'c', 'm', 'M', 'O', 'S', 'U', 'V'];

/// Element data type of a [`Scalar`](super::Scalar) or [`NdArray`](super::NdArray)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float16,
    Float32,
    Float64,
    Complex64,
    Complex128,
    #[serde(rename = "datetime64[ns]")]
    DateTime64,
    Str,
    Object,
}

impl DType {
    /// Canonical name, e.g. `int64`
    pub fn name(&self) -> &'static str {
        match self {
            DType::Bool => "bool",
            DType::Int8 => "int8",
            DType::Int16 => "int16",
            DType::Int32 => "int32",
            DType::Int64 => "int64",
            DType::UInt8 => "uint8",
            DType::UInt16 => "uint16",
            DType::UInt32 => "uint32",
            DType::UInt64 => "uint64",
            DType::Float16 => "float16",
            DType::Float32 => "float32",
            DType::Float64 => "float64",
            DType::Complex64 => "complex64",
            DType::Complex128 => "complex128",
            DType::DateTime64 => "datetime64[ns]",
            DType::Str => "str",
            DType::Object => "object",
        }
    }

    /// Single-character kind code, independent of bit width
    pub fn kind(&self) -> char {
        match self {
            DType::Bool => 'b',
            DType::Int8 | DType::Int16 | DType::Int32 | DType::Int64 => 'i',
            DType::UInt8 | DType::UInt16 | DType::UInt32 | DType::UInt64 => 'u',
            DType::Float16 | DType::Float32 | DType::Float64 => 'f',
            DType::Complex64 | DType::Complex128 => 'c',
            DType::DateTime64 => 'M',
            DType::Str => 'U',
            DType::Object => 'O',
        }
    }

    /// Size of one element in bytes
    pub fn itemsize(&self) -> usize {
        match self {
            DType::Bool | DType::Int8 | DType::UInt8 => 1,
            DType::Int16 | DType::UInt16 | DType::Float16 => 2,
            DType::Int32 | DType::UInt32 | DType::Float32 => 4,
            DType::Int64 | DType::UInt64 | DType::Float64 | DType::Complex64 => 8,
            DType::DateTime64 | DType::Object => 8,
            DType::Complex128 => 16,
            DType::Str => 4,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self.kind(), 'i' | 'u' | 'b')
    }

    pub fn is_float(&self) -> bool {
        self.kind() == 'f'
    }

    /// Parse a dtype from its name or a type code such as `"i8"` or `"<f4"`
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        let stripped = name.trim_start_matches(&['<', '>', '=', '|'][..]);
        let dtype = match stripped {
            "bool" | "bool_" | "?" | "b1" => DType::Bool,
            "int8" | "i1" => DType::Int8,
            "int16" | "i2" => DType::Int16,
            "int32" | "i4" => DType::Int32,
            "int64" | "i8" | "int" => DType::Int64,
            "uint8" | "u1" => DType::UInt8,
            "uint16" | "u2" => DType::UInt16,
            "uint32" | "u4" => DType::UInt32,
            "uint64" | "u8" | "uint" => DType::UInt64,
            "float16" | "f2" | "half" => DType::Float16,
            "float32" | "f4" | "single" => DType::Float32,
            "float64" | "f8" | "float" | "double" => DType::Float64,
            "complex64" | "c8" => DType::Complex64,
            "complex128" | "c16" | "complex" => DType::Complex128,
            "datetime64[ns]" | "M8[ns]" | "datetime64" | "M8" => DType::DateTime64,
            "str" | "U" | "unicode" => DType::Str,
            "object" | "O" => DType::Object,
            _ => return None,
        };
        Some(dtype)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
