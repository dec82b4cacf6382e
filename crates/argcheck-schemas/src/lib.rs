//! Argcheck Schemas - Declarative check documents
//!
//! This crate loads argument checks from YAML or JSON documents and compiles
//! them into the same [`argcheck_core::Preprocess`] decorator the builder API
//! produces.
//!
//! ## Quick Start
//!
//! ```rust
//! use argcheck_schemas::{CheckLoader, Format};
//! use argcheck_core::{Callable, Function, Signature, Value};
//!
//! let document = CheckLoader::new()
//!     .load_str("arguments:\n  x:\n    bounded: {lower: 1, upper: 5}\n", Format::Yaml)
//!     .unwrap();
//!
//! let inc = Function::new(Signature::new("foo").param("x"), |args| {
//!     Ok(Value::Int(args["x"].as_int().unwrap_or(0) + 1))
//! });
//! let foo = document.decorate(inc).unwrap();
//! assert_eq!(foo.call_positional(vec![Value::Int(3)]).unwrap(), Value::Int(4));
//! assert!(foo.call_positional(vec![Value::Int(6)]).is_err());
//! ```

pub mod document;
pub mod error;
pub mod loader;

pub use document::{ArgumentRule, BoundsRule, CheckDocument, CoerceRule, EnsureKind};
pub use error::{SchemaError, SchemaResult};
pub use loader::{CheckLoader, Format};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
