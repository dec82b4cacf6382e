//! Argcheck Core - Declarative argument validation and coercion
//!
//! This crate wraps callables with per-parameter checks that run before the
//! wrapped function is entered. A check either accepts the argument, replaces
//! it (coercion, custom preprocessing) or rejects the whole call with a
//! uniform message.
//!
//! # Main Components
//!
//! - **Argument Binder**: [`Signature`] maps positional and keyword arguments
//!   onto declared parameters and materializes defaults
//! - **Validators**: [`Check`] covers type sets, numeric kinds, bounds,
//!   allowed elements, array rank and dtypes, with an optional wrapper
//! - **Coercers**: [`coerce`] and [`coerce_types`] convert matching values
//! - **Custom preprocessors**: [`Preprocessor`], [`optionally`] and [`call`]
//! - **Decorator**: [`Preprocess`] applies all of the above to a [`Callable`]
//!
//! # Example
//!
//! ```
//! use argcheck_core::{expect_types, optional, Callable, Function, Signature, Value, ValueType};
//!
//! let foo = Function::new(
//!     Signature::new("foo").param("x").param_with_default("y", Value::None),
//!     |args| Ok(Value::tuple([args["x"].clone(), args["y"].clone()])),
//! );
//! let foo = expect_types([("y", optional([ValueType::Str, ValueType::Int]))])
//!     .apply(foo)
//!     .unwrap();
//!
//! assert!(foo.call_positional(vec![Value::Int(3)]).is_ok());
//! assert!(foo.call_positional(vec![Value::Int(3), Value::from("a")]).is_ok());
//! assert!(foo.call_positional(vec![Value::Int(3), Value::list([3])]).is_err());
//! ```

pub mod check;
pub mod coerce;
pub mod ensure;
pub mod error;
pub mod expect;
pub mod function;
pub mod preprocess;
pub mod report;
pub mod signature;
pub mod value;

// Re-export main types for convenience
pub use error::{Error, MismatchKind, Result};
pub use report::{error_keywords, Mismatch, Rejection};

pub use value::{DType, NdArray, Number, Object, Scalar, Timezone, Value, ValueType};

pub use signature::{BoundArguments, CallArgs, Parameter, Signature};
pub use function::{Callable, Function};

pub use check::{optional, Bounds, Check, TypeSet};
pub use coerce::{coerce, coerce_string, coerce_types, Coercer, Coercion, Conversion, Kwargs};
pub use preprocess::{
    call, optionally, preprocess, reject_keywords, ParamSpec, Preprocess, Preprocessed, Preprocessor,
};

pub use ensure::{ensure_dtype, ensure_timestamp, ensure_timezone, ensure_upper_case};
pub use expect::{
    expect_bounded, expect_dimensions, expect_dtypes, expect_element, expect_kinds,
    expect_strictly_bounded, expect_types,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
