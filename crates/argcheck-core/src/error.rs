//! Error types for the argcheck core library
//!
//! Every failure surfaced by a decorated call is an [`Error`]. Check and
//! conversion failures additionally report a [`MismatchKind`] so callers can
//! tell a wrong type apart from a wrong value.

use crate::report::Mismatch;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main error type for argcheck operations
#[derive(Error, Debug)]
pub enum Error {
    /// A declared check rejected an argument
    #[error("{0}")]
    Mismatch(Mismatch),

    /// A conversion or `ensure_*` preprocessor could not convert its input
    #[error("{message}")]
    Conversion {
        kind: MismatchKind,
        message: String,
    },

    /// A keyword argument the decorator refuses was passed
    #[error("{message}")]
    RejectedKeyword {
        function: String,
        keyword: String,
        message: String,
    },

    /// More positional arguments than declared parameters
    #[error("{function}() takes {expected} positional arguments but {given} were given")]
    TooManyPositional {
        function: String,
        expected: usize,
        given: usize,
    },

    /// Keyword argument that matches no declared parameter
    #[error("{function}() got an unexpected keyword argument '{keyword}'")]
    UnexpectedKeyword { function: String, keyword: String },

    /// Parameter supplied both positionally and by keyword, or twice by keyword
    #[error("{function}() got multiple values for argument '{argument}'")]
    DuplicateArgument { function: String, argument: String },

    /// Parameters neither supplied nor defaulted
    #[error("{function}() missing {} required argument{}: {}", .arguments.len(), plural(.arguments.len()), quote_names(.arguments))]
    MissingArguments {
        function: String,
        arguments: Vec<String>,
    },

    /// Invalid decorator or signature configuration, raised at decoration time
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Array construction with inconsistent shape and data
    #[error("Invalid array: {message}")]
    InvalidArray { message: String },

    /// Error raised by a user-supplied preprocessor or conversion
    #[error("{message}")]
    Custom {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// The two families of rejected arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MismatchKind {
    /// Wrong type, numeric kind or dtype
    Type,
    /// Out of bounds, not an allowed element, or wrong dimensionality
    Value,
}

impl fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MismatchKind::Type => write!(f, "TypeError"),
            MismatchKind::Value => write!(f, "ValueError"),
        }
    }
}

impl Error {
    /// Mismatch kind of a check or conversion failure
    pub fn kind(&self) -> Option<MismatchKind> {
        match self {
            Error::Mismatch(mismatch) => Some(mismatch.kind),
            Error::Conversion { kind, .. } => Some(*kind),
            Error::RejectedKeyword { .. } => Some(MismatchKind::Type),
            _ => None,
        }
    }

    pub fn is_type_mismatch(&self) -> bool {
        self.kind() == Some(MismatchKind::Type)
    }

    pub fn is_value_mismatch(&self) -> bool {
        self.kind() == Some(MismatchKind::Value)
    }

    /// Structured mismatch details, if this error came from a check
    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            Error::Mismatch(mismatch) => Some(mismatch),
            _ => None,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a conversion error
    pub fn conversion(kind: MismatchKind, message: impl Into<String>) -> Self {
        Error::Conversion {
            kind,
            message: message.into(),
        }
    }

    /// Create an error for use inside custom preprocessors
    pub fn custom(message: impl Into<String>) -> Self {
        Error::Custom {
            message: message.into(),
            source: None,
        }
    }
}

impl From<Mismatch> for Error {
    fn from(mismatch: Mismatch) -> Self {
        Error::Mismatch(mismatch)
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Custom {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn quote_names(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{}'", n)).collect();
    match quoted.len() {
        0 => String::new(),
        1 => quoted[0].clone(),
        n => format!("{} and {}", quoted[..n - 1].join(", "), quoted[n - 1]),
    }
}
