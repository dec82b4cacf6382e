//! Uniform rejection messages
//!
//! Every rejected argument is reported as
//! `<function>() expected <description> for argument '<name>', but got <actual> instead.`
//! The fixed vocabulary lives in [`error_keywords`] so tests (and
//! translations) can depend on it instead of on literal strings.
//!
//! Copyright (c) 2025 Argcheck Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, MismatchKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Keyword fragments the mismatch message is assembled from
pub mod error_keywords {
    pub const EXPECTED: &str = "expected";
    pub const FOR_ARGUMENT: &str = "for argument";
    pub const BUT_GOT: &str = "but got";
    pub const INSTEAD: &str = "instead";

    /// All fragments, in the order they appear in a message
    pub const ALL: [&str; 4] = [EXPECTED, FOR_ARGUMENT, BUT_GOT, INSTEAD];
}

/// A rejected argument, with everything needed to render the message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    /// Type-mismatch or value-mismatch
    pub kind: MismatchKind,
    /// Name of the decorated function
    pub function: String,
    /// Name of the offending parameter
    pub argument: String,
    /// What the check expected, e.g. `a value of type int or str`
    pub expected: String,
    /// What was received, e.g. `list`
    pub actual: String,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use error_keywords::*;
        write!(
            f,
            "{}() {} {} {} '{}', {} {} {}.",
            self.function,
            EXPECTED,
            self.expected,
            FOR_ARGUMENT,
            self.argument,
            BUT_GOT,
            self.actual,
            INSTEAD
        )
    }
}

/// A check failure before it is attached to a function and argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub kind: MismatchKind,
    pub expected: String,
    pub actual: String,
}

impl Rejection {
    pub fn new(kind: MismatchKind, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            kind,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(MismatchKind::Type, expected, actual)
    }

    pub fn value_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(MismatchKind::Value, expected, actual)
    }

    /// Attach the call site and turn the rejection into an [`Error`]
    pub fn into_error(self, function: &str, argument: &str) -> Error {
        log::trace!(
            "{}() rejected argument '{}': expected {}, got {}",
            function,
            argument,
            self.expected,
            self.actual
        );
        Error::Mismatch(Mismatch {
            kind: self.kind,
            function: function.to_string(),
            argument: argument.to_string(),
            expected: self.expected,
            actual: self.actual,
        })
    }
}
