//! Error types for check documents
//!
//! Copyright (c) 2025 Argcheck Team
//! Licensed under the Apache-2.0 license

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while loading or compiling a check document
#[derive(Error, Debug)]
pub enum SchemaError {
    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML file '{path}': {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON file '{path}': {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Unsupported file format
    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, or .json")]
    UnsupportedFormat { path: PathBuf },

    /// A rule that parses but cannot be turned into a check
    #[error("Invalid rule for argument '{argument}': {reason}")]
    InvalidRule { argument: String, reason: String },

    /// The compiled decorator was rejected when applied
    #[error("Failed to compile check document: {0}")]
    Compile(#[from] argcheck_core::Error),
}

impl SchemaError {
    /// Create an I/O error with path context
    pub fn io_error(path: &Path, error: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source: error,
        }
    }

    pub fn invalid_rule(argument: &str, reason: impl Into<String>) -> Self {
        Self::InvalidRule {
            argument: argument.to_string(),
            reason: reason.into(),
        }
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. }
            | Self::Yaml { path, .. }
            | Self::Json { path, .. }
            | Self::UnsupportedFormat { path } => Some(path),
            _ => None,
        }
    }
}
