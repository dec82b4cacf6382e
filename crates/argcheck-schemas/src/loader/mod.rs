//! Loading check documents from files and strings
//!
//! Copyright (c) 2025 Argcheck Team
//! Licensed under the Apache-2.0 license

pub mod parser;

pub use parser::{parse_document, Format};

use crate::document::CheckDocument;
use crate::error::{SchemaError, SchemaResult};
use std::path::Path;

/// Loads [`CheckDocument`]s from YAML or JSON
#[derive(Debug, Default, Clone)]
pub struct CheckLoader {
    strict: bool,
}

impl CheckLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Also reject documents that declare no arguments
    pub fn with_strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Load a document, detecting the format from the file extension
    pub fn load_file(&self, path: impl AsRef<Path>) -> SchemaResult<CheckDocument> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let content =
            std::fs::read_to_string(path).map_err(|e| SchemaError::io_error(path, e))?;
        let document = self.finish(parse_document(&content, format, path)?, path)?;
        log::debug!(
            "Loaded check document '{}' with {} argument rule(s)",
            path.display(),
            document.arguments.len()
        );
        Ok(document)
    }

    /// Load a document from a string in the given format
    pub fn load_str(&self, content: &str, format: Format) -> SchemaResult<CheckDocument> {
        let path = Path::new("<string>");
        self.finish(parse_document(content, format, path)?, path)
    }

    fn finish(&self, document: CheckDocument, path: &Path) -> SchemaResult<CheckDocument> {
        if self.strict && document.arguments.is_empty() && document.reject_keywords.is_empty() {
            return Err(SchemaError::invalid_rule(
                "*",
                format!("document '{}' declares no checks", path.display()),
            ));
        }
        Ok(document)
    }
}
