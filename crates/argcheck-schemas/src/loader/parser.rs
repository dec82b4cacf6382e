//! Document parsing for YAML and JSON formats
//!
//! Copyright (c) 2025 Argcheck Team
//! Licensed under the Apache-2.0 license

use crate::document::CheckDocument;
use crate::error::{SchemaError, SchemaResult};
use std::path::Path;

/// Supported file formats for check documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> SchemaResult<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(SchemaError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Get file extensions for this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Format::Yaml => &["yaml", "yml"],
            Format::Json => &["json"],
        }
    }

    pub fn primary_extension(&self) -> &'static str {
        self.extensions()[0]
    }
}

/// Parse a document; `path` is only used for error context
pub fn parse_document(content: &str, format: Format, path: &Path) -> SchemaResult<CheckDocument> {
    match format {
        Format::Yaml => serde_yaml::from_str(content).map_err(|source| SchemaError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
        Format::Json => serde_json::from_str(content).map_err(|source| SchemaError::Json {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path(Path::new("a.yaml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("a.YML")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("dir/a.json")).unwrap(), Format::Json);
        let err = Format::from_path(Path::new("a.toml")).unwrap_err();
        assert_eq!(err.path(), Some(PathBuf::from("a.toml").as_path()));
        assert!(Format::from_path(Path::new("noext")).is_err());
        assert_eq!(Format::Yaml.primary_extension(), "yaml");
    }

    #[test]
    fn test_parse_errors_carry_path() {
        let err = parse_document("{", Format::Json, Path::new("broken.json")).unwrap_err();
        assert!(matches!(err, SchemaError::Json { .. }));
        assert!(err.to_string().contains("broken.json"));

        let err = parse_document("arguments: [", Format::Yaml, Path::new("broken.yaml")).unwrap_err();
        assert!(matches!(err, SchemaError::Yaml { .. }));
    }
}
