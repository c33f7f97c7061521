//! Document parsing for YAML and JSON schema files
//!
//! YAML documents are normalised to a `serde_json::Value` so every
//! definition type deserializes through serde_json. Mapping order survives
//! the conversion.
//!
//! Copyright (c) 2025 Formcast Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

/// Supported file formats for schema documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(LoaderError::unsupported_format(path.to_path_buf())),
        }
    }

    /// File extensions for this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Format::Yaml => &["yaml", "yml"],
            Format::Json => &["json"],
        }
    }

    /// Lookup order used when resolving a model name to a file
    pub fn lookup_order() -> &'static [&'static str] {
        &["json", "yaml", "yml"]
    }
}

/// Stateless parser shared by the store and the request schema loaders
#[derive(Debug, Default)]
pub struct SchemaParser;

impl SchemaParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a document file, detecting format from extension
    pub fn parse_file(&self, path: &Path) -> LoaderResult<Value> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;

        self.parse_content(&content, format, path)
    }

    /// Parse document content with explicit format
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> LoaderResult<Value> {
        match format {
            Format::Yaml => self.parse_yaml(content, path),
            Format::Json => self.parse_json(content, path),
        }
    }

    pub fn parse_yaml(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| LoaderError::yaml_parse_error(path.to_path_buf(), e))?;

        serde_json::to_value(yaml_value)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    pub fn parse_json(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        serde_json::from_str(content)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Parse a file and deserialize it into a definition type.
    ///
    /// Structural problems (wrong shape, unknown node kind, missing
    /// `format`) surface as [`LoaderError::InvalidDefinition`].
    pub fn load_typed<T: DeserializeOwned>(&self, path: &Path) -> LoaderResult<T> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;

        self.decode_str(&content, format, path)
    }

    /// Deserialize document text into a definition type.
    ///
    /// JSON is decoded straight from the text so duplicate keys reach the
    /// definition types instead of collapsing in an intermediate map.
    pub fn decode_str<T: DeserializeOwned>(
        &self,
        content: &str,
        format: Format,
        path: &Path,
    ) -> LoaderResult<T> {
        match format {
            Format::Json => serde_json::from_str(content).map_err(|e| {
                if e.is_data() {
                    LoaderError::invalid_definition(path.to_path_buf(), e.to_string())
                } else {
                    LoaderError::json_parse_error(path.to_path_buf(), e)
                }
            }),
            Format::Yaml => {
                let value = self.parse_yaml(content, path)?;
                self.decode(value, path)
            }
        }
    }

    /// Deserialize an already parsed document into a definition type
    pub fn decode<T: DeserializeOwned>(&self, value: Value, path: &Path) -> LoaderResult<T> {
        if !value.is_object() {
            return Err(LoaderError::invalid_definition(
                path.to_path_buf(),
                "document root must be a mapping",
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| LoaderError::invalid_definition(path.to_path_buf(), e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path(Path::new("user_seq.yaml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("user_seq.YML")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("user_seq.json")).unwrap(), Format::Json);

        assert!(Format::from_path(Path::new("user_seq.txt")).is_err());
        assert!(Format::from_path(Path::new("user_seq")).is_err());
    }

    #[test]
    fn test_yaml_keeps_key_order() -> LoaderResult<()> {
        let parser = SchemaParser::new();
        let value = parser.parse_yaml("zeta: 1\nalpha: 2\nmid: 3\n", Path::new("order.yaml"))?;

        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        Ok(())
    }

    #[test]
    fn test_json_file_parsing() -> LoaderResult<()> {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("user_name.json");
        fs::write(&file_path, r#"{"type": "string", "max_length": 16}"#)?;

        let parser = SchemaParser::new();
        let result = parser.parse_file(&file_path)?;

        assert_eq!(result["type"], "string");
        assert_eq!(result["max_length"], 16);
        Ok(())
    }

    #[test]
    fn test_decode_rejects_non_mapping_root() {
        let parser = SchemaParser::new();
        let err = parser
            .decode::<serde_json::Map<String, Value>>(serde_json::json!([1, 2]), Path::new("list.json"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::InvalidDefinition { .. }));
    }
}
