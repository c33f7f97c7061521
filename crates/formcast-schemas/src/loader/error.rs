//! Error types for schema and model loading
//!
//! Copyright (c) 2025 Formcast Team
//! Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Failures raised while locating, reading or parsing schema documents.
///
/// Every variant is a configuration problem: none of them is ever turned
/// into a user-facing validation message.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML file '{path}': {source}")]
    YamlParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON file '{path}': {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Unsupported file format
    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, or .json")]
    UnsupportedFormat { path: PathBuf },

    /// No model document exists for the requested name
    #[error("modelファイルが見つかりませんでした。: {}", path.display())]
    ModelNotFound { name: String, path: PathBuf },

    /// The document parsed but does not describe a valid schema
    #[error("Invalid schema definition in '{path}': {reason}")]
    InvalidDefinition { path: PathBuf, reason: String },

    /// Cache lock was poisoned by a panicking reader or writer
    #[error("Cache operation failed: {reason}")]
    CacheError { reason: String },
}

impl From<std::io::Error> for LoaderError {
    fn from(error: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::from("<unknown>"),
            source: error,
        }
    }
}

impl LoaderError {
    /// Create an I/O error with path context
    pub fn io_error(path: PathBuf, error: std::io::Error) -> Self {
        Self::IoError {
            path,
            source: error,
        }
    }

    /// Create a YAML parsing error with path context
    pub fn yaml_parse_error(path: PathBuf, error: serde_yaml::Error) -> Self {
        Self::YamlParseError {
            path,
            source: error,
        }
    }

    /// Create a JSON parsing error with path context
    pub fn json_parse_error(path: PathBuf, error: serde_json::Error) -> Self {
        Self::JsonParseError {
            path,
            source: error,
        }
    }

    pub fn unsupported_format(path: PathBuf) -> Self {
        Self::UnsupportedFormat { path }
    }

    pub fn model_not_found(name: impl Into<String>, path: PathBuf) -> Self {
        Self::ModelNotFound {
            name: name.into(),
            path,
        }
    }

    pub fn invalid_definition(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            path,
            reason: reason.into(),
        }
    }

    pub fn cache_error(reason: impl Into<String>) -> Self {
        Self::CacheError {
            reason: reason.into(),
        }
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::IoError { path, .. } => Some(path),
            Self::YamlParseError { path, .. } => Some(path),
            Self::JsonParseError { path, .. } => Some(path),
            Self::UnsupportedFormat { path } => Some(path),
            Self::ModelNotFound { path, .. } => Some(path),
            Self::InvalidDefinition { path, .. } => Some(path),
            Self::CacheError { .. } => None,
        }
    }

    /// Whether retrying the same lookup could succeed without a config change
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::CacheError { .. })
    }
}
