//! Validation outcome: ordered errors and the clean parameter tree
//!
//! Copyright (c) 2025 Formcast Team
//! Licensed under the Apache-2.0 license

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// What went wrong at a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamErrorKind {
    /// A required field is absent or null
    Missing,
    /// A list or object node received the wrong container shape
    Shape,
    /// A value failed its model
    Invalid,
}

/// One entry of the error list.
///
/// The message is the user-facing text; `kind` and `path` are for
/// programmatic consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamError {
    pub kind: ParamErrorKind,
    pub path: String,
    pub message: String,
}

impl ParamError {
    pub fn new(kind: ParamErrorKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of validating one parameter tree.
///
/// The clean tree is present exactly when the error list is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationOutcome {
    errors: Vec<ParamError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    clean: Option<Map<String, Value>>,
}

impl ValidationOutcome {
    /// Build an outcome, dropping the clean tree if any error occurred
    pub fn new(errors: Vec<ParamError>, clean: Map<String, Value>) -> Self {
        let clean = errors.is_empty().then_some(clean);
        Self { errors, clean }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ParamError] {
        &self.errors
    }

    /// Error messages in declaration order
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    /// First error message, for surfaces that show a single alert
    pub fn first_message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }

    pub fn clean_parameters(&self) -> Option<&Map<String, Value>> {
        self.clean.as_ref()
    }

    /// Clean value at a top-level key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.clean.as_ref().and_then(|clean| clean.get(key))
    }

    pub fn into_clean(self) -> Option<Map<String, Value>> {
        self.clean
    }

    pub fn into_errors(self) -> Vec<ParamError> {
        self.errors
    }
}
