//! Leaf schema ("model") definitions
//!
//! A model describes the constraints on one scalar request value. Models
//! live in their own documents and are referenced by name from `item`
//! nodes of a request schema.
//!
//! Copyright (c) 2025 Formcast Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// Declared value type of a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Int,
    Number,
    Boolean,
    Array,
    /// Any type name this version does not know; never rejects a value
    #[serde(other)]
    Unknown,
}

impl ValueType {
    /// Whether `min`/`max` apply to this type
    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueType::Int | ValueType::Number)
    }
}

/// Named pattern check applied after the type check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Numeric,
    Int,
    Boolean,
    Email,
    Url,
    Alphabets,
    Alphanumeric,
    Symbols,
    Datetime,
    ColorCode,
    LocalFile,
    /// Unrecognised condition name; always passes
    #[serde(other)]
    Unknown,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Numeric => "numeric",
            Condition::Int => "int",
            Condition::Boolean => "boolean",
            Condition::Email => "email",
            Condition::Url => "url",
            Condition::Alphabets => "alphabets",
            Condition::Alphanumeric => "alphanumeric",
            Condition::Symbols => "symbols",
            Condition::Datetime => "datetime",
            Condition::ColorCode => "color_code",
            Condition::LocalFile => "local_file",
            Condition::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constraints for a single scalar value.
///
/// Every field is optional. Bounds keep their declared JSON number so that
/// messages render them exactly as written (`10`, not `10.0`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeafSchema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,

    /// Checks in declaration order
    #[serde(rename = "condition", default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_line: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_line: Option<u64>,
}

impl LeafSchema {
    pub fn new(value_type: ValueType) -> Self {
        Self {
            value_type: Some(value_type),
            ..Self::default()
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min = min.map(Number::from);
        self.max = max.map(Number::from);
        self
    }

    pub fn with_length(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    pub fn with_lines(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.min_line = min;
        self.max_line = max;
        self
    }
}
