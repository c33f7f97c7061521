//! Leaf validator: checks and casts a single value against a model
//!
//! A leaf check runs in a fixed order and stops at the first failure:
//!
//! 1. optional and loosely empty values pass immediately
//! 2. the declared `type`
//! 3. the `condition` list, per [`ConditionPolicy`]
//! 4. `min`/`max` for `int` and `number`
//! 5. `min_length`, `max_length`, `min_line`, `max_line` for `string`
//!
//! Copyright (c) 2025 Formcast Team
//! Licensed under the Apache-2.0 license

pub mod cast;
pub mod conditions;
pub mod label;
pub mod value;

use crate::config::ConditionPolicy;
use crate::messages::{condition_message, INVALID_FORMAT};
use formcast_schemas::{Condition, LeafSchema, ValueType};
use serde_json::{Number, Value};
use std::sync::Arc;
use thiserror::Error;

/// Why a value failed its model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    #[error("{}", INVALID_FORMAT)]
    InvalidFormat,

    #[error("{}", condition_message(.0))]
    Condition(Condition),

    #[error("{bound}以上である必要があります。（現在: {actual}）")]
    BelowMin { bound: Number, actual: String },

    #[error("{bound}以下である必要があります。（現在: {actual}）")]
    AboveMax { bound: Number, actual: String },

    #[error("{bound}文字以上である必要があります。(現在: {actual}文字)")]
    TooShort { bound: u64, actual: usize },

    #[error("{bound}文字以下である必要があります。(現在: {actual}文字)")]
    TooLong { bound: u64, actual: usize },

    #[error("{bound}行以上である必要があります。(現在: {actual}行)")]
    TooFewLines { bound: u64, actual: usize },

    #[error("{bound}行以下である必要があります。(現在: {actual}行)")]
    TooManyLines { bound: u64, actual: usize },
}

/// Validator bound to one loaded model
#[derive(Debug, Clone)]
pub struct LeafValidator {
    schema: Arc<LeafSchema>,
    policy: ConditionPolicy,
}

impl From<LeafSchema> for LeafValidator {
    fn from(schema: LeafSchema) -> Self {
        Self::new(Arc::new(schema))
    }
}

impl LeafValidator {
    pub fn new(schema: Arc<LeafSchema>) -> Self {
        Self {
            schema,
            policy: ConditionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ConditionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn schema(&self) -> &LeafSchema {
        &self.schema
    }

    /// Check a value; `required` disables the empty-value shortcut
    pub fn validate(&self, value: &Value, required: bool) -> Result<(), Violation> {
        if !required && value::is_empty(value) {
            return Ok(());
        }

        if let Some(value_type) = self.schema.value_type {
            if !type_matches(value_type, value) {
                return Err(Violation::InvalidFormat);
            }
        }

        self.check_conditions(value)?;

        match self.schema.value_type {
            Some(t) if t.is_numeric() => self.check_range(value),
            Some(ValueType::String) => self.check_text(value),
            _ => Ok(()),
        }
    }

    /// Native value for the model's type
    pub fn cast(&self, value: &Value) -> Value {
        cast::cast(self.schema.value_type, value)
    }

    /// Constraint summary shown next to form inputs
    pub fn form_label(&self) -> String {
        label::form_label(&self.schema)
    }

    fn check_conditions(&self, value: &Value) -> Result<(), Violation> {
        let considered = match self.policy {
            ConditionPolicy::FirstFailure => self.schema.conditions.len(),
            ConditionPolicy::FirstOnly => self.schema.conditions.len().min(1),
        };

        match self.schema.conditions[..considered]
            .iter()
            .find(|condition| !conditions::check(**condition, value))
        {
            Some(failed) => Err(Violation::Condition(*failed)),
            None => Ok(()),
        }
    }

    fn check_range(&self, value: &Value) -> Result<(), Violation> {
        let Some(actual) = value::as_f64(value) else {
            return Ok(());
        };

        if let Some(min) = &self.schema.min {
            if min.as_f64().is_some_and(|bound| actual < bound) {
                return Err(Violation::BelowMin {
                    bound: min.clone(),
                    actual: value::display(value),
                });
            }
        }

        if let Some(max) = &self.schema.max {
            if max.as_f64().is_some_and(|bound| actual > bound) {
                return Err(Violation::AboveMax {
                    bound: max.clone(),
                    actual: value::display(value),
                });
            }
        }

        Ok(())
    }

    fn check_text(&self, value: &Value) -> Result<(), Violation> {
        let Value::String(text) = value else {
            return Ok(());
        };
        let text = text.replace("\r\n", "\n");
        let length = text.chars().count();
        let lines = text.matches('\n').count() + 1;

        if let Some(bound) = self.schema.min_length {
            if (length as u64) < bound {
                return Err(Violation::TooShort { bound, actual: length });
            }
        }
        if let Some(bound) = self.schema.max_length {
            if (length as u64) > bound {
                return Err(Violation::TooLong { bound, actual: length });
            }
        }
        if let Some(bound) = self.schema.min_line {
            if (lines as u64) < bound {
                return Err(Violation::TooFewLines { bound, actual: lines });
            }
        }
        if let Some(bound) = self.schema.max_line {
            if (lines as u64) > bound {
                return Err(Violation::TooManyLines { bound, actual: lines });
            }
        }

        Ok(())
    }
}

fn type_matches(value_type: ValueType, value: &Value) -> bool {
    match value_type {
        ValueType::String => value.is_string(),
        ValueType::Number => value::is_numeric(value),
        ValueType::Int => value::as_integer(value).is_some(),
        ValueType::Boolean => value.is_boolean() || conditions::is_flag(value),
        ValueType::Array => value.is_array() || value.is_object(),
        ValueType::Unknown => true,
    }
}
