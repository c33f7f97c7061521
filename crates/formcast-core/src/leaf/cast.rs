//! Casting validated values to the model's native type
//!
//! Every function here is total. Values that never passed a type check
//! (optional and empty) fall back to the zero value of the type.
//!
//! Copyright (c) 2025 Formcast Team
//! Licensed under the Apache-2.0 license

use super::value::{is_empty, leading_number, number_text};
use formcast_schemas::ValueType;
use serde_json::Value;

pub fn cast(value_type: Option<ValueType>, value: &Value) -> Value {
    match value_type {
        Some(ValueType::Int) => Value::from(to_int(value)),
        Some(ValueType::Number) => Value::from(to_float(value)),
        Some(ValueType::String) => Value::String(to_text(value)),
        Some(ValueType::Boolean) => Value::Bool(!is_empty(value)),
        Some(ValueType::Array) => to_sequence(value),
        Some(ValueType::Unknown) | None => value.clone(),
    }
}

fn to_int(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .unwrap_or_else(|| truncate(n.as_f64().unwrap_or(0.0))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .unwrap_or_else(|_| leading_number(s).map(truncate).unwrap_or(0)),
        Value::Bool(b) => i64::from(*b),
        Value::Null => 0,
        Value::Array(items) => i64::from(!items.is_empty()),
        Value::Object(map) => i64::from(!map.is_empty()),
    }
}

// `as` saturates at the i64 bounds and maps NaN to zero
fn truncate(f: f64) -> i64 {
    f.trunc() as i64
}

fn to_float(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => leading_number(s).unwrap_or(0.0),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        Value::Array(items) => f64::from(u8::from(!items.is_empty())),
        Value::Object(map) => f64::from(u8::from(!map.is_empty())),
    }
}

fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(n),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null => String::new(),
        container => container.to_string(),
    }
}

fn to_sequence(value: &Value) -> Value {
    match value {
        Value::Array(_) | Value::Object(_) => value.clone(),
        Value::Null => Value::Array(Vec::new()),
        scalar => Value::Array(vec![scalar.clone()]),
    }
}
