//! Loose scalar semantics for submitted values
//!
//! Request values arrive as text from form posts or as JSON scalars from
//! API bodies. These helpers answer the questions the checks ask of either
//! form: is it empty, is it numeric, what integer does it spell.
//!
//! Copyright (c) 2025 Formcast Team
//! Licensed under the Apache-2.0 license

use regex::Regex;
use serde_json::{Number, Value};
use std::borrow::Cow;
use std::sync::OnceLock;

const WHITESPACE: &[char] = &[' ', '\t', '\n', '\r', '\x0B', '\x0C'];

fn numeric_literal() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[ \t\n\r\x0B\x0C]*[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?[ \t\n\r\x0B\x0C]*$")
            .expect("numeric literal pattern compiles")
    })
}

fn numeric_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[ \t\n\r\x0B\x0C]*[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
            .expect("numeric prefix pattern compiles")
    })
}

fn integer_literal() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?(?:0|[1-9][0-9]*)$").expect("integer literal pattern compiles"))
}

/// Loose falsiness: null, `false`, zero, `""`, `"0"` and empty containers
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// A number, or a string holding a decimal numeric literal
pub fn is_numeric(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => finite_literal(s).is_some(),
        _ => false,
    }
}

/// Value of a decimal literal; literals that overflow `f64` spell no number
fn finite_literal(s: &str) -> Option<f64> {
    if !numeric_literal().is_match(s) {
        return None;
    }
    s.trim_matches(WHITESPACE).parse::<f64>().ok().filter(|f| f.is_finite())
}

/// The whole number a value spells, if it spells one exactly
pub fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_f64)),
        Value::String(s) => {
            let trimmed = s.trim_matches(WHITESPACE);
            if integer_literal().is_match(trimmed) {
                trimmed.parse::<i64>().ok()
            } else {
                None
            }
        }
        _ => None,
    }
}

fn whole_f64(f: f64) -> Option<i64> {
    // i64::MAX is not representable; 2^63 is the first float past it
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f) {
        Some(f as i64)
    } else {
        None
    }
}

/// Numeric reading of a value that passed a numeric type check
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => finite_literal(s),
        _ => None,
    }
}

/// Leading numeric part of a string, as a float
pub fn leading_number(s: &str) -> Option<f64> {
    numeric_prefix()
        .find(s)
        .and_then(|m| m.as_str().trim_matches(WHITESPACE).parse::<f64>().ok())
        .filter(|f| f.is_finite())
}

/// Text a pattern condition is matched against; containers and null have none
pub fn text_form(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(number_text(n))),
        Value::Bool(true) => Some(Cow::Borrowed("1")),
        Value::Bool(false) => Some(Cow::Borrowed("")),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Decimal text of a number; whole floats drop their `.0`
pub fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

/// How a value is quoted back in messages
pub fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => text_form(other)
            .map(Cow::into_owned)
            .unwrap_or_else(|| other.to_string()),
    }
}
