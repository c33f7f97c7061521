//! Named condition checks
//!
//! Copyright (c) 2025 Formcast Team
//! Licensed under the Apache-2.0 license

use super::value::{as_integer, is_numeric, text_form};
use chrono::{NaiveDateTime, Timelike};
use formcast_schemas::Condition;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

const DATETIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

macro_rules! pattern {
    ($name:ident, $re:literal) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($re).expect(concat!(stringify!($name), " pattern compiles")))
        }
    };
}

pattern!(email, r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$");
// Trailing path segments collapse into one repetition; the language is the same
pattern!(url, r"^(https?://)?([0-9a-z.\-]+)\.([a-z.]{2,6})(?:[/0-9A-Za-z_ .\-]*)/?$");
pattern!(alphabets, r"^[a-zA-Z]+$");
pattern!(alphanumeric, r"^[a-zA-Z0-9]+$");
pattern!(symbols, r"^[a-zA-Z0-9\p{P}\p{S}]+$");
pattern!(color_code, r"^#[a-fA-F0-9]{6}$");
pattern!(local_file, r"^[a-zA-Z0-9/_\-.]+$");

/// Whether `value` satisfies `condition`
pub fn check(condition: Condition, value: &Value) -> bool {
    match condition {
        Condition::Numeric => is_numeric(value),
        Condition::Int => as_integer(value).is_some(),
        Condition::Boolean => is_flag(value),
        Condition::Email => matches_text(email(), value),
        Condition::Url => matches_text(url(), value),
        Condition::Alphabets => matches_text(alphabets(), value),
        Condition::Alphanumeric => matches_text(alphanumeric(), value),
        Condition::Symbols => matches_text(symbols(), value),
        Condition::Datetime => text_form(value).is_some_and(|text| is_datetime(&text)),
        Condition::ColorCode => matches_text(color_code(), value),
        Condition::LocalFile => matches_text(local_file(), value),
        Condition::Unknown => true,
    }
}

/// Strictly 0, 1, "0" or "1"
pub fn is_flag(value: &Value) -> bool {
    match value {
        Value::Number(n) => matches!(n.as_u64(), Some(0 | 1)),
        Value::String(s) => s == "0" || s == "1",
        _ => false,
    }
}

fn matches_text(re: &Regex, value: &Value) -> bool {
    text_form(value).is_some_and(|text| re.is_match(&text))
}

/// Parses as a calendar date-time and formats back to the same text.
///
/// chrono keeps a `:60` second as a leap second; it is rejected here.
fn is_datetime(text: &str) -> bool {
    NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
        .map(|parsed| parsed.nanosecond() < 1_000_000_000 && parsed.format(DATETIME_FORMAT).to_string() == text)
        .unwrap_or(false)
}
