//! Form hint labels built from a model's constraints
//!
//! Copyright (c) 2025 Formcast Team
//! Licensed under the Apache-2.0 license

use crate::messages::condition_label;
use formcast_schemas::LeafSchema;
use std::fmt::Display;

/// Human-readable constraint summary, parts joined by one space
pub fn form_label(schema: &LeafSchema) -> String {
    let mut parts: Vec<String> = Vec::new();

    if schema.value_type.is_some_and(|t| t.is_numeric()) {
        parts.extend(bounded(schema.min.as_ref(), schema.max.as_ref(), |min, max| match (min, max) {
            (Some(min), Some(max)) => format!("{min}～{max}の数値"),
            (None, Some(max)) => format!("{max}以下の数値"),
            (Some(min), None) => format!("{min}以上の数値"),
            (None, None) => String::new(),
        }));
    }

    parts.extend(bounded(schema.min_length, schema.max_length, |min, max| match (min, max) {
        (Some(min), Some(max)) => format!("{min}～{max}文字"),
        (None, Some(max)) => format!("{max}文字以下"),
        (Some(min), None) => format!("{min}文字以上"),
        (None, None) => String::new(),
    }));

    parts.extend(bounded(schema.min_line, schema.max_line, |min, max| match (min, max) {
        (Some(min), Some(max)) => format!("{min}～{max}行"),
        (None, Some(max)) => format!("{max}行以下"),
        (Some(min), None) => format!("{min}行以上"),
        (None, None) => String::new(),
    }));

    parts.extend(
        schema
            .conditions
            .iter()
            .filter_map(condition_label)
            .map(str::to_string),
    );

    parts.retain(|part| !part.is_empty());
    parts.join(" ")
}

fn bounded<T: Display>(
    min: Option<T>,
    max: Option<T>,
    render: impl FnOnce(Option<T>, Option<T>) -> String,
) -> Option<String> {
    if min.is_none() && max.is_none() {
        None
    } else {
        Some(render(min, max))
    }
}
