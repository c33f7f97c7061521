//! User-facing message texts
//!
//! Copyright (c) 2025 Formcast Team
//! Licensed under the Apache-2.0 license

use formcast_schemas::Condition;

pub const INVALID_FORMAT: &str = "データの形式が不正です。";

/// Envelope message when any parameter failed validation
pub const REQUEST_HAS_ERRORS: &str = "リクエストパラメータにエラーがあります。";

/// Envelope message when validation itself could not run
pub const VALIDATION_SERVER_ERROR: &str = "バリデートに関するサーバーエラーが発生しました。";

pub fn missing_field(path: &str) -> String {
    format!("リクエストに必要な値が設定されていません。({path})")
}

pub fn not_a_list(path: &str) -> String {
    format!("{path} はリスト形式である必要があります。")
}

pub fn not_an_object(path: &str) -> String {
    format!("{path} はオブジェクト形式である必要があります。")
}

/// A leaf failure qualified by the field's label
pub fn labelled(label: &str, message: &str) -> String {
    format!("{label}は、{message}")
}

pub fn condition_message(condition: &Condition) -> &'static str {
    match condition {
        Condition::Numeric | Condition::Int => "数値である必要があります。",
        Condition::Boolean => "フラグの形式である必要があります。",
        Condition::Email => "メールアドレスの形式である必要があります。",
        Condition::Url => "URLの形式である必要があります。",
        Condition::Alphabets => "英字のみである必要があります。",
        Condition::Alphanumeric => "英数字のみである必要があります。",
        Condition::Symbols => "英数字+記号のみである必要があります。",
        Condition::Datetime => "日付+時刻の形式である必要があります。",
        Condition::ColorCode => "カラーコードの形式である必要があります。",
        Condition::LocalFile => "ファイルパスの形式である必要があります。",
        Condition::Unknown => "",
    }
}

/// Label fragment a condition contributes to a form hint
pub fn condition_label(condition: &Condition) -> Option<&'static str> {
    match condition {
        Condition::Email => Some("メールアドレス"),
        Condition::Url => Some("URL形式"),
        Condition::Alphabets => Some("英字のみ"),
        Condition::Alphanumeric => Some("英数字のみ"),
        Condition::Symbols => Some("英数記号のみ"),
        Condition::Datetime => Some("日付形式"),
        Condition::ColorCode => Some("カラーコード形式"),
        Condition::LocalFile => Some("ファイルパス形式"),
        Condition::Numeric | Condition::Int | Condition::Boolean | Condition::Unknown => None,
    }
}
