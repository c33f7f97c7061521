// Tests for output formatting
//
// These verify outcomes and schema reports render correctly in each
// output format, and that the writer honours quiet mode.

use super::*;
use formcast_core::{ParamError, ParamErrorKind};
use serde_json::{json, Map, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// Writer that keeps its output for inspection
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn failed_outcome() -> ValidationOutcome {
    ValidationOutcome::new(
        vec![
            ParamError::new(ParamErrorKind::Invalid, "user.user_seq", "user_seqは、データの形式が不正です。"),
            ParamError::new(
                ParamErrorKind::Missing,
                "user.friends[1].icon_list",
                "リクエストに必要な値が設定されていません。(user.friends[1].icon_list)",
            ),
        ],
        Map::new(),
    )
}

fn valid_outcome() -> ValidationOutcome {
    let clean: Map<String, Value> = json!({"user_seq": 10, "user_name": "テストユーザー"})
        .as_object()
        .cloned()
        .unwrap();
    ValidationOutcome::new(Vec::new(), clean)
}

#[test]
fn test_outcome_human_errors() {
    let text = OutputFormat::Human.format_outcome(&failed_outcome(), false).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "✗ 2 parameter error(s)");
    assert_eq!(lines[1], "  user.user_seq user_seqは、データの形式が不正です。");
    assert!(lines[2].ends_with("(user.friends[1].icon_list)"));
}

#[test]
fn test_outcome_human_clean_parameters() {
    let text = OutputFormat::Human.format_outcome(&valid_outcome(), false).unwrap();
    assert!(text.starts_with("✓ Parameters are valid"));
    assert!(text.contains("\"user_seq\": 10"));
}

#[test]
fn test_outcome_json() {
    let text = OutputFormat::Json.format_outcome(&valid_outcome(), false).unwrap();
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value, json!({"errors": [], "clean": {"user_seq": 10, "user_name": "テストユーザー"}}));

    let text = OutputFormat::Json.format_outcome(&failed_outcome(), false).unwrap();
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["errors"][0]["kind"], "invalid");
    assert!(value.get("clean").is_none());
}

#[test]
fn test_outcome_yaml() {
    let text = OutputFormat::Yaml.format_outcome(&failed_outcome(), false).unwrap();
    assert!(text.contains("path: user.user_seq"));
    assert!(text.contains("kind: missing"));
}

#[test]
fn test_schema_report_human() {
    let report = SchemaReport {
        schema: "friends.json".to_string(),
        fields: 2,
        models: vec![
            ModelCheck {
                model: "user_seq".to_string(),
                error: None,
            },
            ModelCheck {
                model: "icon_path".to_string(),
                error: Some("modelファイルが見つかりませんでした。: models/icon_path.json".to_string()),
            },
        ],
    };

    let text = OutputFormat::Human.format_schema_report(&report, false).unwrap();
    assert_eq!(
        text,
        "friends.json: 2 field(s), 2 model(s)\n  ok      user_seq\n  missing icon_path (modelファイルが見つかりませんでした。: models/icon_path.json)"
    );
    assert_eq!(report.missing().count(), 1);
}

#[test]
fn test_writer_quiet_suppresses_info() {
    let buffer = SharedBuffer::default();
    let mut writer = OutputWriter::with_writer(OutputFormat::Human, false, true, Box::new(buffer.clone()));

    writer.info("Loading schema").unwrap();
    writer.outcome(&failed_outcome()).unwrap();

    let contents = buffer.contents();
    assert!(!contents.contains("Loading schema"));
    assert!(contents.starts_with("✗ 2 parameter error(s)"));
}

#[test]
fn test_writer_value_json_pretty() {
    let buffer = SharedBuffer::default();
    let mut writer = OutputWriter::with_writer(OutputFormat::JsonPretty, false, false, Box::new(buffer.clone()));

    writer.info("not shown for structured output").unwrap();
    writer.value(&json!({"label": "1～10の数値"})).unwrap();

    assert_eq!(buffer.contents(), "{\n  \"label\": \"1～10の数値\"\n}\n");
}
