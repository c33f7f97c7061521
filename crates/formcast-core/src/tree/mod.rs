//! Tree validator: walks a request schema against a parameter tree
//!
//! Fields are visited in schema declaration order, depth first. Each node
//! returns its cast value (if it validated) together with the errors found
//! below it, so errors from siblings accumulate without aborting the walk.
//! The clean tree is only handed out when the whole call found no errors.
//!
//! Copyright (c) 2025 Formcast Team
//! Licensed under the Apache-2.0 license

pub mod outcome;
pub mod path;

pub use outcome::{ParamError, ParamErrorKind, ValidationOutcome};
pub use path::FieldPath;

use crate::config::ValidatorConfig;
use crate::error::{Error, Result};
use crate::leaf::LeafValidator;
use crate::messages;
use formcast_schemas::{FieldNode, Fields, ItemField, ListField, ModelSource, ObjectField, RequestSchema};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Cast value of a node, if it validated, and the errors found below it
type Checked = (Option<Value>, Vec<ParamError>);

/// Validates parameter trees against request schemas using models from `S`
#[derive(Debug, Clone)]
pub struct RequestValidator<S> {
    source: S,
    config: ValidatorConfig,
}

impl<S: ModelSource> RequestValidator<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, ValidatorConfig::default())
    }

    pub fn with_config(source: S, config: ValidatorConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Leaf validator for a model name, configured like this validator
    pub fn leaf(&self, model: &str) -> Result<LeafValidator> {
        self.leaf_at(model, &FieldPath::root())
    }

    /// Validate `params` against `schema`.
    ///
    /// Problems with the submitted values are reported in the outcome.
    /// `Err` means a referenced model could not be resolved; no partial
    /// error list is returned in that case.
    pub fn validate(&self, schema: &RequestSchema, params: &Map<String, Value>) -> Result<ValidationOutcome> {
        let (clean, errors) = self.check_fields(schema.fields(), params, &FieldPath::root())?;

        debug!(
            fields = schema.fields().len(),
            errors = errors.len(),
            "Validated request parameters"
        );

        Ok(ValidationOutcome::new(errors, clean))
    }

    fn check_fields(
        &self,
        fields: &Fields,
        values: &Map<String, Value>,
        path: &FieldPath,
    ) -> Result<(Map<String, Value>, Vec<ParamError>)> {
        let mut clean = Map::new();
        let mut errors = Vec::new();

        for (name, node) in fields.iter() {
            let child = path.child(name);

            let Some(value) = values.get(name).filter(|value| !value.is_null()) else {
                if node.required() {
                    errors.push(ParamError::new(
                        ParamErrorKind::Missing,
                        child.as_str(),
                        messages::missing_field(child.as_str()),
                    ));
                }
                continue;
            };

            let (checked, node_errors) = self.check_node(name, node, value, &child)?;
            errors.extend(node_errors);
            if let Some(checked) = checked {
                clean.insert(name.to_string(), checked);
            }
        }

        Ok((clean, errors))
    }

    fn check_node(&self, key: &str, node: &FieldNode, value: &Value, path: &FieldPath) -> Result<Checked> {
        match node {
            FieldNode::Item(item) => self.check_item(key, item, value, path),
            FieldNode::List(list) => self.check_list(key, list, value, path),
            FieldNode::Object(object) => self.check_object(object, value, path),
        }
    }

    fn check_item(&self, key: &str, item: &ItemField, value: &Value, path: &FieldPath) -> Result<Checked> {
        let leaf = self.leaf_at(&item.model, path)?;

        match leaf.validate(value, item.required) {
            Ok(()) => Ok((Some(leaf.cast(value)), Vec::new())),
            Err(violation) => {
                let label = item.label.as_deref().unwrap_or(key);
                let error = ParamError::new(
                    ParamErrorKind::Invalid,
                    path.as_str(),
                    messages::labelled(label, &violation.to_string()),
                );
                Ok((None, vec![error]))
            }
        }
    }

    fn check_list(&self, key: &str, list: &ListField, value: &Value, path: &FieldPath) -> Result<Checked> {
        let elements: Vec<(FieldPath, &Value)> = match value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, element)| (path.index(index), element))
                .collect(),
            Value::Object(map) => map.iter().map(|(index, element)| (path.index(index), element)).collect(),
            _ => {
                let error = ParamError::new(ParamErrorKind::Shape, path.as_str(), messages::not_a_list(path.as_str()));
                return Ok((None, vec![error]));
            }
        };

        if matches!(*list.items, FieldNode::List(_)) {
            warn!(path = %path, "List directly inside a list is not supported; field ignored");
            return Ok((None, Vec::new()));
        }

        let mut clean = Vec::with_capacity(elements.len());
        let mut errors = Vec::new();

        for (element_path, element) in elements {
            let (checked, element_errors) = self.check_node(key, &list.items, element, &element_path)?;
            errors.extend(element_errors);
            clean.extend(checked);
        }

        if errors.is_empty() {
            Ok((Some(Value::Array(clean)), errors))
        } else {
            Ok((None, errors))
        }
    }

    fn check_object(&self, object: &ObjectField, value: &Value, path: &FieldPath) -> Result<Checked> {
        let Value::Object(map) = value else {
            let error = ParamError::new(ParamErrorKind::Shape, path.as_str(), messages::not_an_object(path.as_str()));
            return Ok((None, vec![error]));
        };

        let (clean, errors) = self.check_fields(&object.properties, map, path)?;
        if errors.is_empty() {
            Ok((Some(Value::Object(clean)), errors))
        } else {
            Ok((None, errors))
        }
    }

    fn leaf_at(&self, model: &str, path: &FieldPath) -> Result<LeafValidator> {
        let schema = self
            .source
            .resolve(model)
            .map_err(|source| Error::model_resolution(model, path.as_str(), source))?;
        Ok(LeafValidator::new(schema).with_policy(self.config.condition_policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcast_schemas::{LeafSchema, MemoryStore, ValueType};
    use serde_json::json;

    fn store() -> MemoryStore {
        MemoryStore::new()
            .with_model("seq", LeafSchema::new(ValueType::Int))
            .with_model("name", LeafSchema::new(ValueType::String).with_length(None, Some(8)))
    }

    fn params(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_flat_schema() -> Result<()> {
        let schema = RequestSchema::new(
            Fields::new()
                .with("seq", FieldNode::item("SEQ", "seq"))
                .with("name", FieldNode::item("名前", "name").optional()),
        );
        let validator = RequestValidator::new(store());

        let outcome = validator.validate(&schema, &params(json!({"seq": "12"})))?;
        assert!(outcome.is_valid());
        assert_eq!(outcome.clean_parameters(), Some(&params(json!({"seq": 12}))));

        let outcome = validator.validate(&schema, &params(json!({"seq": "x"})))?;
        assert_eq!(outcome.messages(), vec!["SEQは、データの形式が不正です。"]);
        assert_eq!(outcome.errors()[0].kind, ParamErrorKind::Invalid);
        assert!(outcome.clean_parameters().is_none());
        Ok(())
    }

    #[test]
    fn test_number_items_cast_to_finite_floats() -> Result<()> {
        let store = MemoryStore::new().with_model("ratio", LeafSchema::new(ValueType::Number));
        let schema = RequestSchema::new(Fields::new().with("ratio", FieldNode::item("比率", "ratio")));
        let validator = RequestValidator::new(store);

        let outcome = validator.validate(&schema, &params(json!({"ratio": "1e999"})))?;
        assert_eq!(outcome.messages(), vec!["比率は、データの形式が不正です。"]);
        assert!(outcome.clean_parameters().is_none());

        for raw in [json!("2.5"), json!(" 1e3 "), json!(7)] {
            let outcome = validator.validate(&schema, &params(json!({ "ratio": raw })))?;
            let cast = outcome.get("ratio").expect("valid number is kept");
            assert!(cast.is_f64(), "{raw} cast to {cast}");
        }
        Ok(())
    }

    #[test]
    fn test_null_counts_as_absent() -> Result<()> {
        let schema = RequestSchema::new(Fields::new().with("seq", FieldNode::item("SEQ", "seq")));
        let outcome = RequestValidator::new(store()).validate(&schema, &params(json!({"seq": null})))?;

        assert_eq!(outcome.messages(), vec!["リクエストに必要な値が設定されていません。(seq)"]);
        assert_eq!(outcome.errors()[0].kind, ParamErrorKind::Missing);
        Ok(())
    }

    #[test]
    fn test_label_falls_back_to_key() -> Result<()> {
        let schema: RequestSchema = RequestSchema::from_json_str(r#"{"seq": {"format": "seq"}}"#).unwrap();
        let outcome = RequestValidator::new(store()).validate(&schema, &params(json!({"seq": "abc"})))?;
        assert_eq!(outcome.messages(), vec!["seqは、データの形式が不正です。"]);
        Ok(())
    }

    #[test]
    fn test_list_accepts_mapping_with_key_indexes() -> Result<()> {
        let schema = RequestSchema::new(Fields::new().with("seqs", FieldNode::list("SEQ一覧", FieldNode::item("SEQ", "seq"))));
        let validator = RequestValidator::new(store());

        let outcome = validator.validate(&schema, &params(json!({"seqs": {"a": "1", "b": "2"}})))?;
        assert_eq!(outcome.get("seqs"), Some(&json!([1, 2])));

        let outcome = validator.validate(&schema, &params(json!({"seqs": {"a": "1", "b": "x"}})))?;
        assert_eq!(outcome.errors()[0].path, "seqs[b]");
        Ok(())
    }

    #[test]
    fn test_shape_errors() -> Result<()> {
        let schema = RequestSchema::new(
            Fields::new()
                .with("seqs", FieldNode::list("SEQ一覧", FieldNode::item("SEQ", "seq")))
                .with("user", FieldNode::object("ユーザー", Fields::new().with("seq", FieldNode::item("SEQ", "seq")))),
        );
        let outcome = RequestValidator::new(store()).validate(&schema, &params(json!({"seqs": "1", "user": [1]})))?;

        assert_eq!(
            outcome.messages(),
            vec![
                "seqs はリスト形式である必要があります。",
                "user はオブジェクト形式である必要があります。",
            ]
        );
        assert!(outcome.errors().iter().all(|e| e.kind == ParamErrorKind::Shape));
        Ok(())
    }

    #[test]
    fn test_list_in_list_is_inert() -> Result<()> {
        let schema = RequestSchema::new(
            Fields::new()
                .with("grid", FieldNode::list("グリッド", FieldNode::list("行", FieldNode::item("SEQ", "seq"))))
                .with("seq", FieldNode::item("SEQ", "seq")),
        );
        let outcome = RequestValidator::new(store()).validate(&schema, &params(json!({"grid": [["x"]], "seq": 1})))?;

        assert!(outcome.is_valid());
        assert_eq!(outcome.clean_parameters(), Some(&params(json!({"seq": 1}))));
        Ok(())
    }

    #[test]
    fn test_list_element_uses_item_require() -> Result<()> {
        let schema = RequestSchema::new(Fields::new().with(
            "seqs",
            FieldNode::list("SEQ一覧", FieldNode::item("SEQ", "seq").optional()),
        ));
        let outcome = RequestValidator::new(store()).validate(&schema, &params(json!({"seqs": ["", "3"]})))?;
        assert_eq!(outcome.get("seqs"), Some(&json!([0, 3])));
        Ok(())
    }

    #[test]
    fn test_unknown_model_aborts() {
        let schema = RequestSchema::new(
            Fields::new()
                .with("seq", FieldNode::item("SEQ", "seq"))
                .with("icon", FieldNode::item("アイコン", "icon")),
        );
        let err = RequestValidator::new(store())
            .validate(&schema, &params(json!({"seq": "x", "icon": "a.png"})))
            .unwrap_err();

        assert_eq!(err.model(), "icon");
        assert!(matches!(err, Error::ModelResolution { ref field_path, .. } if field_path == "icon"));
    }

    #[test]
    fn test_leaf_uses_configured_policy() -> Result<()> {
        let store = MemoryStore::new().with_model(
            "code",
            LeafSchema::new(ValueType::String)
                .with_condition(formcast_schemas::Condition::Alphanumeric)
                .with_condition(formcast_schemas::Condition::Alphabets),
        );
        let validator = RequestValidator::with_config(&store, ValidatorConfig::first_only());
        assert!(validator.leaf("code")?.validate(&json!("abc1"), true).is_ok());

        let validator = RequestValidator::new(&store);
        assert!(validator.leaf("code")?.validate(&json!("abc1"), true).is_err());
        Ok(())
    }
}
