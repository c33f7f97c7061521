//! Request schema tree definitions
//!
//! A request schema is an ordered mapping of field names to nodes. Each
//! node is one of three kinds:
//!
//! - `item`: a scalar validated against a named model
//! - `list`: a sequence whose elements share one node definition
//! - `object`: a mapping with its own ordered properties
//!
//! Documents tag the kind with a `type` key, which defaults to `item`.
//! Shapes that cannot be validated (an item without `format`, a list
//! without `items`, an object without `properties`) are rejected while
//! deserializing.
//!
//! Copyright (c) 2025 Formcast Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::LoaderResult;
use crate::loader::parser::{Format, SchemaParser};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Node kind tag as it appears in documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Item,
    List,
    Object,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Item => "item",
            NodeKind::List => "list",
            NodeKind::Object => "object",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar field validated against a model
#[derive(Debug, Clone, PartialEq)]
pub struct ItemField {
    pub label: Option<String>,
    /// Name of the model document
    pub model: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListField {
    pub label: Option<String>,
    pub required: bool,
    /// Definition shared by every element
    pub items: Box<FieldNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectField {
    pub label: Option<String>,
    pub required: bool,
    pub properties: Fields,
}

/// One node of a request schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFieldNode", into = "RawFieldNode")]
pub enum FieldNode {
    Item(ItemField),
    List(ListField),
    Object(ObjectField),
}

impl FieldNode {
    /// Required item node
    pub fn item(label: impl Into<String>, model: impl Into<String>) -> Self {
        FieldNode::Item(ItemField {
            label: Some(label.into()),
            model: model.into(),
            required: true,
        })
    }

    /// Required list node
    pub fn list(label: impl Into<String>, items: FieldNode) -> Self {
        FieldNode::List(ListField {
            label: Some(label.into()),
            required: true,
            items: Box::new(items),
        })
    }

    /// Required object node
    pub fn object(label: impl Into<String>, properties: Fields) -> Self {
        FieldNode::Object(ObjectField {
            label: Some(label.into()),
            required: true,
            properties,
        })
    }

    /// Same node with `require: false`
    pub fn optional(mut self) -> Self {
        match &mut self {
            FieldNode::Item(item) => item.required = false,
            FieldNode::List(list) => list.required = false,
            FieldNode::Object(object) => object.required = false,
        }
        self
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            FieldNode::Item(_) => NodeKind::Item,
            FieldNode::List(_) => NodeKind::List,
            FieldNode::Object(_) => NodeKind::Object,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            FieldNode::Item(item) => item.label.as_deref(),
            FieldNode::List(list) => list.label.as_deref(),
            FieldNode::Object(object) => object.label.as_deref(),
        }
    }

    pub fn required(&self) -> bool {
        match self {
            FieldNode::Item(item) => item.required,
            FieldNode::List(list) => list.required,
            FieldNode::Object(object) => object.required,
        }
    }

    fn collect_models<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match self {
            FieldNode::Item(item) => {
                out.insert(item.model.as_str());
            }
            FieldNode::List(list) => list.items.collect_models(out),
            FieldNode::Object(object) => {
                for (_, node) in object.properties.iter() {
                    node.collect_models(out);
                }
            }
        }
    }
}

/// Rejected node shape
#[derive(Debug, Error)]
#[error("{0}")]
pub struct DefinitionError(String);

/// Document form of a node before its shape is checked
#[derive(Debug, Default, Serialize, Deserialize)]
struct RawFieldNode {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    require: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Box<FieldNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    properties: Option<Fields>,
}

impl TryFrom<RawFieldNode> for FieldNode {
    type Error = DefinitionError;

    fn try_from(raw: RawFieldNode) -> Result<Self, Self::Error> {
        let required = raw.require.unwrap_or(true);
        let kind = raw.kind.as_deref().unwrap_or("item");

        let misplaced = |key: &str, allowed: &str| {
            DefinitionError(format!("`{key}` is only valid on {allowed} nodes, found on a {kind} node"))
        };

        match kind {
            "item" => {
                if raw.items.is_some() {
                    return Err(misplaced("items", "list"));
                }
                if raw.properties.is_some() {
                    return Err(misplaced("properties", "object"));
                }
                let model = raw
                    .format
                    .ok_or_else(|| DefinitionError("item node requires `format`".to_string()))?;
                Ok(FieldNode::Item(ItemField {
                    label: raw.name,
                    model,
                    required,
                }))
            }
            "list" => {
                if raw.format.is_some() {
                    return Err(misplaced("format", "item"));
                }
                if raw.properties.is_some() {
                    return Err(misplaced("properties", "object"));
                }
                let items = raw
                    .items
                    .ok_or_else(|| DefinitionError("list node requires `items`".to_string()))?;
                Ok(FieldNode::List(ListField {
                    label: raw.name,
                    required,
                    items,
                }))
            }
            "object" => {
                if raw.format.is_some() {
                    return Err(misplaced("format", "item"));
                }
                if raw.items.is_some() {
                    return Err(misplaced("items", "list"));
                }
                let properties = raw
                    .properties
                    .ok_or_else(|| DefinitionError("object node requires `properties`".to_string()))?;
                Ok(FieldNode::Object(ObjectField {
                    label: raw.name,
                    required,
                    properties,
                }))
            }
            other => Err(DefinitionError(format!(
                "unknown node type `{other}`, expected item, list or object"
            ))),
        }
    }
}

impl From<FieldNode> for RawFieldNode {
    fn from(node: FieldNode) -> Self {
        match node {
            FieldNode::Item(item) => RawFieldNode {
                kind: Some("item".to_string()),
                name: item.label,
                format: Some(item.model),
                require: Some(item.required),
                ..RawFieldNode::default()
            },
            FieldNode::List(list) => RawFieldNode {
                kind: Some("list".to_string()),
                name: list.label,
                require: Some(list.required),
                items: Some(list.items),
                ..RawFieldNode::default()
            },
            FieldNode::Object(object) => RawFieldNode {
                kind: Some("object".to_string()),
                name: object.label,
                require: Some(object.required),
                properties: Some(object.properties),
                ..RawFieldNode::default()
            },
        }
    }
}

/// Field definitions in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<(String, FieldNode)>);

impl Fields {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a field, replacing an earlier definition with the same name
    pub fn with(mut self, name: impl Into<String>, node: FieldNode) -> Self {
        self.insert(name, node);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, node: FieldNode) {
        let name = name.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = node,
            None => self.0.push((name, node)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldNode> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, node)| node)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldNode)> {
        self.0.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, node) in &self.0 {
            map.serialize_entry(name, node)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Fields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = Fields;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of field names to field definitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Fields, A::Error> {
                let mut fields: Vec<(String, FieldNode)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, node)) = access.next_entry::<String, FieldNode>()? {
                    if fields.iter().any(|(existing, _)| *existing == name) {
                        return Err(serde::de::Error::custom(format!("duplicate field `{name}`")));
                    }
                    fields.push((name, node));
                }
                Ok(Fields(fields))
            }
        }

        deserializer.deserialize_map(FieldsVisitor)
    }
}

impl FromIterator<(String, FieldNode)> for Fields {
    fn from_iter<I: IntoIterator<Item = (String, FieldNode)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (name, node) in iter {
            fields.insert(name, node);
        }
        fields
    }
}

/// Root of a request schema: an implicit object without label or flag
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestSchema {
    fields: Fields,
}

impl RequestSchema {
    pub fn new(fields: Fields) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Every model name referenced anywhere in the tree, sorted
    pub fn model_names(&self) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        for (_, node) in self.fields.iter() {
            node.collect_models(&mut out);
        }
        out
    }

    /// Load a request schema document (JSON or YAML by extension)
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        SchemaParser::new().load_typed(path)
    }

    pub fn from_json_str(content: &str) -> LoaderResult<Self> {
        Self::from_str_with(content, Format::Json)
    }

    pub fn from_yaml_str(content: &str) -> LoaderResult<Self> {
        Self::from_str_with(content, Format::Yaml)
    }

    fn from_str_with(content: &str, format: Format) -> LoaderResult<Self> {
        SchemaParser::new().decode_str(content, format, Path::new("<inline>"))
    }
}

impl From<Fields> for RequestSchema {
    fn from(fields: Fields) -> Self {
        Self::new(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_type_defaults_to_item() {
        let node: FieldNode = serde_json::from_value(json!({"name": "SEQ", "format": "user_seq"})).unwrap();
        assert_eq!(
            node,
            FieldNode::Item(ItemField {
                label: Some("SEQ".to_string()),
                model: "user_seq".to_string(),
                required: true,
            })
        );
    }

    #[test]
    fn test_illegal_shapes_are_rejected() {
        let cases = [
            json!({"type": "item", "name": "x"}),
            json!({"type": "list", "name": "x"}),
            json!({"type": "object", "name": "x"}),
            json!({"type": "tuple", "name": "x"}),
            json!({"type": "item", "format": "m", "items": {"format": "m"}}),
        ];
        for case in cases {
            assert!(serde_json::from_value::<FieldNode>(case.clone()).is_err(), "accepted {case}");
        }
    }

    #[test]
    fn test_duplicate_property_rejected() {
        let err = RequestSchema::from_json_str(r#"{"a": {"format": "m"}, "a": {"format": "n"}}"#).unwrap_err();
        assert!(err.to_string().contains("duplicate field `a`"));
    }

    #[test]
    fn test_model_names_collects_nested() {
        let schema = RequestSchema::new(
            Fields::new()
                .with("seq", FieldNode::item("SEQ", "user_seq"))
                .with(
                    "friends",
                    FieldNode::list(
                        "フレンド",
                        FieldNode::object(
                            "フレンド",
                            Fields::new()
                                .with("seq", FieldNode::item("フレンドSEQ", "user_seq"))
                                .with("icons", FieldNode::list("アイコン", FieldNode::item("アイコン", "icon_path"))),
                        ),
                    ),
                ),
        );

        let names: Vec<&str> = schema.model_names().into_iter().collect();
        assert_eq!(names, vec!["icon_path", "user_seq"]);
    }

    #[test]
    fn test_serialize_restores_document_shape() {
        let node = FieldNode::list("アイコン", FieldNode::item("アイコンパス", "icon_path")).optional();
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "type": "list",
                "name": "アイコン",
                "require": false,
                "items": {"type": "item", "name": "アイコンパス", "format": "icon_path", "require": true}
            })
        );
    }
}
