//! Formcast Schemas - request schema and model definitions
//!
//! This crate holds the declarative side of formcast:
//! - **Models** ([`LeafSchema`]): type, conditions and bounds for one scalar
//! - **Request schemas** ([`RequestSchema`]): ordered trees of `item`,
//!   `list` and `object` nodes that reference models by name
//! - **Stores** ([`ModelSource`]): how models are found at validation time
//!
//! ## Quick Start
//!
//! ```rust
//! use formcast_schemas::{FieldNode, RequestSchema};
//!
//! let schema = RequestSchema::from_json_str(r#"{
//!     "name": {"type": "item", "name": "名前", "format": "user_name"},
//!     "icons": {
//!         "type": "list",
//!         "name": "アイコンリスト",
//!         "require": false,
//!         "items": {"type": "item", "name": "アイコンパス", "format": "icon_path"}
//!     }
//! }"#).unwrap();
//!
//! assert_eq!(schema.fields().len(), 2);
//! assert!(matches!(schema.fields().get("icons"), Some(FieldNode::List(_))));
//! ```
//!
//! Copyright (c) 2025 Formcast Team
//! Licensed under the Apache-2.0 license

pub mod definition;
pub mod loader;

// Re-export commonly used types for convenience
pub use definition::{
    Condition, FieldNode, Fields, ItemField, LeafSchema, ListField, NodeKind, ObjectField,
    RequestSchema, ValueType,
};
pub use loader::{LoaderError, LoaderResult, MemoryStore, ModelSource, ModelStore, ModelStoreConfig};
