//! Formcast Core - request parameter validation and casting
//!
//! This crate checks untrusted request parameter trees against request
//! schemas and produces either path-qualified error messages or a fully
//! cast "clean" parameter tree.
//!
//! # Main Components
//!
//! - **Leaf Validator**: type, condition and bound checks for one value
//! - **Tree Validator**: recursive item/list/object walk with ordered errors
//! - **API Envelope**: `{status, payload}` responses around validated handlers
//!
//! # Example
//!
//! ```
//! use formcast_core::{RequestValidator, Result};
//! use formcast_schemas::{FieldNode, Fields, LeafSchema, MemoryStore, RequestSchema, ValueType};
//! use serde_json::json;
//!
//! fn example() -> Result<()> {
//!     let store = MemoryStore::new().with_model("seq", LeafSchema::new(ValueType::Int));
//!     let schema = RequestSchema::new(Fields::new().with("seq", FieldNode::item("SEQ", "seq")));
//!     let params = json!({"seq": "abc"}).as_object().cloned().unwrap_or_default();
//!
//!     let outcome = RequestValidator::new(store).validate(&schema, &params)?;
//!     assert_eq!(outcome.messages(), vec!["SEQは、データの形式が不正です。"]);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! Copyright (c) 2025 Formcast Team
//! Licensed under the Apache-2.0 license

pub mod config;
pub mod error;
pub mod leaf;
pub mod messages;
pub mod response;
pub mod tree;

pub use config::{ConditionPolicy, ValidatorConfig};
pub use error::{Error, Result};
pub use leaf::{LeafValidator, Violation};
pub use response::{run_endpoint, ApiEndpoint, ApiResponse};
pub use tree::{FieldPath, ParamError, ParamErrorKind, RequestValidator, ValidationOutcome};
