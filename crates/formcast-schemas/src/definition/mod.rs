//! Schema definition types
//!
//! Copyright (c) 2025 Formcast Team
//! Licensed under the Apache-2.0 license

pub mod model;
pub mod node;

pub use model::{Condition, LeafSchema, ValueType};
pub use node::{DefinitionError, FieldNode, Fields, ItemField, ListField, NodeKind, ObjectField, RequestSchema};
