//! Loading of models and request schemas
//!
//! This module provides:
//! - YAML and JSON parsing with preserved key order
//! - The [`ModelSource`] seam the validators resolve models through
//! - A file-backed [`ModelStore`] with a load-once cache
//! - An in-memory [`MemoryStore`]
//!
//! # Example Usage
//!
//! ```no_run
//! use formcast_schemas::loader::{ModelSource, ModelStore};
//!
//! let store = ModelStore::new("config/models");
//! let model = store.resolve("user_name")?;
//! println!("max length: {:?}", model.max_length);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Formcast Team
//! Licensed under the Apache-2.0 license

pub mod cache;
pub mod error;
pub mod parser;
pub mod store;

pub use cache::{CacheConfig, CacheEntry, CacheStats, ModelCache};
pub use error::{LoaderError, LoaderResult};
pub use parser::{Format, SchemaParser};
pub use store::{MemoryStore, ModelSource, ModelStore, ModelStoreConfig};
