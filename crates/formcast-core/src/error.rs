//! Error types for the formcast core library
//!
//! Only configuration failures are errors here. Everything wrong with the
//! submitted values is reported through [`crate::ValidationOutcome`].
//!
//! Copyright (c) 2025 Formcast Team
//! Licensed under the Apache-2.0 license

use formcast_schemas::LoaderError;
use thiserror::Error;

/// Main error type for validation calls
#[derive(Error, Debug)]
pub enum Error {
    /// A model referenced by the request schema could not be resolved
    #[error("{source}")]
    ModelResolution {
        /// Model name from the item's `format`
        model: String,
        /// Path of the field that referenced it
        field_path: String,
        #[source]
        source: LoaderError,
    },
}

impl Error {
    pub fn model_resolution(model: impl Into<String>, field_path: impl Into<String>, source: LoaderError) -> Self {
        Self::ModelResolution {
            model: model.into(),
            field_path: field_path.into(),
            source,
        }
    }

    /// Model name involved in the failure
    pub fn model(&self) -> &str {
        match self {
            Self::ModelResolution { model, .. } => model,
        }
    }
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;
