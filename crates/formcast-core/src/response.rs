//! API response envelope and the validate-then-handle endpoint flow
//!
//! Every API answer is `{status, payload}`: status `0` on success and `9`
//! on failure. Handlers only run when the request parameters validated.
//!
//! Copyright (c) 2025 Formcast Team
//! Licensed under the Apache-2.0 license

use crate::messages::{REQUEST_HAS_ERRORS, VALIDATION_SERVER_ERROR};
use crate::tree::{RequestValidator, ValidationOutcome};
use formcast_schemas::{ModelSource, RequestSchema};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt::Display;
use tracing::error;

/// Envelope returned by API endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u8,
    pub payload: Value,
}

impl ApiResponse {
    pub const STATUS_SUCCESS: u8 = 0;
    pub const STATUS_FAILURE: u8 = 9;

    pub fn success(payload: impl Into<Value>) -> Self {
        Self {
            status: Self::STATUS_SUCCESS,
            payload: payload.into(),
        }
    }

    pub fn failure(payload: impl Into<Value>) -> Self {
        Self {
            status: Self::STATUS_FAILURE,
            payload: payload.into(),
        }
    }

    /// Failure listing every parameter error message
    pub fn invalid_parameters(outcome: &ValidationOutcome) -> Self {
        Self::failure(json!({
            "message": REQUEST_HAS_ERRORS,
            "errors": outcome.messages(),
        }))
    }

    /// Failure for a validation call that could not run
    pub fn server_error(err: &impl Display) -> Self {
        Self::failure(json!({
            "message": VALIDATION_SERVER_ERROR,
            "errors": [err.to_string()],
        }))
    }

    pub fn is_success(&self) -> bool {
        self.status == Self::STATUS_SUCCESS
    }
}

/// An API operation with a declared request schema
pub trait ApiEndpoint {
    fn schema(&self) -> &RequestSchema;

    /// Handle already validated and cast parameters
    fn handle(&self, params: &Map<String, Value>) -> anyhow::Result<ApiResponse>;
}

/// Validate `raw` against the endpoint's schema and dispatch on success.
///
/// Parameter errors and unresolvable models become failure envelopes;
/// only errors raised by the handler itself are returned as `Err`.
pub fn run_endpoint<E, S>(endpoint: &E, validator: &RequestValidator<S>, raw: &Map<String, Value>) -> anyhow::Result<ApiResponse>
where
    E: ApiEndpoint + ?Sized,
    S: ModelSource,
{
    let outcome = match validator.validate(endpoint.schema(), raw) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(model = e.model(), error = %e, "Request validation could not run");
            return Ok(ApiResponse::server_error(&e));
        }
    };

    match outcome.clean_parameters() {
        Some(clean) => endpoint.handle(clean),
        None => Ok(ApiResponse::invalid_parameters(&outcome)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcast_schemas::{FieldNode, Fields, LeafSchema, MemoryStore, ValueType};

    struct Echo {
        schema: RequestSchema,
    }

    impl ApiEndpoint for Echo {
        fn schema(&self) -> &RequestSchema {
            &self.schema
        }

        fn handle(&self, params: &Map<String, Value>) -> anyhow::Result<ApiResponse> {
            Ok(ApiResponse::success(Value::Object(params.clone())))
        }
    }

    fn echo(model: &str) -> Echo {
        Echo {
            schema: RequestSchema::new(Fields::new().with("seq", FieldNode::item("SEQ", model))),
        }
    }

    fn raw(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_success_dispatches_clean_parameters() {
        let store = MemoryStore::new().with_model("seq", LeafSchema::new(ValueType::Int));
        let validator = RequestValidator::new(store);

        let response = run_endpoint(&echo("seq"), &validator, &raw(json!({"seq": "5"}))).unwrap();
        assert!(response.is_success());
        assert_eq!(response.payload, json!({"seq": 5}));
    }

    #[test]
    fn test_invalid_parameters_envelope() {
        let store = MemoryStore::new().with_model("seq", LeafSchema::new(ValueType::Int));
        let validator = RequestValidator::new(store);

        let response = run_endpoint(&echo("seq"), &validator, &raw(json!({}))).unwrap();
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "status": 9,
                "payload": {
                    "message": "リクエストパラメータにエラーがあります。",
                    "errors": ["リクエストに必要な値が設定されていません。(seq)"]
                }
            })
        );
    }

    #[test]
    fn test_missing_model_envelope() {
        let validator = RequestValidator::new(MemoryStore::new());

        let response = run_endpoint(&echo("seq"), &validator, &raw(json!({"seq": 1}))).unwrap();
        assert_eq!(response.status, ApiResponse::STATUS_FAILURE);
        assert_eq!(response.payload["message"], "バリデートに関するサーバーエラーが発生しました。");
        assert_eq!(
            response.payload["errors"][0],
            "modelファイルが見つかりませんでした。: <memory>/seq"
        );
    }
}
