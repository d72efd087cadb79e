//! Schema-checked conversion from untyped JSON to wire types.

use ops_schema::{SchemaError, SchemaRegistry};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Declared shape of one endpoint's response.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Shape {
    /// Name in the [`SchemaRegistry`].
    pub schema: &'static str,
    /// Rendered after `Invalid response: ` when validation fails.
    pub expected: &'static str,
}

/// Validate `value` against `shape` and deserialize it.
pub(crate) fn decode<T: DeserializeOwned>(value: Value, shape: Shape) -> Result<T, ApiError> {
    if let Err(error) = SchemaRegistry::global().validate(shape.schema, &value) {
        let errors = match error {
            SchemaError::ValidationFailed { errors } => errors,
            other => vec![other.to_string()],
        };
        tracing::warn!(schema = shape.schema, ?errors, "response failed schema validation");
        return Err(ApiError::InvalidResponse {
            expected: shape.expected.to_string(),
            errors,
        });
    }

    serde_json::from_value(value).map_err(|e| ApiError::InvalidResponse {
        expected: shape.expected.to_string(),
        errors: vec![e.to_string()],
    })
}
