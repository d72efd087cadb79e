//! Cross-cutting error types for Opsdeck.
//!
//! Domain-specific errors (`ApiError`, `AuthError`, `ConfigError`) live in
//! their own crates. `opsctl` converges them into `anyhow::Error`.

use thiserror::Error;

/// Errors that can be raised by any Opsdeck crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A value could not be serialized for the wire.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
