use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    /// No response schema is registered under this name.
    #[error("unknown response schema '{0}'")]
    NotFound(String),

    /// The payload broke the schema. One entry per violation, each prefixed
    /// with the JSON pointer of the offending value.
    #[error("payload does not match schema: {}", errors.join("; "))]
    ValidationFailed { errors: Vec<String> },
}
