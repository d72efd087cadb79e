use thiserror::Error;

/// Failures while assembling or checking [`crate::OpsConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or `OPSDECK_*` variable could not be merged or typed.
    #[error("invalid opsdeck configuration: {0}")]
    Figment(#[from] figment::Error),

    #[error("[{section}] is not configured")]
    NotConfigured { section: String },

    #[error("{field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
