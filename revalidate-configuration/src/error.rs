use thiserror::Error;

/// Error returned while loading or validating configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The document is not valid YAML or does not match the schema.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// `cache_control` cannot be sent as a header value.
    #[error("invalid cache_control value {0:?}")]
    InvalidCacheControl(String),

    /// Vetoed responses must expire strictly in the past.
    #[error("far_past must be greater than zero")]
    ZeroFarPast,
}
