//! Error types for the accessibility bridge.

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while installing semantics on an element.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Role taxonomy or action registry error.
    #[error(transparent)]
    Core(#[from] horizon_semantics_core::Error),

    /// A custom action descriptor without a name.
    #[error("Custom action at index {index} has no name")]
    MissingActionName {
        /// Position of the descriptor in the action list.
        index: usize,
    },

    /// Inbound metadata that is not valid JSON of the expected shape.
    #[error("Malformed accessibility metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    /// Configuration that is not valid TOML of the expected shape.
    #[error("Malformed semantics configuration: {0}")]
    Config(#[from] toml::de::Error),
}
