//! Error types for Horizon Semantics core.

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the role taxonomy and the action registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A role name that is not part of the taxonomy.
    #[error("Invalid accessibility role value: {name}")]
    InvalidRole {
        /// The name that failed to parse.
        name: String,
    },

    /// A dynamic action ID seed inside the native action range.
    #[error("Dynamic action base {base:#x} must not be below the native ceiling {ceiling:#x}")]
    ReservedActionRange {
        /// The requested seed.
        base: i32,
        /// The lowest value a dynamic ID may take.
        ceiling: i32,
    },

    /// The dynamic counter has handed out its last ID.
    #[error("No dynamic action IDs left above base {base:#x}")]
    ActionIdsExhausted {
        /// The registry's seed.
        base: i32,
    },
}

impl Error {
    /// Create an invalid role error.
    pub fn invalid_role(name: impl Into<String>) -> Self {
        Self::InvalidRole { name: name.into() }
    }
}
