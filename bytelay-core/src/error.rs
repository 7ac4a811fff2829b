//! Error types for Bytelay marshal operations

/// Errors that can occur while marshalling a layout to or from bytes
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarshalError {
    /// Source exhausted before the required bytes could be read
    #[error("Source exhausted before {0} required bytes")]
    Underflow(usize),

    /// Value's runtime shape does not match the expected representation
    #[error("Type mismatch: expected {expected}, got {found}")]
    TypeMismatch {
        /// Human-readable name of the expected shape.
        expected: &'static str,
        /// Human-readable name of the shape actually supplied.
        found: &'static str,
    },

    /// Record encode is missing a declared field
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Array/string value length differs from the resolved layout length
    #[error("Length mismatch: layout resolves to {expected}, value has {actual}")]
    LengthMismatch {
        /// The length the layout resolved to.
        expected: usize,
        /// The length of the value actually supplied.
        actual: usize,
    },

    /// Dynamic length referenced a context field that is not yet available
    #[error("Unresolved length: field {0:?} not available in context")]
    UnresolvedLength(String),

    /// Length expression produced a negative result
    #[error("Invalid length: {0}")]
    InvalidLength(i64),

    /// IO error during read/write
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for MarshalError {
    fn from(err: std::io::Error) -> Self {
        MarshalError::Io(err.to_string())
    }
}
