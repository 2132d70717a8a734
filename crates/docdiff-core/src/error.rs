//! Error types for the comparison engine.

/// Errors that can occur while producing a comparison.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// The document-reading collaborator could not produce lines.
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// The two inputs are of incompatible kinds, or one of them is absent.
    #[error("input type mismatch: {0}")]
    TypeMismatch(String),

    /// The aligner produced an opcode stream that does not cover its inputs.
    #[error("internal alignment error: {0}")]
    InternalAlignment(String),

    /// An input exceeds the configured unit limit.
    #[error("input too large: {side} has {len} units, limit is {limit}")]
    InputTooLarge {
        side: &'static str,
        len: usize,
        limit: usize,
    },

    /// A configuration value is out of range or could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CompareError {
    /// Returns `true` if the error was caused by the caller's input rather
    /// than by the engine itself.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::InternalAlignment(_))
    }
}

/// Convenience alias for comparison results.
pub type CompareResult<T> = Result<T, CompareError>;
