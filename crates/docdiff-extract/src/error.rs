//! Error types for document loading and extraction.

use docdiff_core::CompareError;

use crate::document::DocumentKind;

/// Errors that can occur while reading a document into lines.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Reading the document from disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document bytes are not a valid instance of their format.
    #[error("malformed document {name}: {reason}")]
    Malformed { name: String, reason: String },

    /// No extractor is registered for the document's kind.
    #[error("no extractor registered for {0} documents")]
    Unsupported(DocumentKind),

    /// The file name does not map to a known document kind.
    #[error("unsupported file type: {0}")]
    UnknownKind(String),
}

/// An unrecognized file type is a caller error; everything else is an
/// extraction failure.
impl From<ExtractError> for CompareError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnknownKind(_) => CompareError::TypeMismatch(err.to_string()),
            _ => CompareError::Extraction(err.to_string()),
        }
    }
}

/// Convenience alias for extraction results.
pub type ExtractResult<T> = Result<T, ExtractError>;
