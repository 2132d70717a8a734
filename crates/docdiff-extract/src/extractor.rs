use crate::document::{Document, DocumentKind};
use crate::error::{ExtractError, ExtractResult};

/// Turns a document into the ordered lines the comparison engine consumes.
///
/// Implementations must:
/// - return lines in reading order,
/// - trim each line and omit the empty ones,
/// - fail with [`ExtractError::Malformed`] rather than return partial output
///   for documents they cannot read.
pub trait LineExtractor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// The document kinds this extractor understands.
    fn kinds(&self) -> &[DocumentKind];

    /// Extract the document's lines.
    fn extract_lines(&self, document: &Document) -> ExtractResult<Vec<String>>;
}

/// Extractor for UTF-8 plain-text documents.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainTextExtractor;

impl LineExtractor for PlainTextExtractor {
    fn name(&self) -> &'static str {
        "plain-text"
    }

    fn kinds(&self) -> &[DocumentKind] {
        &[DocumentKind::Text]
    }

    fn extract_lines(&self, document: &Document) -> ExtractResult<Vec<String>> {
        let text = std::str::from_utf8(&document.bytes).map_err(|e| ExtractError::Malformed {
            name: document.name.clone(),
            reason: e.to_string(),
        })?;
        Ok(split_lines(text))
    }
}

/// Split text into trimmed, non-empty lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
