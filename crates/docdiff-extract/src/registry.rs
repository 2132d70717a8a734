use std::collections::HashMap;
use std::sync::Arc;

use crate::document::{Document, DocumentKind};
use crate::error::{ExtractError, ExtractResult};
use crate::extractor::{LineExtractor, PlainTextExtractor};

/// Maps document kinds to the extractors that read them.
///
/// Extractors for binary formats (DOCX, PDF) are supplied by the caller. Any
/// format quirks an extractor needs to tolerate belong in that extractor,
/// configured when it is constructed and passed in here.
#[derive(Clone, Default)]
pub struct ExtractorRegistry {
    extractors: HashMap<DocumentKind, Arc<dyn LineExtractor>>,
}

impl ExtractorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in plain-text extractor.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PlainTextExtractor));
        registry
    }

    /// Register `extractor` for every kind it declares, replacing any
    /// previous registration for those kinds.
    pub fn register(&mut self, extractor: Arc<dyn LineExtractor>) {
        for kind in extractor.kinds() {
            self.extractors.insert(*kind, Arc::clone(&extractor));
        }
    }

    /// Returns `true` if some extractor handles `kind`.
    pub fn supports(&self, kind: DocumentKind) -> bool {
        self.extractors.contains_key(&kind)
    }

    /// Extract `document` with the extractor registered for its kind.
    pub fn extract_lines(&self, document: &Document) -> ExtractResult<Vec<String>> {
        let extractor = self
            .extractors
            .get(&document.kind)
            .ok_or(ExtractError::Unsupported(document.kind))?;
        let lines = extractor.extract_lines(document)?;
        tracing::debug!(
            extractor = extractor.name(),
            document = %document.name,
            lines = lines.len(),
            "extracted document lines"
        );
        Ok(lines)
    }
}

impl std::fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<&str> = self.extractors.keys().map(DocumentKind::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("ExtractorRegistry").field("kinds", &kinds).finish()
    }
}
