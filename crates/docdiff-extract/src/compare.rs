//! Document-level comparison: check kinds, extract lines, compare.

use docdiff_core::{CompareError, CompareResult, ComparisonReport, DiffEngine};
use tracing::warn;

use crate::document::Document;
use crate::registry::ExtractorRegistry;

/// Compare two documents line by line. Never fails: kind mismatches and
/// extraction errors become a `success: false` report.
pub fn compare_documents(
    engine: &DiffEngine,
    registry: &ExtractorRegistry,
    doc1: &Document,
    doc2: &Document,
) -> ComparisonReport {
    match try_compare_documents(engine, registry, doc1, doc2) {
        Ok(report) => report,
        Err(e) => {
            warn!(doc1 = %doc1.name, doc2 = %doc2.name, error = %e, "document comparison failed");
            ComparisonReport::failure(&e)
        }
    }
}

/// Document comparison with errors surfaced to the caller.
pub fn try_compare_documents(
    engine: &DiffEngine,
    registry: &ExtractorRegistry,
    doc1: &Document,
    doc2: &Document,
) -> CompareResult<ComparisonReport> {
    if doc1.kind != doc2.kind {
        return Err(CompareError::TypeMismatch(format!(
            "files must be of the same type ({} vs {})",
            doc1.kind, doc2.kind
        )));
    }

    let lines1 = registry.extract_lines(doc1)?;
    let lines2 = registry.extract_lines(doc2)?;
    engine.try_compare_lines(&lines1, &lines2)
}
