use tracing::{debug, warn};

use crate::align::{align, validate_opcodes};
use crate::classify::{classify, ChangeKind, Classified, Granularity};
use crate::config::DiffConfig;
use crate::error::{CompareError, CompareResult};
use crate::merge::merge_ranges;
use crate::normalize::normalize_lines;
use crate::report::{ComparisonReport, DiffRange, LineChange, LinePair, SpanSide};
use crate::similarity::{self, SimilarityScore};

/// Comparison engine: normalizes, aligns, classifies and (for character
/// comparisons) merges, according to its [`DiffConfig`].
///
/// The engine holds no per-comparison state; one instance can serve any
/// number of concurrent comparisons.
#[derive(Clone, Debug, Default)]
pub struct DiffEngine {
    config: DiffConfig,
}

impl DiffEngine {
    pub fn new(config: DiffConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Compare two line sequences. Never fails: errors become a
    /// `success: false` report.
    pub fn compare_lines<S: AsRef<str>>(&self, lines1: &[S], lines2: &[S]) -> ComparisonReport {
        self.report(self.try_compare_lines(lines1, lines2))
    }

    /// Compare two raw texts character by character, merging nearby spans.
    /// Never fails: errors become a `success: false` report.
    pub fn compare_text(&self, text1: &str, text2: &str) -> ComparisonReport {
        self.report(self.try_compare_text(text1, text2))
    }

    /// Line comparison with errors surfaced to the caller.
    pub fn try_compare_lines<S: AsRef<str>>(
        &self,
        lines1: &[S],
        lines2: &[S],
    ) -> CompareResult<ComparisonReport> {
        self.config.validate()?;
        let old = normalize_lines(lines1);
        let new = normalize_lines(lines2);
        self.check_size("lines1", old.len())?;
        self.check_size("lines2", new.len())?;

        let ops = align(&old, &new);
        validate_opcodes(&ops, old.len(), new.len())?;

        let granularity = Granularity::PerUnit {
            threshold: self.config.modification_similarity_threshold,
        };
        let records = classify(&old, &new, &ops, granularity, |a, b| similarity::ratio(a, b));
        let changes: Vec<LineChange> = records
            .iter()
            .map(|record| line_change(&old, &new, record))
            .collect();

        debug!(
            old_lines = old.len(),
            new_lines = new.len(),
            opcodes = ops.len(),
            changes = changes.len(),
            "line comparison complete"
        );
        Ok(ComparisonReport::from_changes(changes))
    }

    /// Character comparison with errors surfaced to the caller.
    pub fn try_compare_text(&self, text1: &str, text2: &str) -> CompareResult<ComparisonReport> {
        self.config.validate()?;
        let old: Vec<char> = text1.chars().collect();
        let new: Vec<char> = text2.chars().collect();
        self.check_size("text1", old.len())?;
        self.check_size("text2", new.len())?;

        let ops = align(&old, &new);
        validate_opcodes(&ops, old.len(), new.len())?;

        let records = classify(&old, &new, &ops, Granularity::PerSpan, |_, _| 0.0);
        let spans: Vec<DiffRange> = records
            .iter()
            .map(|record| diff_range(&old, &new, record))
            .collect();
        let span_count = spans.len();
        let ranges = merge_ranges(spans, self.config.max_gap);

        debug!(
            old_chars = old.len(),
            new_chars = new.len(),
            spans = span_count,
            merged = ranges.len(),
            "text comparison complete"
        );
        Ok(ComparisonReport::from_ranges(ranges))
    }

    /// Similarity ratio of two strings, in `[0, 1]`.
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        similarity::ratio(a, b)
    }

    /// Coarse relatedness check against
    /// `similarity_threshold_for_generic_text_match`.
    pub fn is_similar_text(&self, a: &str, b: &str) -> bool {
        similarity::exceeds(a, b, self.config.similarity_threshold_for_generic_text_match)
    }

    /// Ratio and relatedness verdict, with the config and size limit
    /// enforced as for any other comparison.
    pub fn try_similarity(&self, a: &str, b: &str) -> CompareResult<SimilarityScore> {
        self.config.validate()?;
        self.check_size("text1", a.chars().count())?;
        self.check_size("text2", b.chars().count())?;
        let score = SimilarityScore::new(
            similarity::ratio(a, b),
            self.config.similarity_threshold_for_generic_text_match,
        );
        debug!(ratio = score.ratio, similar = score.similar, "similarity computed");
        Ok(score)
    }

    fn check_size(&self, side: &'static str, len: usize) -> CompareResult<()> {
        match self.config.max_units {
            Some(limit) if len > limit => Err(CompareError::InputTooLarge { side, len, limit }),
            _ => Ok(()),
        }
    }

    fn report(&self, result: CompareResult<ComparisonReport>) -> ComparisonReport {
        if let Err(e) = &result {
            warn!(error = %e, "comparison failed");
        }
        ComparisonReport::from_result(result)
    }
}

fn line_change(old: &[&str], new: &[&str], record: &Classified) -> LineChange {
    let line_number = record.position;
    match record.kind {
        ChangeKind::Unchanged => LineChange::Unchanged {
            content: old[record.old.clone()].join("\n"),
            line_number,
        },
        ChangeKind::Deletion => LineChange::Deletion {
            content: old[record.old.clone()].join("\n"),
            line_number,
        },
        ChangeKind::Addition => LineChange::Addition {
            content: new[record.new.clone()].join("\n"),
            line_number,
        },
        ChangeKind::Modification => LineChange::Modification {
            content: LinePair {
                old: old[record.old.clone()].join("\n"),
                new: new[record.new.clone()].join("\n"),
            },
            line_number,
        },
    }
}

fn diff_range(old: &[char], new: &[char], record: &Classified) -> DiffRange {
    DiffRange {
        kind: record.kind,
        file1: SpanSide::new(
            record.old.start,
            record.old.end,
            old[record.old.clone()].iter().collect::<String>(),
        ),
        file2: SpanSide::new(
            record.new.start,
            record.new.end,
            new[record.new.clone()].iter().collect::<String>(),
        ),
    }
}

/// Compare two line sequences with the default configuration.
pub fn compare_lines<S: AsRef<str>>(lines1: &[S], lines2: &[S]) -> ComparisonReport {
    DiffEngine::default().compare_lines(lines1, lines2)
}

/// Compare two texts character by character with the default configuration.
pub fn compare_text(text1: &str, text2: &str) -> ComparisonReport {
    DiffEngine::default().compare_text(text1, text2)
}
