//! Comparison report model and its wire shape.
//!
//! Line comparisons report [`LineChange`] records under `changes`; character
//! comparisons report [`DiffRange`] spans under `ranges`. Failed comparisons
//! carry only `success: false` and an `error` message.

use serde::{Deserialize, Serialize};

use crate::classify::ChangeKind;
use crate::error::CompareError;
use crate::stats::DiffStats;

/// Old and new text of a modified line (or run of lines joined by `\n`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinePair {
    pub old: String,
    pub new: String,
}

/// A single line-mode change record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LineChange {
    Unchanged { content: String, line_number: usize },
    Addition { content: String, line_number: usize },
    Deletion { content: String, line_number: usize },
    Modification { content: LinePair, line_number: usize },
}

impl LineChange {
    pub fn kind(&self) -> ChangeKind {
        match self {
            Self::Unchanged { .. } => ChangeKind::Unchanged,
            Self::Addition { .. } => ChangeKind::Addition,
            Self::Deletion { .. } => ChangeKind::Deletion,
            Self::Modification { .. } => ChangeKind::Modification,
        }
    }

    pub fn line_number(&self) -> usize {
        match self {
            Self::Unchanged { line_number, .. }
            | Self::Addition { line_number, .. }
            | Self::Deletion { line_number, .. }
            | Self::Modification { line_number, .. } => *line_number,
        }
    }

    /// Text this record contributes to the old document, if any.
    pub fn old_text(&self) -> Option<&str> {
        match self {
            Self::Unchanged { content, .. } | Self::Deletion { content, .. } => Some(content),
            Self::Modification { content, .. } => Some(&content.old),
            Self::Addition { .. } => None,
        }
    }

    /// Text this record contributes to the new document, if any.
    pub fn new_text(&self) -> Option<&str> {
        match self {
            Self::Unchanged { content, .. } | Self::Addition { content, .. } => Some(content),
            Self::Modification { content, .. } => Some(&content.new),
            Self::Deletion { .. } => None,
        }
    }
}

/// One side of a character-mode difference span.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanSide {
    /// Start offset, in chars, into the original text.
    pub start: usize,
    /// End offset (exclusive), in chars.
    pub end: usize,
    pub text: String,
}

impl SpanSide {
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Length of `text` in chars.
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A character-mode difference span over both texts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRange {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    pub file1: SpanSide,
    pub file2: SpanSide,
}

/// The result of a comparison, successful or not.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<Vec<LineChange>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranges: Option<Vec<DiffRange>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<DiffStats>,
    /// Number of line-mode change records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_lines: Option<usize>,
}

impl ComparisonReport {
    /// A successful line-mode report. Stats are counted from `changes`.
    pub fn from_changes(changes: Vec<LineChange>) -> Self {
        let stats = DiffStats::from_kinds(changes.iter().map(LineChange::kind));
        Self {
            success: true,
            error: None,
            total_lines: Some(changes.len()),
            changes: Some(changes),
            ranges: None,
            stats: Some(stats),
        }
    }

    /// A successful character-mode report. Stats are counted from `ranges`.
    pub fn from_ranges(ranges: Vec<DiffRange>) -> Self {
        let stats = DiffStats::from_kinds(ranges.iter().map(|r| r.kind)).without_unchanged();
        Self {
            success: true,
            error: None,
            changes: None,
            ranges: Some(ranges),
            stats: Some(stats),
            total_lines: None,
        }
    }

    /// A failed report carrying the error's message.
    pub fn failure(error: &CompareError) -> Self {
        Self::failure_message(error.to_string())
    }

    /// A failed report with a caller-supplied message.
    pub fn failure_message(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            changes: None,
            ranges: None,
            stats: None,
            total_lines: None,
        }
    }

    /// Fold a fallible comparison into a report.
    pub fn from_result(result: Result<Self, CompareError>) -> Self {
        result.unwrap_or_else(|e| Self::failure(&e))
    }

    /// Line-mode records, or an empty slice.
    pub fn line_changes(&self) -> &[LineChange] {
        self.changes.as_deref().unwrap_or_default()
    }

    /// Character-mode spans, or an empty slice.
    pub fn diff_ranges(&self) -> &[DiffRange] {
        self.ranges.as_deref().unwrap_or_default()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
