//! Difference engine for docdiff.
//!
//! Compares two versions of a document, as line sequences or as raw text, and
//! produces a reviewable report of additions, deletions, modifications and
//! unchanged content with aggregate counts.
//!
//! # Pipeline
//!
//! - [`normalize`] -- trim lines and drop blank ones (line mode)
//! - [`align`] -- minimal edit script as [`Opcode`]s
//! - [`classify`] -- typed records; line mode gates replacements on
//!   [`similarity`], character mode always reports them as modifications
//! - [`merge`] -- coalesce nearby character spans into blocks
//! - [`stats`] -- counts by [`ChangeKind`]
//!
//! # Example
//!
//! ```rust
//! use docdiff_core::{compare_lines, ChangeKind};
//!
//! let report = compare_lines(&["The cat sat.", "It rained."], &["The cat sat."]);
//! assert!(report.success);
//! assert_eq!(report.line_changes()[1].kind(), ChangeKind::Deletion);
//! ```

pub mod align;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod merge;
pub mod normalize;
pub mod report;
pub mod similarity;
pub mod stats;

pub use align::{align, validate_opcodes, OpTag, Opcode};
pub use classify::{classify, ChangeKind, Classified, Granularity};
pub use config::{DiffConfig, MERGE_SEPARATOR};
pub use engine::{compare_lines, compare_text, DiffEngine};
pub use error::{CompareError, CompareResult};
pub use merge::merge_ranges;
pub use report::{ComparisonReport, DiffRange, LineChange, LinePair, SpanSide};
pub use similarity::{ratio, SimilarityScore};
pub use stats::DiffStats;
