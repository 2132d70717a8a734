//! Change classification: turn an opcode stream into typed change records.
//!
//! Line comparisons classify per unit and gate equal-length replacements on
//! similarity. Character comparisons classify per span and always treat a
//! replacement as a modification, leaving granularity to the span merger.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::align::{OpTag, Opcode};
use crate::similarity;

/// The type of a change record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Unchanged,
    Addition,
    Deletion,
    Modification,
}

impl ChangeKind {
    /// Lower-case name, as used in serialized reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unchanged => "unchanged",
            Self::Addition => "addition",
            Self::Deletion => "deletion",
            Self::Modification => "modification",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an opcode stream is broken into records.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Granularity {
    /// One record per unit. Equal-length replacements are split into pairs;
    /// a pair becomes a modification only if its score is strictly greater
    /// than `threshold`, otherwise a deletion followed by an addition.
    PerUnit { threshold: f64 },
    /// One record per non-equal opcode. Equal runs are skipped and
    /// replacements are always modifications.
    PerSpan,
}

/// A classified change, expressed as spans over the two input sequences.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classified {
    pub kind: ChangeKind,
    pub old: Range<usize>,
    pub new: Range<usize>,
    /// 1-based sequence counter for per-unit records, old-side offset for
    /// per-span records.
    pub position: usize,
}

impl Classified {
    fn new(kind: ChangeKind, old: Range<usize>, new: Range<usize>, position: usize) -> Self {
        Self {
            kind,
            old,
            new,
            position,
        }
    }
}

/// Classify `ops` (an alignment of `old` against `new`).
///
/// `score` is consulted only for equal-length replacements under
/// [`Granularity::PerUnit`].
pub fn classify<T, F>(
    old: &[T],
    new: &[T],
    ops: &[Opcode],
    granularity: Granularity,
    score: F,
) -> Vec<Classified>
where
    F: Fn(&T, &T) -> f64,
{
    match granularity {
        Granularity::PerUnit { threshold } => classify_units(old, new, ops, threshold, score),
        Granularity::PerSpan => classify_spans(ops),
    }
}

fn classify_units<T, F>(
    old: &[T],
    new: &[T],
    ops: &[Opcode],
    threshold: f64,
    score: F,
) -> Vec<Classified>
where
    F: Fn(&T, &T) -> f64,
{
    let mut records = Vec::new();
    let mut position = 1;

    for op in ops {
        match op.tag {
            OpTag::Equal => {
                for (i, j) in op.old.clone().zip(op.new.clone()) {
                    records.push(Classified::new(
                        ChangeKind::Unchanged,
                        i..i + 1,
                        j..j + 1,
                        position,
                    ));
                    position += 1;
                }
            }
            OpTag::Insert => {
                let at = op.old.start;
                for j in op.new.clone() {
                    records.push(Classified::new(ChangeKind::Addition, at..at, j..j + 1, position));
                    position += 1;
                }
            }
            OpTag::Delete => {
                let at = op.new.start;
                for i in op.old.clone() {
                    records.push(Classified::new(ChangeKind::Deletion, i..i + 1, at..at, position));
                    position += 1;
                }
            }
            OpTag::Replace if op.old.len() == op.new.len() => {
                for (i, j) in op.old.clone().zip(op.new.clone()) {
                    if similarity::above(score(&old[i], &new[j]), threshold) {
                        records.push(Classified::new(
                            ChangeKind::Modification,
                            i..i + 1,
                            j..j + 1,
                            position,
                        ));
                    } else {
                        records.push(Classified::new(ChangeKind::Deletion, i..i + 1, j..j, position));
                        records.push(Classified::new(
                            ChangeKind::Addition,
                            i + 1..i + 1,
                            j..j + 1,
                            position,
                        ));
                    }
                    position += 1;
                }
            }
            OpTag::Replace => {
                records.push(Classified::new(
                    ChangeKind::Modification,
                    op.old.clone(),
                    op.new.clone(),
                    position,
                ));
                position += op.old.len() + op.new.len();
            }
        }
    }

    records
}

fn classify_spans(ops: &[Opcode]) -> Vec<Classified> {
    ops.iter()
        .filter_map(|op| {
            let kind = match op.tag {
                OpTag::Equal => return None,
                OpTag::Insert => ChangeKind::Addition,
                OpTag::Delete => ChangeKind::Deletion,
                OpTag::Replace => ChangeKind::Modification,
            };
            Some(Classified::new(kind, op.old.clone(), op.new.clone(), op.old.start))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::align;
    use crate::similarity::ratio;

    const GATE: Granularity = Granularity::PerUnit { threshold: 0.8 };

    fn lines(old: &[&str], new: &[&str]) -> Vec<Classified> {
        let ops = align(old, new);
        classify(old, new, &ops, GATE, |a, b| ratio(a, b))
    }

    fn kinds(records: &[Classified]) -> Vec<ChangeKind> {
        records.iter().map(|r| r.kind).collect()
    }

    #[test]
    fn equal_lines_are_unchanged() {
        let records = lines(&["a", "b", "c"], &["a", "b", "c"]);
        assert_eq!(kinds(&records), vec![ChangeKind::Unchanged; 3]);
        let positions: Vec<usize> = records.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn similar_pair_is_modification() {
        let records = lines(&["keep", "abcdefghij"], &["keep", "abcdefghix"]);
        assert_eq!(
            kinds(&records),
            vec![ChangeKind::Unchanged, ChangeKind::Modification]
        );
        assert_eq!(records[1].old, 1..2);
        assert_eq!(records[1].new, 1..2);
        assert_eq!(records[1].position, 2);
    }

    #[test]
    fn dissimilar_pair_splits_with_shared_position() {
        let records = lines(&["alpha"], &["zzz completely unrelated zzz"]);
        assert_eq!(
            kinds(&records),
            vec![ChangeKind::Deletion, ChangeKind::Addition]
        );
        assert_eq!(records[0].position, 1);
        assert_eq!(records[1].position, 1);
        assert_eq!(records[0].old, 0..1);
        assert_eq!(records[1].new, 0..1);
    }

    #[test]
    fn threshold_boundary_falls_on_split_side() {
        // Exactly 0.8 does not exceed the gate.
        let records = lines(&["abcde"], &["abcdx"]);
        assert_eq!(
            kinds(&records),
            vec![ChangeKind::Deletion, ChangeKind::Addition]
        );
    }

    #[test]
    fn gate_uses_injected_score() {
        let old = ["x"];
        let new = ["y"];
        let ops = align(&old, &new);
        let just_below = classify(&old, &new, &ops, GATE, |_, _| 0.79999);
        let just_above = classify(&old, &new, &ops, GATE, |_, _| 0.80001);
        assert_eq!(
            kinds(&just_below),
            vec![ChangeKind::Deletion, ChangeKind::Addition]
        );
        assert_eq!(kinds(&just_above), vec![ChangeKind::Modification]);
    }

    #[test]
    fn unequal_replace_is_one_modification() {
        let old = ["same", "one", "same-end"];
        let new = ["same", "two", "three", "same-end"];
        let records = lines(&old, &new);
        assert_eq!(
            kinds(&records),
            vec![
                ChangeKind::Unchanged,
                ChangeKind::Modification,
                ChangeKind::Unchanged
            ]
        );
        assert_eq!(records[1].old, 1..2);
        assert_eq!(records[1].new, 1..3);
        assert_eq!(records[1].position, 2);
        // One old unit plus two new units.
        assert_eq!(records[2].position, 5);
    }

    #[test]
    fn inserts_and_deletes_per_unit() {
        let records = lines(&["a"], &["a", "b", "c"]);
        assert_eq!(
            kinds(&records),
            vec![
                ChangeKind::Unchanged,
                ChangeKind::Addition,
                ChangeKind::Addition
            ]
        );

        let records = lines(&["a", "b"], &[]);
        assert_eq!(kinds(&records), vec![ChangeKind::Deletion; 2]);
        assert_eq!(records[1].position, 2);
    }

    #[test]
    fn spans_skip_equal_and_never_gate() {
        let old: Vec<char> = "abcXdef".chars().collect();
        let new: Vec<char> = "abcYdefZ".chars().collect();
        let ops = align(&old, &new);
        let records = classify(&old, &new, &ops, Granularity::PerSpan, |_, _| 0.0);
        assert_eq!(
            kinds(&records),
            vec![ChangeKind::Modification, ChangeKind::Addition]
        );
        assert_eq!(records[0].old, 3..4);
        assert_eq!(records[0].position, 3);
        assert_eq!(records[1].new, 7..8);
    }

    #[test]
    fn no_ops_no_records() {
        let empty: [&str; 0] = [];
        assert!(lines(&empty, &empty).is_empty());
    }

    #[test]
    fn kind_names() {
        assert_eq!(ChangeKind::Modification.to_string(), "modification");
        assert_eq!(
            serde_json::to_string(&ChangeKind::Addition).unwrap(),
            "\"addition\""
        );
    }
}
