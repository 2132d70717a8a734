//! Sequence alignment: minimal edit scripts between two unit sequences.
//!
//! Uses the `similar` crate's Myers implementation with no deadline, so the
//! result is always an exact shortest edit script (equivalently, a longest
//! common subsequence). No heuristic junk filtering is applied: documents with
//! many repeated short lines align exactly like any other input.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use similar::algorithms::{myers, Capture, Replace};
use similar::DiffTag;

use crate::error::{CompareError, CompareResult};

/// The kind of an alignment instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpTag {
    /// The spans are identical in both sequences.
    Equal,
    /// The new span was inserted; the old span is empty.
    Insert,
    /// The old span was deleted; the new span is empty.
    Delete,
    /// The old span was replaced by the new span.
    Replace,
}

impl From<DiffTag> for OpTag {
    fn from(tag: DiffTag) -> Self {
        match tag {
            DiffTag::Equal => Self::Equal,
            DiffTag::Insert => Self::Insert,
            DiffTag::Delete => Self::Delete,
            DiffTag::Replace => Self::Replace,
        }
    }
}

/// A single alignment instruction over two sequences.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opcode {
    pub tag: OpTag,
    /// Half-open span in the old sequence.
    pub old: Range<usize>,
    /// Half-open span in the new sequence.
    pub new: Range<usize>,
}

impl Opcode {
    pub fn new(tag: OpTag, old: Range<usize>, new: Range<usize>) -> Self {
        Self { tag, old, new }
    }

    /// Returns `true` for `Equal` opcodes.
    pub fn is_equal(&self) -> bool {
        self.tag == OpTag::Equal
    }
}

/// Align two sequences and return their opcodes in order.
///
/// - both empty: no opcodes
/// - `old` empty: a single `Insert`
/// - `new` empty: a single `Delete`
/// - identical: a single `Equal`
pub fn align<T: PartialEq>(old: &[T], new: &[T]) -> Vec<Opcode> {
    if old.is_empty() && new.is_empty() {
        return Vec::new();
    }

    // Raw Myers output through `Replace` only: the `Compact` pass used by
    // `capture_diff_*` can emit ops that no longer tile the inputs.
    let mut hook = Replace::new(Capture::new());
    if let Err(never) = myers::diff(&mut hook, old, 0..old.len(), new, 0..new.len()) {
        match never {}
    }
    let ops = hook.into_inner().into_ops();
    coalesce(ops.iter().map(|op| {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        Opcode::new(tag.into(), old_range, new_range)
    }))
}

/// Total number of units covered by `Equal` opcodes.
pub fn matched_units(ops: &[Opcode]) -> usize {
    ops.iter().filter(|op| op.is_equal()).map(|op| op.old.len()).sum()
}

/// Merge adjacent opcodes so that no two neighbours are both equal or both
/// non-equal. Adjacent changes collapse into one insert, delete or replace.
fn coalesce(ops: impl IntoIterator<Item = Opcode>) -> Vec<Opcode> {
    let mut out: Vec<Opcode> = Vec::new();

    for op in ops {
        if op.old.is_empty() && op.new.is_empty() {
            continue;
        }
        if let Some(last) = out.last_mut() {
            let both_equal = last.is_equal() && op.is_equal();
            let both_changed = !last.is_equal() && !op.is_equal();
            if both_equal || both_changed {
                last.old.end = op.old.end;
                last.new.end = op.new.end;
                if both_changed {
                    last.tag = change_tag(&last.old, &last.new);
                }
                continue;
            }
        }
        out.push(op);
    }

    out
}

fn change_tag(old: &Range<usize>, new: &Range<usize>) -> OpTag {
    match (old.is_empty(), new.is_empty()) {
        (true, _) => OpTag::Insert,
        (_, true) => OpTag::Delete,
        _ => OpTag::Replace,
    }
}

/// Verify that `ops` tile `[0, old_len)` and `[0, new_len)` exactly, in order,
/// with shapes matching their tags.
pub fn validate_opcodes(ops: &[Opcode], old_len: usize, new_len: usize) -> CompareResult<()> {
    let mut old_at = 0;
    let mut new_at = 0;

    for (i, op) in ops.iter().enumerate() {
        if op.old.start != old_at || op.new.start != new_at {
            return Err(CompareError::InternalAlignment(format!(
                "opcode {i} starts at ({}, {}), expected ({old_at}, {new_at})",
                op.old.start, op.new.start
            )));
        }
        if op.old.end < op.old.start || op.new.end < op.new.start {
            return Err(CompareError::InternalAlignment(format!(
                "opcode {i} has an inverted span"
            )));
        }
        let shape_ok = match op.tag {
            OpTag::Equal => op.old.len() == op.new.len() && !op.old.is_empty(),
            OpTag::Insert => op.old.is_empty() && !op.new.is_empty(),
            OpTag::Delete => !op.old.is_empty() && op.new.is_empty(),
            OpTag::Replace => !op.old.is_empty() && !op.new.is_empty(),
        };
        if !shape_ok {
            return Err(CompareError::InternalAlignment(format!(
                "opcode {i} ({:?}) has spans {:?} / {:?}",
                op.tag, op.old, op.new
            )));
        }
        old_at = op.old.end;
        new_at = op.new.end;
    }

    if old_at != old_len || new_at != new_len {
        return Err(CompareError::InternalAlignment(format!(
            "opcodes cover ({old_at}, {new_at}) of ({old_len}, {new_len})"
        )));
    }
    Ok(())
}
