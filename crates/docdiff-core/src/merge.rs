//! Span merging for character comparisons.
//!
//! Adjacent difference spans are coalesced into one modification block when
//! the equal text between them is short on both sides and small relative to
//! the spans themselves.

use crate::classify::ChangeKind;
use crate::config::MERGE_SEPARATOR;
use crate::report::DiffRange;

/// Coalesce nearby spans. Input must be ordered by position on both sides.
pub fn merge_ranges(ranges: Vec<DiffRange>, max_gap: usize) -> Vec<DiffRange> {
    let mut merged = Vec::with_capacity(ranges.len());
    let mut iter = ranges.into_iter();

    let Some(mut current) = iter.next() else {
        return merged;
    };

    for next in iter {
        if should_merge(&current, &next, max_gap) {
            absorb(&mut current, next);
        } else {
            merged.push(std::mem::replace(&mut current, next));
        }
    }
    merged.push(current);

    merged
}

/// Both gaps must fit within `max_gap`, and the smaller gap must be under half
/// the longer text of the current group.
fn should_merge(current: &DiffRange, next: &DiffRange, max_gap: usize) -> bool {
    let gap1 = next.file1.start.saturating_sub(current.file1.end);
    let gap2 = next.file2.start.saturating_sub(current.file2.end);
    if gap1 > max_gap || gap2 > max_gap {
        return false;
    }

    let longest = current.file1.text_len().max(current.file2.text_len());
    (gap1.min(gap2) as f64) < longest as f64 / 2.0
}

fn absorb(current: &mut DiffRange, next: DiffRange) {
    current.file1.end = next.file1.end;
    current.file2.end = next.file2.end;
    current.file1.text = join(&current.file1.text, &next.file1.text);
    current.file2.text = join(&current.file2.text, &next.file2.text);
    current.kind = ChangeKind::Modification;
}

fn join(left: &str, right: &str) -> String {
    let mut out = String::with_capacity(left.len() + MERGE_SEPARATOR.len() + right.len());
    out.push_str(left);
    out.push_str(MERGE_SEPARATOR);
    out.push_str(right);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::SpanSide;

    fn span(kind: ChangeKind, old: (usize, &str), new: (usize, &str)) -> DiffRange {
        let old_len = old.1.chars().count();
        let new_len = new.1.chars().count();
        DiffRange {
            kind,
            file1: SpanSide::new(old.0, old.0 + old_len, old.1),
            file2: SpanSide::new(new.0, new.0 + new_len, new.1),
        }
    }

    fn wide(start: usize) -> DiffRange {
        let text = "x".repeat(120);
        span(ChangeKind::Modification, (start, &text), (start, &text))
    }

    #[test]
    fn empty_input() {
        assert!(merge_ranges(Vec::new(), 50).is_empty());
    }

    #[test]
    fn single_span_unchanged() {
        let only = span(ChangeKind::Addition, (4, ""), (4, "new"));
        assert_eq!(merge_ranges(vec![only.clone()], 50), vec![only]);
    }

    #[test]
    fn gap_at_limit_merges() {
        // first spans 0..120, second starts 50 chars later on both sides
        let merged = merge_ranges(vec![wide(0), wide(170)], 50);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].file1.start, 0);
        assert_eq!(merged[0].file1.end, 290);
        assert_eq!(merged[0].file2.end, 290);
    }

    #[test]
    fn gap_over_limit_does_not_merge() {
        let merged = merge_ranges(vec![wide(0), wide(171)], 50);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn one_wide_gap_blocks_merge() {
        let text = "x".repeat(120);
        let first = span(ChangeKind::Modification, (0, &text), (0, &text));
        let second = span(ChangeKind::Modification, (130, "ab"), (200, "cd"));
        assert_eq!(merge_ranges(vec![first, second], 50).len(), 2);
    }

    #[test]
    fn density_test_keeps_small_far_edits_apart() {
        // Single-char edits 10 chars apart: 10 < 1 / 2 fails.
        let first = span(ChangeKind::Modification, (5, "a"), (5, "b"));
        let second = span(ChangeKind::Modification, (16, "c"), (16, "d"));
        assert_eq!(merge_ranges(vec![first, second], 50).len(), 2);
    }

    #[test]
    fn merged_block_is_modification_with_separator() {
        let first = span(ChangeKind::Deletion, (10, "the old words"), (10, ""));
        let second = span(ChangeKind::Addition, (25, ""), (12, "fresh"));
        let merged = merge_ranges(vec![first, second], 50);

        assert_eq!(merged.len(), 1);
        let block = &merged[0];
        assert_eq!(block.kind, ChangeKind::Modification);
        assert_eq!(block.file1, SpanSide::new(10, 25, "the old words..."));
        assert_eq!(block.file2, SpanSide::new(10, 17, "...fresh"));
    }

    #[test]
    fn chains_merge_transitively() {
        let text = "y".repeat(40);
        let merged = merge_ranges(
            vec![
                span(ChangeKind::Modification, (0, &text), (0, &text)),
                span(ChangeKind::Modification, (45, "a"), (45, "b")),
                span(ChangeKind::Modification, (50, "c"), (50, "d")),
            ],
            50,
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].file1.text, format!("{text}...a...c"));
    }

    #[test]
    fn non_merged_groups_keep_their_kind() {
        let first = span(ChangeKind::Deletion, (0, "a"), (0, ""));
        let second = span(ChangeKind::Addition, (500, ""), (499, "b"));
        let merged = merge_ranges(vec![first.clone(), second.clone()], 50);
        assert_eq!(merged, vec![first, second]);
    }
}
