use serde::{Deserialize, Serialize};

use crate::classify::ChangeKind;

/// Aggregate counts of change records by kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub additions: usize,
    pub deletions: usize,
    pub modifications: usize,
    /// Only reported by line comparisons; character comparisons never emit
    /// unchanged records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unchanged: Option<usize>,
}

impl DiffStats {
    /// Count the given kinds. `unchanged` is always populated.
    pub fn from_kinds(kinds: impl IntoIterator<Item = ChangeKind>) -> Self {
        let mut stats = Self::default();
        let mut unchanged = 0;
        for kind in kinds {
            match kind {
                ChangeKind::Addition => stats.additions += 1,
                ChangeKind::Deletion => stats.deletions += 1,
                ChangeKind::Modification => stats.modifications += 1,
                ChangeKind::Unchanged => unchanged += 1,
            }
        }
        Self {
            unchanged: Some(unchanged),
            ..stats
        }
    }

    /// Drop the unchanged count (character comparisons).
    pub fn without_unchanged(self) -> Self {
        Self {
            unchanged: None,
            ..self
        }
    }

    /// Number of additions, deletions and modifications.
    pub fn total_changes(&self) -> usize {
        self.additions + self.deletions + self.modifications
    }

    /// Returns `true` if nothing was added, deleted or modified.
    pub fn is_identical(&self) -> bool {
        self.total_changes() == 0
    }
}
