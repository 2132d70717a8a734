//! Line normalization applied before line-mode alignment.

/// Trim every line and drop the ones that are empty or whitespace-only.
///
/// The returned slices borrow from the input, in their original order.
pub fn normalize_lines<S: AsRef<str>>(lines: &[S]) -> Vec<&str> {
    lines
        .iter()
        .map(|line| line.as_ref().trim())
        .filter(|line| !line.is_empty())
        .collect()
}
