//! Character-level similarity scoring.
//!
//! The ratio is `2 * M / T`, where `M` is the number of characters covered by
//! matching blocks from [`align`](crate::align::align) and `T` is the combined
//! length of both strings. Both the modification gate and the relatedness
//! check go through [`ratio`].

use serde::{Deserialize, Serialize};

use crate::align::{align, matched_units};

/// A similarity ratio together with its verdict against a threshold.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarityScore {
    pub ratio: f64,
    pub similar: bool,
}

impl SimilarityScore {
    pub fn new(ratio: f64, threshold: f64) -> Self {
        Self {
            ratio,
            similar: above(ratio, threshold),
        }
    }
}

/// Similarity of two strings in `[0.0, 1.0]`.
///
/// Two empty strings are identical (`1.0`); an empty string against a
/// non-empty one scores `0.0`.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = matched_units(&align(&a, &b));
    (2 * matched) as f64 / total as f64
}

/// Returns `true` when `ratio(a, b)` is strictly greater than `threshold`.
pub fn exceeds(a: &str, b: &str, threshold: f64) -> bool {
    above(ratio(a, b), threshold)
}

/// Every threshold comparison in the engine is strict.
pub fn above(ratio: f64, threshold: f64) -> bool {
    ratio > threshold
}
