use serde::{Deserialize, Serialize};

use crate::error::{CompareError, CompareResult};

/// Text inserted between the texts of two merged spans, standing in for the
/// equal run that was elided.
pub const MERGE_SEPARATOR: &str = "...";

/// Tuning knobs for a comparison.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Maximum distance, in characters on each side, between two character
    /// spans for them to be merged into one block.
    pub max_gap: usize,
    /// A replaced line pair becomes a modification only when its similarity
    /// is strictly greater than this value.
    pub modification_similarity_threshold: f64,
    /// Threshold for the coarse "are these texts related" check.
    pub similarity_threshold_for_generic_text_match: f64,
    /// Upper bound on the number of units (lines or chars) per input.
    /// `None` disables the check.
    pub max_units: Option<usize>,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            max_gap: 50,
            modification_similarity_threshold: 0.8,
            similarity_threshold_for_generic_text_match: 0.6,
            max_units: None,
        }
    }
}

impl DiffConfig {
    /// Set the merge distance.
    pub fn with_max_gap(mut self, max_gap: usize) -> Self {
        self.max_gap = max_gap;
        self
    }

    /// Set the modification threshold.
    pub fn with_modification_threshold(mut self, threshold: f64) -> Self {
        self.modification_similarity_threshold = threshold;
        self
    }

    /// Set the unit limit applied to each input.
    pub fn with_max_units(mut self, limit: usize) -> Self {
        self.max_units = Some(limit);
        self
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> CompareResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| CompareError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every knob is within its meaningful range.
    pub fn validate(&self) -> CompareResult<()> {
        check_ratio(
            "modification_similarity_threshold",
            self.modification_similarity_threshold,
        )?;
        check_ratio(
            "similarity_threshold_for_generic_text_match",
            self.similarity_threshold_for_generic_text_match,
        )?;
        if self.max_units == Some(0) {
            return Err(CompareError::InvalidConfig(
                "max_units must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

fn check_ratio(name: &str, value: f64) -> CompareResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CompareError::InvalidConfig(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}
