use std::net::SocketAddr;
use std::path::Path;

use docdiff_core::DiffConfig;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ServerError, ServerResult};

/// Default per-input unit limit for served comparisons.
pub const DEFAULT_MAX_UNITS: usize = 50_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
    /// Engine settings applied to every comparison. Keys missing from a
    /// `[diff]` table keep the server defaults, including the unit limit.
    #[serde(deserialize_with = "diff_over_server_defaults")]
    pub diff: DiffConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            max_body_bytes: 16 * 1024 * 1024,
            diff: server_diff(),
        }
    }
}

fn server_diff() -> DiffConfig {
    DiffConfig::default().with_max_units(DEFAULT_MAX_UNITS)
}

/// A `[diff]` table as written; absent keys are `None`.
#[derive(Deserialize)]
struct DiffTable {
    max_gap: Option<usize>,
    modification_similarity_threshold: Option<f64>,
    similarity_threshold_for_generic_text_match: Option<f64>,
    max_units: Option<usize>,
}

fn diff_over_server_defaults<'de, D>(deserializer: D) -> Result<DiffConfig, D::Error>
where
    D: Deserializer<'de>,
{
    let table = DiffTable::deserialize(deserializer)?;
    let base = server_diff();
    Ok(DiffConfig {
        max_gap: table.max_gap.unwrap_or(base.max_gap),
        modification_similarity_threshold: table
            .modification_similarity_threshold
            .unwrap_or(base.modification_similarity_threshold),
        similarity_threshold_for_generic_text_match: table
            .similarity_threshold_for_generic_text_match
            .unwrap_or(base.similarity_threshold_for_generic_text_match),
        max_units: table.max_units.or(base.max_units),
    })
}

impl ServerConfig {
    pub fn from_toml_str(source: &str) -> ServerResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| ServerError::Config(e.to_string()))?;
        config
            .diff
            .validate()
            .map_err(|e| ServerError::Config(e.to_string()))?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}
