use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::RoadnetError;

/// Largest accepted snapping precision. Beyond this, scaling a typical
/// projected coordinate by `10^precision` no longer fits exactly in an f64.
pub const MAX_PRECISION: u32 = 12;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadnetConfig {
    #[serde(default)]
    pub snap: SnapConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

impl RoadnetConfig {
    /// Reject values the pipeline cannot honor.
    ///
    /// # Errors
    ///
    /// Returns [`RoadnetError::Config`] when the snapping precision exceeds
    /// [`MAX_PRECISION`].
    pub fn validate(&self) -> Result<(), RoadnetError> {
        if self.snap.precision > MAX_PRECISION {
            return Err(RoadnetError::Config(format!(
                "snap.precision must be at most {MAX_PRECISION}, got {}",
                self.snap.precision
            )));
        }
        Ok(())
    }
}

/// Endpoint snapping settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapConfig {
    /// Decimal places kept when rounding endpoint coordinates into keys.
    #[serde(default = "default_precision")]
    pub precision: u32,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub unreachable: UnreachablePolicy,
    /// Run the per-source BFS passes on the rayon pool.
    #[serde(default)]
    pub parallel: bool,
}

/// How node pairs with no connecting path enter the score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnreachablePolicy {
    /// Unreachable pairs add nothing to column or row sums, so every
    /// connected component is scored independently.
    #[default]
    Exclude,
    /// Unreachable pairs count as `N` hops, one more than the longest
    /// possible shortest path in an `N`-node graph.
    Penalty,
}

const fn default_precision() -> u32 {
    6
}

/// Load a [`RoadnetConfig`] from a TOML file.
///
/// A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, parsed, or fails
/// [`RoadnetConfig::validate`].
pub fn load_config(path: &Path) -> Result<RoadnetConfig> {
    if !path.exists() {
        return Ok(RoadnetConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = toml::from_str::<RoadnetConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    config.validate()?;
    Ok(config)
}
