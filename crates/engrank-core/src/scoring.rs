//! Per-kind scoring weights and their on-disk configuration.

use std::path::Path;

use serde::{Deserialize, Serialize, Serializer};

use crate::{ConfigError, EngagementKind};

/// Weight applied to each engagement kind when computing a person's score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    #[serde(serialize_with = "serialize_number")]
    pub reaction: f64,
    #[serde(serialize_with = "serialize_number")]
    pub comment: f64,
    #[serde(serialize_with = "serialize_number")]
    pub repost: f64,
}

/// Serializes a weight or score as a JSON integer when it has no fractional
/// part (`2`, not `2.0`), and as a float otherwise.
///
/// # Errors
///
/// Propagates the serializer's error.
#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
pub fn serialize_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    // Integers above 2^53 are no longer exact in f64.
    const EXACT: f64 = 9_007_199_254_740_992.0;
    if value.is_finite() && value.trunc() == *value && value.abs() <= EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            reaction: 1.0,
            comment: 1.0,
            repost: 1.0,
        }
    }
}

impl ScoringWeights {
    #[must_use]
    pub fn weight(&self, kind: EngagementKind) -> f64 {
        match kind {
            EngagementKind::Reaction => self.reaction,
            EngagementKind::Comment => self.comment,
            EngagementKind::Repost => self.repost,
        }
    }
}

/// Shape of the scoring configuration file: `{ "scoring": { ... } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub scoring: ScoringWeights,
}

/// Load and validate the scoring configuration from a JSON file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or holds a
/// negative or non-finite weight.
pub fn load_scoring_config(path: &Path) -> Result<ScoringConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ScoringFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: ScoringConfig =
        serde_json::from_str(&content).map_err(ConfigError::ScoringFileParse)?;

    validate_weights(&config.scoring)?;

    Ok(config)
}

/// Load the scoring weights, falling back to `1/1/1` on any failure.
///
/// The failure is logged at `warn`; callers always get usable weights.
#[must_use]
pub fn load_scoring_weights_or_default(path: &Path) -> ScoringWeights {
    match load_scoring_config(path) {
        Ok(config) => config.scoring,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to load scoring config, using default weights"
            );
            ScoringWeights::default()
        }
    }
}

fn validate_weights(weights: &ScoringWeights) -> Result<(), ConfigError> {
    for kind in EngagementKind::ALL {
        let w = weights.weight(kind);
        if !w.is_finite() || w < 0.0 {
            return Err(ConfigError::Validation(format!(
                "{kind} weight must be a finite, non-negative number (got {w})"
            )));
        }
    }
    Ok(())
}
