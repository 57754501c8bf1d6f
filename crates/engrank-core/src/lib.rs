mod app_config;
mod config;
mod identity;
mod scoring;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use identity::{EngagementKind, PersonIdentity};
pub use scoring::{
    load_scoring_config, load_scoring_weights_or_default, serialize_number, ScoringConfig,
    ScoringWeights,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read scoring config {path}: {source}")]
    ScoringFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scoring config: {0}")]
    ScoringFileParse(#[source] serde_json::Error),

    #[error("scoring config validation failed: {0}")]
    Validation(String),
}
