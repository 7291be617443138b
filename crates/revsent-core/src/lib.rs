//! Shared domain types and configuration for revsent.

pub mod app_config;
pub mod config;
pub mod profile;
pub mod review;

use thiserror::Error;

pub use app_config::{AppConfig, EmptyPagePolicy, FetchBackend};
pub use config::{load_app_config, load_app_config_from_env};
pub use profile::{load_site_profile, SiteProfile};
pub use review::{ProductMetrics, Review, ReviewBatch, SentimentLabel};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read site profile {path}: {source}")]
    ProfileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse site profile: {0}")]
    ProfileParse(#[from] serde_yaml::Error),

    #[error("site profile validation failed: {0}")]
    Validation(String),
}
