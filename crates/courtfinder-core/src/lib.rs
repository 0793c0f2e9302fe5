pub mod app_config;
pub mod config;
pub mod courts;
pub mod links;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use courts::{
    clamp_desired_count, Coordinates, CourtRecord, CourtType, LocationGroup, SearchFilters,
    SearchViewState, DEFAULT_CENTER, MAX_DESIRED_COUNT,
};
pub use links::{google_maps_url, waze_url, NavigationLinks};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid coordinates ({latitude}, {longitude}): {reason}")]
    InvalidCoordinates {
        latitude: f64,
        longitude: f64,
        reason: &'static str,
    },

    #[error("unknown court type: {0}")]
    UnknownCourtType(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
