use courtfinder_courts::CourtsError;
use courtfinder_geocode::GeocodeError;
use thiserror::Error;

use crate::location::LocationError;

/// Failure taxonomy seen by the orchestrator. Every variant is turned into a
/// dismissible warning; none escapes a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("address not found: \"{query}\"")]
    NotFound { query: String },

    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable")]
    PositionUnavailable,

    #[error("geolocation unsupported")]
    Unsupported,

    /// Transport failure, timeout, or non-success status from any remote service.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Backend payload was not an array of groups.
    #[error("invalid response: {}", message.as_deref().unwrap_or("unknown issue"))]
    InvalidResponse { message: Option<String> },
}

impl From<GeocodeError> for SearchError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::NotFound { query } => SearchError::NotFound { query },
            other => SearchError::ServiceUnavailable(other.to_string()),
        }
    }
}

impl From<CourtsError> for SearchError {
    fn from(err: CourtsError) -> Self {
        match err {
            CourtsError::InvalidResponse { message } => SearchError::InvalidResponse { message },
            CourtsError::Deserialize { .. } => SearchError::InvalidResponse { message: None },
            other => SearchError::ServiceUnavailable(other.to_string()),
        }
    }
}

impl From<LocationError> for SearchError {
    fn from(err: LocationError) -> Self {
        match err {
            LocationError::Unsupported => SearchError::Unsupported,
            LocationError::PermissionDenied => SearchError::PermissionDenied,
            LocationError::PositionUnavailable(_) => SearchError::PositionUnavailable,
        }
    }
}
