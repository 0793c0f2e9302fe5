//! Device location acquisition.

use async_trait::async_trait;
use courtfinder_core::Coordinates;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The environment exposes no location capability at all.
    #[error("geolocation is not supported in this environment")]
    Unsupported,

    #[error("the user denied the location permission")]
    PermissionDenied,

    #[error("position unavailable: {0}")]
    PositionUnavailable(String),
}

/// Single-shot position lookup. No tracking; a caller abandons an in-flight
/// request simply by dropping the future.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns the [`LocationError`] kind matching why no fix was produced.
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Provider backed by a position known up front, e.g. from command-line
/// flags. Without one it behaves like an environment with no location API.
#[derive(Debug, Clone, Default)]
pub struct StaticLocationProvider {
    position: Option<Coordinates>,
}

impl StaticLocationProvider {
    #[must_use]
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }

    #[must_use]
    pub fn unsupported() -> Self {
        Self { position: None }
    }
}

#[async_trait]
impl LocationProvider for StaticLocationProvider {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        self.position.ok_or(LocationError::Unsupported)
    }
}
