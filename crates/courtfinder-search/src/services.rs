//! Seams between the orchestrator and the remote services it composes.
//!
//! The HTTP clients implement these traits directly; tests substitute
//! in-process stubs.

use async_trait::async_trait;
use courtfinder_core::{Coordinates, LocationGroup, SearchFilters};
use courtfinder_courts::CourtsClient;
use courtfinder_geocode::GeocodingClient;

use crate::error::SearchError;

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// # Errors
    ///
    /// [`SearchError::NotFound`] for blank or unresolvable text,
    /// [`SearchError::ServiceUnavailable`] for transport failures.
    async fn forward_geocode(&self, address: &str) -> Result<Coordinates, SearchError>;

    /// Empty string when the provider has no address for the point.
    ///
    /// # Errors
    ///
    /// [`SearchError::ServiceUnavailable`] for transport failures.
    async fn reverse_geocode(&self, point: Coordinates) -> Result<String, SearchError>;
}

#[async_trait]
pub trait CourtSearch: Send + Sync {
    /// Groups in backend order; empty means no matches.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidResponse`] for a non-array payload,
    /// [`SearchError::ServiceUnavailable`] for transport failures.
    async fn find_closest(
        &self,
        origin: Coordinates,
        filters: &SearchFilters,
    ) -> Result<Vec<LocationGroup>, SearchError>;
}

#[async_trait]
impl Geocoder for GeocodingClient {
    async fn forward_geocode(&self, address: &str) -> Result<Coordinates, SearchError> {
        Ok(GeocodingClient::forward_geocode(self, address).await?)
    }

    async fn reverse_geocode(&self, point: Coordinates) -> Result<String, SearchError> {
        Ok(GeocodingClient::reverse_geocode(self, point).await?)
    }
}

#[async_trait]
impl CourtSearch for CourtsClient {
    async fn find_closest(
        &self,
        origin: Coordinates,
        filters: &SearchFilters,
    ) -> Result<Vec<LocationGroup>, SearchError> {
        Ok(CourtsClient::find_closest(self, origin, filters).await?)
    }
}
