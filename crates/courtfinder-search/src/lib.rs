//! Court search orchestration: locate or geocode, query, enrich, and publish
//! a consistent view state for the presentation layer.

pub mod error;
pub mod location;
pub mod orchestrator;
pub mod services;
pub mod warnings;

pub use error::SearchError;
pub use location::{LocationError, LocationProvider, StaticLocationProvider};
pub use orchestrator::{OrchestratorConfig, SearchOrchestrator, SearchRequest};
pub use services::{CourtSearch, Geocoder};
