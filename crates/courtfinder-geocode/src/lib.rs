//! Forward and reverse geocoding against a Nominatim-compatible provider.

pub mod client;
pub mod error;
pub(crate) mod retry;
pub mod types;

pub use client::GeocodingClient;
pub use error::GeocodeError;
