//! Client for the closest-courts backend.

pub mod client;
pub mod error;
pub mod normalize;
pub(crate) mod retry;
pub mod types;

pub use client::CourtsClient;
pub use error::CourtsError;
pub use normalize::into_location_groups;
pub use types::{ClosestRequest, RawCourt, RawEntry, RawGroup};
