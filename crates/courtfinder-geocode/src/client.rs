//! HTTP client for a Nominatim-compatible geocoding provider.
//!
//! Forward geocoding resolves free text to the first candidate's coordinates.
//! Reverse geocoding resolves a point to a display address and soft-fails to
//! an empty string when the provider has nothing for that point.

use std::time::Duration;

use courtfinder_core::{AppConfig, Coordinates};
use reqwest::{Client, Url};

use crate::error::GeocodeError;
use crate::retry::retry_with_backoff;
use crate::types::{ReverseResult, SearchCandidate};

/// Client for the provider's `search` and `reverse` endpoints.
///
/// Use [`GeocodingClient::new`] with the provider base URL (a mock server in
/// tests), then optionally enable retries with [`GeocodingClient::with_retry`].
pub struct GeocodingClient {
    client: Client,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl GeocodingClient {
    /// Creates a client with the given request timeout and `User-Agent` and
    /// no retries. Nominatim's usage policy requires an identifying agent.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(user_agent)
            .build()?;

        // Keep exactly one trailing slash so `join("search")` appends to the
        // base path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeocodeError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Builds a client from the application config, retries included.
    ///
    /// # Errors
    ///
    /// Same as [`GeocodingClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, GeocodeError> {
        Ok(Self::new(
            &config.geocoder_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?
        .with_retry(config.max_retries, config.retry_backoff_base_ms))
    }

    /// Enables retry on transient failures.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Resolves free-text `address` to the first candidate's coordinates.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::NotFound`] when `address` is blank or the provider
    ///   returns zero candidates.
    /// - [`GeocodeError::InvalidCoordinates`] when the first candidate's
    ///   coordinates are missing or out of range.
    /// - [`GeocodeError::Http`] / [`GeocodeError::UnexpectedStatus`] on
    ///   transport failure or non-2xx status, after retries.
    /// - [`GeocodeError::Deserialize`] when the body is not a candidate list.
    pub async fn forward_geocode(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        let query = address.trim();
        if query.is_empty() {
            return Err(GeocodeError::NotFound {
                query: address.to_owned(),
            });
        }

        let url = self.endpoint_url(
            "search",
            &[("format", "json"), ("limit", "1"), ("q", query)],
        )?;
        let body = self.request_json(&url).await?;

        let candidates: Vec<SearchCandidate> =
            serde_json::from_value(body).map_err(|e| GeocodeError::Deserialize {
                context: format!("search(q={query})"),
                source: e,
            })?;

        let Some(first) = candidates.first() else {
            tracing::debug!(query, "geocoder returned no candidates");
            return Err(GeocodeError::NotFound {
                query: query.to_owned(),
            });
        };

        let (lat, lon) = first
            .lat_lon()
            .ok_or_else(|| GeocodeError::InvalidCoordinates {
                query: query.to_owned(),
                reason: "missing or non-numeric lat/lon".to_owned(),
            })?;
        let point = Coordinates::new(lat, lon).map_err(|e| GeocodeError::InvalidCoordinates {
            query: query.to_owned(),
            reason: e.to_string(),
        })?;

        tracing::debug!(query, %point, "forward geocode resolved");
        Ok(point)
    }

    /// Resolves `point` to a human-readable address.
    ///
    /// Returns an empty string when the provider has no address for the point.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Http`] / [`GeocodeError::UnexpectedStatus`] on
    ///   transport failure or non-2xx status, after retries.
    /// - [`GeocodeError::Deserialize`] when the body is not a JSON object.
    pub async fn reverse_geocode(&self, point: Coordinates) -> Result<String, GeocodeError> {
        let lat = point.latitude().to_string();
        let lon = point.longitude().to_string();
        let url = self.endpoint_url(
            "reverse",
            &[("format", "json"), ("lat", &lat), ("lon", &lon)],
        )?;
        let body = self.request_json(&url).await?;

        let result: ReverseResult =
            serde_json::from_value(body).map_err(|e| GeocodeError::Deserialize {
                context: format!("reverse(lat={lat}, lon={lon})"),
                source: e,
            })?;

        if let Some(reason) = &result.error {
            tracing::debug!(%point, reason = %reason, "reverse geocode has no address");
        }
        Ok(result
            .display_name
            .map(|name| name.trim().to_owned())
            .unwrap_or_default())
    }

    /// Builds `{base}/{path}?{params}` with percent-encoded query values.
    fn endpoint_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, GeocodeError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| GeocodeError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET with retry, asserts a 2xx status, and parses the body as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, GeocodeError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let response = self.client.get(url.clone()).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(GeocodeError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: url.to_string(),
                source: e,
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> GeocodingClient {
        GeocodingClient::new(base_url, 5, "courtfinder-test/0.1")
            .expect("client construction should not fail")
    }

    #[test]
    fn endpoint_url_appends_path_and_params() {
        let client = test_client("https://nominatim.openstreetmap.org");
        let url = client
            .endpoint_url("search", &[("format", "json"), ("q", "Dizengoff 100")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://nominatim.openstreetmap.org/search?format=json&q=Dizengoff+100"
        );
    }

    #[test]
    fn endpoint_url_keeps_base_path() {
        let client = test_client("http://localhost:8080/nominatim/");
        let url = client.endpoint_url("reverse", &[("lat", "1")]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/nominatim/reverse?lat=1");
    }

    #[test]
    fn endpoint_url_encodes_non_ascii() {
        let client = test_client("https://nominatim.openstreetmap.org");
        let url = client
            .endpoint_url("search", &[("q", "נהלל 2 תל אביב")])
            .unwrap();
        assert!(
            url.as_str().contains("%D7%A0"),
            "query should be percent-encoded: {url}"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = GeocodingClient::new("not a url", 5, "ua");
        assert!(matches!(result, Err(GeocodeError::InvalidBaseUrl { .. })));
    }

    #[tokio::test]
    async fn blank_address_is_not_found_without_request() {
        // Port 9 is discard; a request would fail with Http, not NotFound.
        let client = test_client("http://127.0.0.1:9");
        let err = client.forward_geocode("   ").await.unwrap_err();
        assert!(err.is_not_found(), "got: {err}");
    }
}
