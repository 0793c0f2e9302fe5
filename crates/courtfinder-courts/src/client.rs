//! HTTP client for the closest-courts backend.

use std::time::Duration;

use courtfinder_core::{AppConfig, Coordinates, LocationGroup, SearchFilters};
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::CourtsError;
use crate::normalize::into_location_groups;
use crate::retry::retry_with_backoff;
use crate::types::{ClosestRequest, RawEntry};

const CLOSEST_PATH: &str = "api/closest";

/// Client for `POST /api/closest`.
pub struct CourtsClient {
    client: Client,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl CourtsClient {
    /// Creates a client with the given timeout and `User-Agent` and no retries.
    ///
    /// # Errors
    ///
    /// Returns [`CourtsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CourtsError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CourtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| CourtsError::InvalidBaseUrl {
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
    /// Same as [`CourtsClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, CourtsError> {
        Ok(Self::new(
            &config.courts_api_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?
        .with_retry(config.max_retries, config.retry_backoff_base_ms))
    }

    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Queries the backend for courts closest to `origin` matching `filters`.
    ///
    /// Returns groups in the order the backend sent them. An empty vector
    /// means nothing matched and is not an error.
    ///
    /// # Errors
    ///
    /// - [`CourtsError::InvalidResponse`] when the body is not an array;
    ///   carries the backend's `error` message when there is one, whatever
    ///   the HTTP status.
    /// - [`CourtsError::UnexpectedStatus`] on a non-2xx status without an
    ///   `error` body, after retries.
    /// - [`CourtsError::Http`] on network failure or timeout, after retries.
    /// - [`CourtsError::Deserialize`] when the body is not JSON or an array
    ///   item does not match the court shape.
    pub async fn find_closest(
        &self,
        origin: Coordinates,
        filters: &SearchFilters,
    ) -> Result<Vec<LocationGroup>, CourtsError> {
        let url = self.closest_url()?;
        let request = ClosestRequest::new(origin, filters);
        let body = self.post_json(&url, &request).await?;

        if !body.is_array() {
            return Err(CourtsError::InvalidResponse { message: None });
        }

        let entries: Vec<RawEntry> = serde_json::from_value(body).map_err(|e| {
            CourtsError::Deserialize {
                context: format!("closest(lat={}, lon={})", request.lat, request.lon),
                source: e,
            }
        })?;

        let groups = into_location_groups(entries);
        tracing::debug!(
            %origin,
            court_type = %filters.court_type,
            groups = groups.len(),
            "closest courts received"
        );
        Ok(groups)
    }

    fn closest_url(&self) -> Result<Url, CourtsError> {
        self.base_url
            .join(CLOSEST_PATH)
            .map_err(|e| CourtsError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Posts `request` with retry and returns the parsed JSON body.
    ///
    /// A body carrying an `error` field wins over the status code so the
    /// backend's own message reaches the caller.
    async fn post_json(&self, url: &Url, request: &ClosestRequest) -> Result<Value, CourtsError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let response = self.client.post(url.clone()).json(request).send().await?;
            let status = response.status();
            let text = response.text().await?;

            let body: Value = match serde_json::from_str(&text) {
                Ok(body) => body,
                Err(_) if !status.is_success() => {
                    return Err(CourtsError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }
                Err(e) => {
                    return Err(CourtsError::Deserialize {
                        context: url.to_string(),
                        source: e,
                    });
                }
            };

            if let Some(error) = body.as_object().and_then(|obj| obj.get("error")) {
                let message = match error {
                    Value::Null => None,
                    Value::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                };
                tracing::warn!(
                    status = status.as_u16(),
                    message = message.as_deref().unwrap_or(""),
                    "courts API returned an error payload"
                );
                return Err(CourtsError::InvalidResponse { message });
            }

            if !status.is_success() {
                return Err(CourtsError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }
            Ok(body)
        })
        .await
    }
}
