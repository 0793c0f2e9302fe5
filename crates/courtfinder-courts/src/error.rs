use thiserror::Error;

/// Errors returned by the closest-courts client.
#[derive(Debug, Error)]
pub enum CourtsError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx status whose body did not carry an `error` message.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The body was not JSON, or an array whose items do not match the court shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The backend answered with something other than an array of groups.
    /// `message` is the embedded `error` field when present.
    #[error("invalid closest-courts response: {}", message.as_deref().unwrap_or("unknown issue"))]
    InvalidResponse { message: Option<String> },

    #[error("invalid courts API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
