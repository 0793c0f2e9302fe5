//! Retry with exponential back-off and jitter for closest-courts requests.
//!
//! A backend that answers with an explicit `error` payload is not retried:
//! the same filters would produce the same failure.

use std::future::Future;
use std::time::Duration;

use crate::error::CourtsError;

const MAX_DELAY_MS: u64 = 10_000;

/// Returns `true` for timeouts, connection failures, HTTP 429 and 5xx
/// without an `error` body. Everything else is returned immediately.
pub(crate) fn is_retriable(err: &CourtsError) -> bool {
    match err {
        CourtsError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        CourtsError::UnexpectedStatus { status, .. } => *status == 429 || *status >= 500,
        CourtsError::Deserialize { .. }
        | CourtsError::InvalidResponse { .. }
        | CourtsError::InvalidBaseUrl { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, CourtsError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CourtsError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "courts API transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn invalid_response_is_not_retriable() {
        assert!(!is_retriable(&CourtsError::InvalidResponse {
            message: Some("Missing coordinates".to_owned())
        }));
    }

    #[test]
    fn server_error_status_is_retriable() {
        assert!(is_retriable(&CourtsError::UnexpectedStatus {
            status: 502,
            url: "u".to_owned()
        }));
        assert!(!is_retriable(&CourtsError::UnexpectedStatus {
            status: 404,
            url: "u".to_owned()
        }));
    }

    #[tokio::test]
    async fn does_not_retry_invalid_response() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(CourtsError::InvalidResponse { message: None })
            }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_connect_errors() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(1, 0, || {
            let c = Arc::clone(&c);
            async move {
                let attempt = c.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt == 1 {
                    let err = reqwest::Client::new()
                        .get("http://0.0.0.0:1")
                        .send()
                        .await
                        .unwrap_err();
                    Err::<u32, _>(CourtsError::Http(err))
                } else {
                    Ok(3)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
