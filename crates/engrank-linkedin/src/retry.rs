//! Transport-level retry for single provider requests.
//!
//! A page request is retried here; once [`retry_with_backoff`] gives up, the
//! stream stops and the error reaches the collector, which never retries.

use std::future::Future;
use std::time::Duration;

use crate::error::LinkedinError;

/// Upper bound for any single back-off sleep.
const MAX_DELAY: Duration = Duration::from_secs(30);

/// Network failures, HTTP 429 and HTTP 5xx are transient. Everything else is
/// returned to the caller on the first occurrence.
pub(crate) fn is_retriable(err: &LinkedinError) -> bool {
    match err {
        LinkedinError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        LinkedinError::RateLimited { .. } => true,
        LinkedinError::Status { status, .. } => *status >= 500,
        LinkedinError::Deserialize { .. }
        | LinkedinError::InvalidProfileUrl(_)
        | LinkedinError::NoPostUrl { .. }
        | LinkedinError::PaginationLimit { .. }
        | LinkedinError::InvalidBaseUrl { .. }
        | LinkedinError::MissingApiKey => false,
    }
}

/// Sleep before retry number `retry` (1-based).
///
/// Exponential from `base_ms` (`base_ms * 2^(retry-1)`), scaled by `jitter`
/// (expected in `0.75..=1.25`). A provider `Retry-After` hint raises the
/// delay to at least that many seconds. The result never exceeds 30 s.
fn backoff_delay(retry: u32, base_ms: u64, jitter: f64, err: &LinkedinError) -> Duration {
    let exponential = base_ms.saturating_mul(1u64 << retry.saturating_sub(1).min(16));
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered = Duration::from_millis((exponential as f64 * jitter) as u64);

    let floor = match err {
        LinkedinError::RateLimited {
            retry_after_secs, ..
        } if base_ms > 0 => Duration::from_secs(*retry_after_secs),
        _ => Duration::ZERO,
    };
    jittered.max(floor).min(MAX_DELAY)
}

/// Runs `operation`, retrying transient failures up to `max_retries` times.
///
/// A `backoff_base_ms` of zero retries immediately, which is what tests use.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, LinkedinError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LinkedinError>>,
{
    let mut retry = 0u32;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if retry >= max_retries || !is_retriable(&err) => return Err(err),
            Err(err) => err,
        };

        retry += 1;
        let jitter = 0.75 + rand::random::<f64>() * 0.5;
        let delay = backoff_delay(retry, backoff_base_ms, jitter, &err);
        tracing::warn!(
            retry,
            max_retries,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "transient provider error, backing off"
        );
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
