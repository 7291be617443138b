//! Bounded retry with exponential back-off and jitter for page fetches.
//!
//! Transient failures (network errors, timeouts, 429, 5xx, browser
//! navigation errors) are retried; everything else aborts the batch on the
//! first occurrence. A 429 waits at least its `Retry-After`.
//! `max_retries = 0` disables retrying entirely.

use std::time::Duration;

use crate::error::ScraperError;
use crate::session::PageSession;

const MAX_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts allowed after the first failure.
    pub max_retries: u32,
    /// Base delay: the n-th retry waits `backoff_base_ms * 2^(n-1)` ± 25 %.
    pub backoff_base_ms: u64,
}

impl RetryPolicy {
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff_base_ms: 0,
        }
    }

    /// Jittered delay before retry number `attempt` (1-based), capped at 60 s.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let computed = self
            .backoff_base_ms
            .saturating_mul(1u64 << attempt.saturating_sub(1).min(10));
        let capped = computed.min(MAX_DELAY_MS);
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
        Duration::from_millis(delay_ms)
    }
}

/// Delay before retry `attempt` after `err`. A rate-limit response waits at
/// least its `Retry-After`, still bounded by the 60 s cap.
pub(crate) fn backoff_for(policy: &RetryPolicy, attempt: u32, err: &ScraperError) -> Duration {
    let delay = policy.delay_for(attempt);
    match err {
        ScraperError::RateLimited {
            retry_after_secs, ..
        } => {
            let retry_after = Duration::from_secs(*retry_after_secs)
                .min(Duration::from_millis(MAX_DELAY_MS));
            delay.max(retry_after)
        }
        _ => delay,
    }
}

/// Returns `true` for errors worth another attempt after a back-off delay.
pub(crate) fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        ScraperError::UnexpectedStatus { status, .. } => *status >= 500,
        ScraperError::Browser(_) | ScraperError::Timeout { .. } | ScraperError::RateLimited { .. } => {
            true
        }
        ScraperError::NotFound { .. }
        | ScraperError::InvalidUrl { .. }
        | ScraperError::Selector { .. }
        | ScraperError::Output { .. } => false,
    }
}

/// Fetches `url` through `session`, retrying transient failures per `policy`.
///
/// # Errors
///
/// Returns the first non-retriable error, or the last error once retries
/// are exhausted.
pub(crate) async fn fetch_with_retry(
    session: &mut dyn PageSession,
    url: &str,
    policy: &RetryPolicy,
) -> Result<String, ScraperError> {
    let mut attempt = 0u32;
    loop {
        match session.fetch(url).await {
            Ok(html) => return Ok(html),
            Err(err) => {
                if !is_retriable(&err) || attempt >= policy.max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay = backoff_for(policy, attempt, &err);
                tracing::warn!(
                    url,
                    attempt,
                    max_retries = policy.max_retries,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "transient fetch error; retrying after back-off"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
