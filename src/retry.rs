//! Retry logic with exponential backoff
//!
//! One reusable policy primitive serves both transient-failure paths: the
//! detail fetch (up to 5 attempts, delays doubling from 2 seconds) and the
//! download (a single retry after 5 seconds). Only rate-limit errors are
//! classified as retryable; everything else is terminal immediately.
//!
//! # Example
//!
//! ```no_run
//! use flickr_dl::retry::{IsRetryable, retry_with_backoff};
//! use flickr_dl::config::RetryConfig;
//!
//! # async fn example() -> Result<(), flickr_dl::Error> {
//! let policy = RetryConfig::for_detail_fetch();
//! let result = retry_with_backoff(&policy, || async {
//!     // Your operation here
//!     Ok::<_, flickr_dl::Error>(())
//! }).await?;
//! # Ok(())
//! # }
//! ```

use crate::config::RetryConfig;
use crate::error::Error;
use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// Trait for errors that can be classified as retryable or not
pub trait IsRetryable {
    /// Returns true if the error is transient and the operation should be retried
    fn is_retryable(&self) -> bool;
}

/// Rate-limit errors are the only transient class in this domain
///
/// A catalog or transfer failure that is not a 429 (or an API-level
/// rate-limit payload) will not succeed on a blind retry, so it is terminal.
impl IsRetryable for Error {
    fn is_retryable(&self) -> bool {
        self.is_rate_limited()
    }
}

/// Execute an async operation with exponential backoff retry logic
///
/// # Arguments
///
/// * `config` - Retry configuration (max attempts, delays, backoff multiplier, jitter)
/// * `operation` - Async closure returning `Result<T, E>` where `E` implements [`IsRetryable`]
///
/// # Returns
///
/// Returns the successful result, or the last error once the retry attempts
/// are exhausted or a non-retryable error occurs.
pub async fn retry_with_backoff<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: IsRetryable + std::fmt::Display,
{
    let mut attempt = 0;
    let mut delay = config.initial_delay;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    tracing::info!(attempts = attempt + 1, "Operation succeeded after retry");
                }
                return Ok(result);
            }
            Err(e) if e.is_retryable() && attempt < config.max_attempts => {
                attempt += 1;

                tracing::warn!(
                    error = %e,
                    attempt = attempt,
                    max_attempts = config.max_attempts,
                    delay_ms = delay.as_millis(),
                    "Rate limited, retrying"
                );

                let jittered_delay = if config.jitter {
                    add_jitter(delay)
                } else {
                    delay
                };

                tokio::time::sleep(jittered_delay).await;

                let next_delay =
                    Duration::from_secs_f64(delay.as_secs_f64() * config.backoff_multiplier);
                delay = next_delay.min(config.max_delay);
            }
            Err(e) => {
                if e.is_retryable() {
                    tracing::error!(
                        error = %e,
                        attempts = attempt + 1,
                        "Still rate limited after all retry attempts"
                    );
                } else {
                    tracing::debug!(error = %e, "Operation failed with non-retryable error");
                }
                return Err(e);
            }
        }
    }
}

/// Add random jitter to a delay to prevent thundering herd
///
/// Jitter is uniformly distributed between 0% and 100% of the delay, so the
/// actual delay is between `delay` and `2 * delay`.
fn add_jitter(delay: Duration) -> Duration {
    let mut rng = rand::thread_rng();
    let jitter_factor: f64 = rng.gen_range(0.0..=1.0);
    Duration::from_secs_f64(delay.as_secs_f64() * (1.0 + jitter_factor))
}
