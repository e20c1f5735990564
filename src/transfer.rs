//! Single-photo transfer with its 429-aware retry rule

use crate::config::RetryConfig;
use crate::error::{Error, Result};
use crate::retry::retry_with_backoff;
use futures::StreamExt;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Download one photo to `dest`, honoring the rate-limit retry policy
///
/// The body is fully written before the call returns. On HTTP 429 the
/// default policy ([`RetryConfig::for_download`]) waits 5 seconds and retries
/// exactly once; a second 429 is terminal. Any other non-2xx response or
/// transport error is terminal immediately.
///
/// A partially written file from an interrupted transfer is not cleaned up
/// here; the resume check upstream treats any existing destination as
/// complete, so an interrupted run can leave one truncated file that a rerun
/// will skip.
pub async fn download_photo(
    http: &reqwest::Client,
    url: &str,
    dest: &Path,
    policy: &RetryConfig,
) -> Result<()> {
    retry_with_backoff(policy, || download_attempt(http, url, dest)).await
}

async fn download_attempt(http: &reqwest::Client, url: &str, dest: &Path) -> Result<()> {
    let response = http.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Http { status });
    }

    let mut file = tokio::fs::File::create(dest).await?;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        file.write_all(&chunk?).await?;
    }
    file.flush().await?;

    tracing::debug!(url, dest = %dest.display(), "Downloaded photo");
    Ok(())
}
