//! Configuration types for flickr-dl

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration for the exporter
///
/// All fields have sensible defaults matching the original export behavior:
/// 4 workers per phase, 100 ms courtesy delays, 429-aware retry policies.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Root directory exported albums are written under (default: "./flickr-export")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Worker pool size for each export phase (default: 4)
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Courtesy delay between successive page requests of one listing (default: 100 ms)
    ///
    /// Independent of the retry policies; applied even when no request has failed.
    #[serde(default = "default_courtesy_delay", with = "duration_millis")]
    pub page_delay: Duration,

    /// Courtesy delay between consecutive downloads within one album (default: 100 ms)
    #[serde(default = "default_courtesy_delay", with = "duration_millis")]
    pub download_delay: Duration,

    /// Directory name for photos that belong to no album (default: "Unorganized Photos")
    #[serde(default = "default_unorganized_dir")]
    pub unorganized_dir: String,

    /// Retry policy for per-photo detail fetches
    #[serde(default = "RetryConfig::for_detail_fetch")]
    pub detail_retry: RetryConfig,

    /// Retry policy for original-resolution downloads
    #[serde(default = "RetryConfig::for_download")]
    pub download_retry: RetryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            workers: default_workers(),
            page_delay: default_courtesy_delay(),
            download_delay: default_courtesy_delay(),
            unorganized_dir: default_unorganized_dir(),
            detail_retry: RetryConfig::for_detail_fetch(),
            download_retry: RetryConfig::for_download(),
        }
    }
}

impl Config {
    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if `workers` is zero or `unorganized_dir` is empty.
    pub fn validate(&self) -> crate::Result<()> {
        if self.workers == 0 {
            return Err(crate::Error::Config {
                message: "workers must be at least 1".to_string(),
            });
        }
        if self.unorganized_dir.is_empty() {
            return Err(crate::Error::Config {
                message: "unorganized_dir must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// API credentials for the remote catalog
///
/// An immutable value that connectors build per-worker client sessions from.
/// Obtaining tokens (the OAuth handshake) and persisting this record are the
/// consumer's concern.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Credentials {
    /// API key
    pub api_key: String,
    /// API secret
    pub api_secret: String,
    /// OAuth access token
    pub access_token: String,
    /// OAuth access token secret
    pub access_token_secret: String,
}

/// Retry configuration with exponential backoff
///
/// Only rate-limit errors are retried (see [`crate::retry::IsRetryable`]);
/// everything else is terminal on the first failure regardless of this config.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the initial try
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry
    #[serde(default = "default_initial_delay", with = "duration_millis")]
    pub initial_delay: Duration,

    /// Maximum delay between retries
    #[serde(default = "default_max_delay", with = "duration_millis")]
    pub max_delay: Duration,

    /// Multiplier applied to the delay after each retry
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Add random jitter to delays (default: false, delays are exact)
    #[serde(default)]
    pub jitter: bool,
}

impl RetryConfig {
    /// Policy for detail fetches: 5 attempts total, delays of 2s, 4s, 8s, 16s
    pub fn for_detail_fetch() -> Self {
        Self {
            max_attempts: 4,
            initial_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(60),
            backoff_multiplier: 2.0,
            jitter: false,
        }
    }

    /// Policy for downloads: a single retry after a 5 second wait
    pub fn for_download() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::from_secs(5),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 1.0,
            jitter: false,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::for_detail_fetch()
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./flickr-export")
}

fn default_workers() -> usize {
    4
}

fn default_courtesy_delay() -> Duration {
    Duration::from_millis(100)
}

fn default_unorganized_dir() -> String {
    "Unorganized Photos".to_string()
}

fn default_max_attempts() -> u32 {
    4
}

fn default_initial_delay() -> Duration {
    Duration::from_secs(2)
}

fn default_max_delay() -> Duration {
    Duration::from_secs(60)
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

// Duration serialization helper (whole milliseconds)
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
