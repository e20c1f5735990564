//! Error types for flickr-dl
//!
//! This module provides error handling for the library, including:
//! - Domain-specific error variants (catalog, transfer, tagging)
//! - Rate-limit classification used by the retry policies
//! - The aggregate run outcome carried by [`Error::Incomplete`]

use crate::types::RunSummary;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for flickr-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for flickr-dl
///
/// This is the primary error type used throughout the library. Each variant includes
/// contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Generic catalog API error payload with a human-readable message
    #[error("catalog API error: {message}")]
    Api {
        /// Message carried by the API error payload
        message: String,
    },

    /// API-level rate-limit payload (distinct from a transport-level HTTP 429)
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Non-2xx HTTP response from a transfer
    #[error("HTTP {status}")]
    Http {
        /// Response status code
        status: reqwest::StatusCode,
    },

    /// Transport-level HTTP error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A page fetch failed mid-pagination, aborting the whole listing
    #[error("failed to fetch page {page}: {source}")]
    Page {
        /// Page number that failed (1-based)
        page: u32,
        /// Underlying failure
        source: Box<Error>,
    },

    /// Metadata write failed for a downloaded file
    #[error("failed to write metadata for {path}: {message}")]
    Tagging {
        /// File the tagger was writing to
        path: PathBuf,
        /// Tagger-reported failure
        message: String,
    },

    /// External tool execution error (e.g. exiftool could not be spawned)
    #[error("external tool error: {0}")]
    ExternalTool(String),

    /// Configuration error
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
    },

    /// The run finished, but one or more units of work failed
    ///
    /// Every reachable album/photo was still attempted exactly once; the
    /// carried [`RunSummary`] lists each failure with enough detail to retry
    /// by re-running the same export.
    #[error("export completed with {} failures", .0.failures.len())]
    Incomplete(RunSummary),
}

impl Error {
    /// Returns true if this error is a rate-limit signal
    ///
    /// Covers a transport-level HTTP 429 as well as API-level error payloads
    /// that describe throttling. This is the only error class the retry
    /// policies treat as transient.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Error::RateLimited(_) => true,
            Error::Http { status } => *status == reqwest::StatusCode::TOO_MANY_REQUESTS,
            Error::Network(e) => e.status() == Some(reqwest::StatusCode::TOO_MANY_REQUESTS),
            Error::Api { message } => {
                let message = message.to_ascii_lowercase();
                message.contains("rate limit") || message.contains("too many requests")
            }
            Error::Page { source, .. } => source.is_rate_limited(),
            _ => false,
        }
    }

    /// Wrap a listing failure with the page number it occurred on
    pub(crate) fn on_page(self, page: u32) -> Self {
        Error::Page {
            page,
            source: Box::new(self),
        }
    }
}
