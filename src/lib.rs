//! # flickr-dl
//!
//! Backend library for bulk-exporting a photo account into a local,
//! album-organized archive.
//!
//! ## Design Philosophy
//!
//! flickr-dl is designed to be:
//! - **Resumable** - Re-running a partial export only fetches what is missing
//! - **Polite** - Courtesy delays and rate-limit-aware retries throughout
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Pluggable** - Catalog access and metadata tagging sit behind traits
//!
//! ## Quick Start
//!
//! ```no_run
//! use flickr_dl::{Config, ExifTool, Exporter, MemoryCatalog};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         output_dir: "/photos/export".into(),
//!         ..Default::default()
//!     };
//!
//!     // Any CatalogConnector works here; MemoryCatalog serves fixture data
//!     let catalog = Arc::new(MemoryCatalog::builder(500).build());
//!     let tagger = Arc::new(ExifTool::from_path().ok_or("exiftool not found in PATH")?);
//!
//!     let exporter = Exporter::new(config, catalog, tagger)?;
//!     let summary = exporter.export_all().await?;
//!     println!("exported {} units cleanly", summary.succeeded);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Remote catalog traits and the in-memory implementation
pub mod catalog;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Export orchestration
pub mod export;
/// Listing resolution and pagination draining
pub mod resolver;
/// Retry logic with exponential backoff
pub mod retry;
/// Metadata tagging via external tools
pub mod tagger;
/// Photo file transfer
pub mod transfer;
/// Core domain types
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use catalog::{
    AlbumRecord, CatalogClient, CatalogConnector, MemoryCatalog, Page, PhotoInfoRecord,
    PhotoRecord,
};
pub use config::{Config, Credentials, RetryConfig};
pub use error::{Error, Result};
pub use export::{Exporter, SeenFilenames};
pub use tagger::{ExifTool, MetadataTagger, NoOpTagger, TagSet, TaggerConnector};
pub use types::{Album, AlbumId, ExportFailure, Photo, PhotoDetail, PhotoId, RunSummary};
