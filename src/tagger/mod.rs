//! Embedded metadata tagging
//!
//! This module provides a trait-based architecture for writing descriptive
//! metadata into downloaded files. The library never parses image formats
//! itself; it only knows the facility as "apply these tags to file path P,
//! fails or succeeds".
//!
//! ## Architecture
//!
//! The core abstraction is the [`MetadataTagger`] trait. Two implementations
//! are provided:
//!
//! - [`ExifTool`]: shells out to the external `exiftool` binary
//! - [`NoOpTagger`]: stub for graceful degradation when no tagger is available
//!
//! [`TaggerConnector`] builds per-worker tagger sessions, mirroring the
//! catalog connector: concurrent workers never share a tagger session.

mod exiftool;
mod noop;
mod traits;

pub use exiftool::ExifTool;
pub use noop::NoOpTagger;
pub use traits::{MetadataTagger, TagSet, TaggerConnector};
