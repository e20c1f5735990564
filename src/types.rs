//! Core domain types for flickr-dl

use chrono::{DateTime, Utc};

/// Unique identifier for a photo, assigned by the remote catalog
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PhotoId(pub String);

impl PhotoId {
    /// Create a new PhotoId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhotoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PhotoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Unique identifier for an album
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AlbumId(pub String);

impl AlbumId {
    /// Create a new AlbumId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AlbumId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AlbumId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Descriptive metadata populated by a detail fetch
///
/// Absent on a freshly listed [`Photo`]; the detail fetch is deferred until a
/// photo is actually about to be downloaded, because it is the expensive call.
#[derive(Clone, Debug, Default)]
pub struct PhotoDetail {
    /// Free-form description
    pub description: String,
    /// Raw tag strings (unordered)
    pub tags: Vec<String>,
    /// Capture timestamp, when the catalog knows it
    pub date_taken: Option<DateTime<Utc>>,
}

/// One downloadable photo
///
/// Created from a listing page with only id/title/URL/filename populated;
/// [`Photo::apply_detail`] fills in the rest immediately before download.
/// Never mutated after the download attempt completes.
#[derive(Clone, Debug)]
pub struct Photo {
    /// Remote-assigned identifier, unique within the account
    pub id: PhotoId,
    /// Photo title from the listing
    pub title: String,
    /// Original-resolution download location
    pub source_url: String,
    /// Final path segment of the source URL; the local filename
    pub filename: String,
    /// Detail-fetch fields; `None` until fetched
    pub detail: Option<PhotoDetail>,
}

impl Photo {
    /// Attach detail-fetch fields to a listing-state photo
    ///
    /// The detail title wins over the listing title when non-empty; the
    /// listing occasionally truncates titles.
    pub fn apply_detail(&mut self, title: String, detail: PhotoDetail) {
        if !title.is_empty() {
            self.title = title;
        }
        self.detail = Some(detail);
    }
}

/// A named, dated grouping of photos
#[derive(Clone, Debug)]
pub struct Album {
    /// Remote-assigned identifier
    pub id: AlbumId,
    /// Album title; sanitized before it becomes a directory name
    pub title: String,
    /// Album description
    pub description: String,
    /// Creation timestamp
    ///
    /// When the source omits it, a full info fetch substitutes the current
    /// wall clock, while a lighter-weight bulk listing substitutes the Unix
    /// epoch. The epoch is a deliberate "date unknown" sentinel so undated
    /// albums sort first; the two fallbacks must not be conflated.
    pub created: DateTime<Utc>,
    /// Photos in listing order; attached after a separate listing call
    pub photos: Vec<Photo>,
}

/// One recorded failure from an export run
#[derive(Clone, Debug)]
pub struct ExportFailure {
    /// Identifier of the photo or album that failed
    pub id: String,
    /// Local filename, when the failure is photo-level
    pub filename: Option<String>,
    /// Human-readable cause
    pub reason: String,
}

impl ExportFailure {
    /// Record a photo-level failure
    pub fn photo(photo: &Photo, reason: impl Into<String>) -> Self {
        Self {
            id: photo.id.to_string(),
            filename: Some(photo.filename.clone()),
            reason: reason.into(),
        }
    }

    /// Record an album-level failure
    pub fn album(id: &AlbumId, reason: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            filename: None,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ExportFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.filename {
            Some(name) => write!(f, "{} ({}): {}", name, self.id, self.reason),
            None => write!(f, "{}: {}", self.id, self.reason),
        }
    }
}

/// Aggregate outcome of one export run
///
/// Used only for final reporting; failures are never retried automatically
/// across runs. Re-running the same export is safe because completed photos
/// are skipped by the destination-exists resume check.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    /// Number of units of work (albums, or unattributed photos) that fully succeeded
    pub succeeded: usize,
    /// Failure descriptors in the order outcomes were collected
    pub failures: Vec<ExportFailure>,
}

impl RunSummary {
    /// True if every unit of work succeeded
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Merge another summary into this one
    pub fn absorb(&mut self, other: RunSummary) {
        self.succeeded += other.succeeded;
        self.failures.extend(other.failures);
    }
}
