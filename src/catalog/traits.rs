//! Traits and wire types for the remote catalog

use crate::error::Result;
use crate::types::{AlbumId, PhotoId};
use async_trait::async_trait;

/// One page of a paginated listing
#[derive(Clone, Debug)]
pub struct Page<T> {
    /// Items on this page (may be shorter than the page size on any page)
    pub items: Vec<T>,
    /// 1-based page number of this page
    pub page: u32,
    /// Total page count reported by the catalog
    ///
    /// Pagination stops strictly when this count is reached, never on a
    /// short page; a short non-final page would otherwise truncate listings.
    pub pages: u32,
}

impl<T> Page<T> {
    /// True if this is the final page of the listing
    pub fn is_last(&self) -> bool {
        self.page >= self.pages
    }
}

/// Album fields as the catalog reports them in listings
#[derive(Clone, Debug)]
pub struct AlbumRecord {
    /// Remote identifier
    pub id: String,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Creation time as unix seconds; 0 means unset
    pub created: i64,
}

/// Photo fields as the catalog reports them in listings
#[derive(Clone, Debug)]
pub struct PhotoRecord {
    /// Remote identifier
    pub id: String,
    /// Title
    pub title: String,
    /// Original-resolution URL; empty when the account does not expose originals
    pub original_url: String,
}

/// Photo fields returned by the expensive per-photo detail call
#[derive(Clone, Debug, Default)]
pub struct PhotoInfoRecord {
    /// Full title
    pub title: String,
    /// Description
    pub description: String,
    /// Raw tag strings
    pub tags: Vec<String>,
    /// Capture time as `"YYYY-MM-DD HH:MM:SS"`; empty when unknown
    pub taken: String,
}

/// Authenticated access to the remote photo catalog
///
/// Every call may fail with a transport error, a rate-limit error
/// ([`crate::Error::is_rate_limited`]), or a generic API error payload. Page
/// numbers are 1-based. Sessions are held behind shared references inside
/// spawned worker tasks, so implementations must be `Sync` as well as `Send`.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// List one page of the account's albums
    async fn list_albums(&self, page: u32) -> Result<Page<AlbumRecord>>;

    /// Fetch full info for one album
    async fn album_info(&self, id: &AlbumId) -> Result<AlbumRecord>;

    /// List one page of an album's photos
    async fn list_album_photos(&self, id: &AlbumId, page: u32) -> Result<Page<PhotoRecord>>;

    /// Fetch full detail for one photo (the expensive call)
    async fn photo_info(&self, id: &PhotoId) -> Result<PhotoInfoRecord>;

    /// List one page of every photo in the account, album or not
    async fn list_account_photos(&self, page: u32) -> Result<Page<PhotoRecord>>;

    /// List the albums of a collection tree
    ///
    /// A lighter-weight listing that lacks true album creation dates; the
    /// resolver upgrades each record through [`CatalogClient::album_info`].
    async fn collection_albums(&self, collection_id: &str) -> Result<Vec<AlbumRecord>>;
}

/// Factory for per-worker catalog sessions
///
/// Connectors hold an immutable credential value and construct a private
/// client per call, so concurrent workers never share mutable client state.
pub trait CatalogConnector: Send + Sync {
    /// Open a fresh client session
    fn session(&self) -> Result<Box<dyn CatalogClient>>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
