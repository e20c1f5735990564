//! In-memory catalog over fixture data
//!
//! Serves pre-loaded records with real pagination so callers exercise the
//! same draining logic they would against the remote API. Used by the test
//! suite and for offline dry runs. Records every call it serves, which lets
//! tests assert that resumed photos never reach the network layer.

use super::traits::{
    AlbumRecord, CatalogClient, CatalogConnector, Page, PhotoInfoRecord, PhotoRecord,
};
use crate::error::{Error, Result};
use crate::types::{AlbumId, PhotoId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

struct Inner {
    page_size: usize,
    albums: Vec<AlbumRecord>,
    album_photos: HashMap<String, Vec<PhotoRecord>>,
    photo_details: HashMap<String, PhotoInfoRecord>,
    account_photos: Vec<PhotoRecord>,
    collections: HashMap<String, Vec<AlbumRecord>>,
    calls: Mutex<Vec<String>>,
}

/// In-memory [`CatalogClient`] and [`CatalogConnector`] over fixture data
///
/// Cheap to clone; clones share the fixture data and the call log.
#[derive(Clone)]
pub struct MemoryCatalog {
    inner: Arc<Inner>,
}

/// Builder for [`MemoryCatalog`] fixture data
pub struct MemoryCatalogBuilder {
    page_size: usize,
    albums: Vec<AlbumRecord>,
    album_photos: HashMap<String, Vec<PhotoRecord>>,
    photo_details: HashMap<String, PhotoInfoRecord>,
    account_photos: Vec<PhotoRecord>,
    collections: HashMap<String, Vec<AlbumRecord>>,
}

impl MemoryCatalog {
    /// Start building a catalog with the given listing page size
    pub fn builder(page_size: usize) -> MemoryCatalogBuilder {
        MemoryCatalogBuilder {
            page_size: page_size.max(1),
            albums: Vec::new(),
            album_photos: HashMap::new(),
            photo_details: HashMap::new(),
            account_photos: Vec::new(),
            collections: HashMap::new(),
        }
    }

    /// Snapshot of every call served so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.inner
            .calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn record(&self, call: String) {
        self.inner
            .calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(call);
    }

    fn paginate<T: Clone>(&self, items: &[T], page: u32) -> Result<Page<T>> {
        let page_size = self.inner.page_size;
        let pages = (items.len().div_ceil(page_size)).max(1) as u32;
        if page == 0 || page > pages {
            return Err(Error::Api {
                message: format!("page {page} out of range (1..={pages})"),
            });
        }
        let start = (page as usize - 1) * page_size;
        let end = (start + page_size).min(items.len());
        Ok(Page {
            items: items[start..end].to_vec(),
            page,
            pages,
        })
    }
}

impl MemoryCatalogBuilder {
    /// Add an album with its photo listing
    pub fn album(mut self, record: AlbumRecord, photos: Vec<PhotoRecord>) -> Self {
        self.album_photos.insert(record.id.clone(), photos);
        self.albums.push(record);
        self
    }

    /// Add detail-call data for one photo
    pub fn detail(mut self, id: &str, info: PhotoInfoRecord) -> Self {
        self.photo_details.insert(id.to_string(), info);
        self
    }

    /// Add a photo to the account-wide listing
    pub fn account_photo(mut self, record: PhotoRecord) -> Self {
        self.account_photos.push(record);
        self
    }

    /// Add a collection holding the given album records
    pub fn collection(mut self, id: &str, albums: Vec<AlbumRecord>) -> Self {
        self.collections.insert(id.to_string(), albums);
        self
    }

    /// Freeze the fixture data
    pub fn build(self) -> MemoryCatalog {
        MemoryCatalog {
            inner: Arc::new(Inner {
                page_size: self.page_size,
                albums: self.albums,
                album_photos: self.album_photos,
                photo_details: self.photo_details,
                account_photos: self.account_photos,
                collections: self.collections,
                calls: Mutex::new(Vec::new()),
            }),
        }
    }
}

#[async_trait]
impl CatalogClient for MemoryCatalog {
    async fn list_albums(&self, page: u32) -> Result<Page<AlbumRecord>> {
        self.record(format!("list_albums p{page}"));
        self.paginate(&self.inner.albums, page)
    }

    async fn album_info(&self, id: &AlbumId) -> Result<AlbumRecord> {
        self.record(format!("album_info {id}"));
        self.inner
            .albums
            .iter()
            .find(|album| album.id == id.as_str())
            .cloned()
            .ok_or_else(|| Error::Api {
                message: format!("Photoset {id} not found"),
            })
    }

    async fn list_album_photos(&self, id: &AlbumId, page: u32) -> Result<Page<PhotoRecord>> {
        self.record(format!("list_album_photos {id} p{page}"));
        let photos = self.inner.album_photos.get(id.as_str()).ok_or_else(|| Error::Api {
            message: format!("Photoset {id} not found"),
        })?;
        self.paginate(photos, page)
    }

    async fn photo_info(&self, id: &PhotoId) -> Result<PhotoInfoRecord> {
        self.record(format!("photo_info {id}"));
        self.inner
            .photo_details
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| Error::Api {
                message: format!("Photo {id} not found"),
            })
    }

    async fn list_account_photos(&self, page: u32) -> Result<Page<PhotoRecord>> {
        self.record(format!("list_account_photos p{page}"));
        self.paginate(&self.inner.account_photos, page)
    }

    async fn collection_albums(&self, collection_id: &str) -> Result<Vec<AlbumRecord>> {
        self.record(format!("collection_albums {collection_id}"));
        self.inner
            .collections
            .get(collection_id)
            .cloned()
            .ok_or_else(|| Error::Api {
                message: format!("Collection {collection_id} not found"),
            })
    }
}

impl CatalogConnector for MemoryCatalog {
    fn session(&self) -> Result<Box<dyn CatalogClient>> {
        Ok(Box::new(self.clone()))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
