//! Turns raw catalog responses into the domain model
//!
//! Pagination draining, timestamp normalization and filename derivation live
//! here. Listings always drain every page before returning and stop strictly
//! at the catalog-reported page count, never when a page comes back short,
//! since a short non-final page is legal. A single failed page aborts the
//! whole listing; callers decide whether that skips an album or the run.

use crate::catalog::{AlbumRecord, CatalogClient, Page, PhotoRecord};
use crate::config::RetryConfig;
use crate::error::Result;
use crate::retry::retry_with_backoff;
use crate::types::{Album, AlbumId, Photo, PhotoDetail, PhotoId};
use crate::utils::filename_from_url;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use futures::future::BoxFuture;
use std::time::Duration;

/// Date-taken format used by the catalog's detail call
const DATE_TAKEN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// List every album in the account, draining all pages
///
/// Albums with an unset creation time get the Unix epoch: the bulk listing is
/// the lighter-weight source, and epoch marks "date unknown" so undated
/// albums sort first. Photos are not attached here.
pub async fn list_albums(client: &dyn CatalogClient, page_delay: Duration) -> Result<Vec<Album>> {
    let records = drain_pages(page_delay, |page| client.list_albums(page)).await?;
    Ok(records
        .into_iter()
        .map(|record| album_from_record(record, DateTime::UNIX_EPOCH))
        .collect())
}

/// Fetch full info for one album
///
/// An unset creation time falls back to the current wall clock here, a
/// best-effort freshness signal deliberately distinct from the bulk
/// listing's epoch sentinel.
pub async fn album_info(client: &dyn CatalogClient, id: &AlbumId) -> Result<Album> {
    let record = client.album_info(id).await?;
    Ok(album_from_record(record, Utc::now()))
}

/// List an album's photos in listing order, draining all pages
///
/// Photos whose source URL is empty or unparsable cannot be downloaded and
/// are silently excluded.
pub async fn album_photos(
    client: &dyn CatalogClient,
    id: &AlbumId,
    page_delay: Duration,
) -> Result<Vec<Photo>> {
    let records = drain_pages(page_delay, |page| client.list_album_photos(id, page)).await?;
    Ok(records.into_iter().filter_map(photo_from_record).collect())
}

/// List every photo in the account, album or not
pub async fn account_photos(
    client: &dyn CatalogClient,
    page_delay: Duration,
) -> Result<Vec<Photo>> {
    let records = drain_pages(page_delay, |page| client.list_account_photos(page)).await?;
    Ok(records.into_iter().filter_map(photo_from_record).collect())
}

/// List the albums of a collection
///
/// The collection tree is a lighter-weight listing without reliable album
/// dates, so each record is upgraded through a full info fetch; when that
/// fetch fails the listing record is kept with the epoch fallback.
pub async fn collection_albums(
    client: &dyn CatalogClient,
    collection_id: &str,
) -> Result<Vec<Album>> {
    let records = client.collection_albums(collection_id).await?;
    let mut albums = Vec::with_capacity(records.len());
    for record in records {
        let id = AlbumId::new(record.id.clone());
        match album_info(client, &id).await {
            Ok(album) => albums.push(album),
            Err(e) => {
                tracing::warn!(
                    album_id = %id,
                    error = %e,
                    "Failed to fetch full album info, using collection listing record"
                );
                albums.push(album_from_record(record, DateTime::UNIX_EPOCH));
            }
        }
    }
    Ok(albums)
}

/// Populate a photo's detail fields, retrying rate limits with backoff
///
/// The detail call is the expensive one and the first to get throttled, so
/// it carries the exponential-backoff policy (5 attempts, 2s/4s/8s/16s by
/// default) rather than the download's single-retry rule.
pub async fn fetch_detail(
    client: &dyn CatalogClient,
    photo: &mut Photo,
    retry: &RetryConfig,
) -> Result<()> {
    let info = retry_with_backoff(retry, || client.photo_info(&photo.id)).await?;

    let date_taken = parse_date_taken(&info.taken);
    photo.apply_detail(
        info.title,
        PhotoDetail {
            description: info.description,
            tags: info.tags,
            date_taken,
        },
    );
    Ok(())
}

/// Drain every page of a listing, imposing the courtesy inter-page delay
///
/// The delay sits between successive page requests only and is independent
/// of any retry policy. A failed page aborts the listing with the page
/// number attached; partial listings are never returned.
///
/// `fetch` returns the boxed futures the client trait methods already
/// produce, which keeps the whole drain provably `Send` inside spawned
/// worker tasks.
async fn drain_pages<'a, T, F>(page_delay: Duration, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> BoxFuture<'a, Result<Page<T>>>,
{
    let mut items = Vec::new();
    let mut page = 1u32;

    loop {
        let batch = fetch(page).await.map_err(|e| e.on_page(page))?;
        let pages = batch.pages;
        tracing::debug!(page, pages, count = batch.items.len(), "Fetched listing page");
        items.extend(batch.items);

        if page >= pages {
            break;
        }
        page += 1;
        tokio::time::sleep(page_delay).await;
    }

    Ok(items)
}

fn album_from_record(record: AlbumRecord, fallback: DateTime<Utc>) -> Album {
    let created = if record.created > 0 {
        Utc.timestamp_opt(record.created, 0).single().unwrap_or(fallback)
    } else {
        fallback
    };

    Album {
        id: AlbumId::new(record.id),
        title: record.title,
        description: record.description,
        created,
        photos: Vec::new(),
    }
}

fn photo_from_record(record: PhotoRecord) -> Option<Photo> {
    let Some(filename) = filename_from_url(&record.original_url) else {
        tracing::debug!(
            photo_id = %record.id,
            "Skipping photo without a usable original URL"
        );
        return None;
    };

    Some(Photo {
        id: PhotoId::new(record.id),
        title: record.title,
        source_url: record.original_url,
        filename,
        detail: None,
    })
}

fn parse_date_taken(taken: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(taken, DATE_TAKEN_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
