//! Per-worker export session: the single-album planner
//!
//! One [`ExportSession`] belongs to exactly one worker. It owns a private
//! catalog client, a private tagger session and a private HTTP client, so
//! nothing here is shared mutable state; the only cross-worker state is the
//! seen-filename registry, which lives in the dispatcher.

use crate::catalog::{CatalogClient, CatalogConnector};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::resolver;
use crate::tagger::{MetadataTagger, TagSet, TaggerConnector};
use crate::transfer::download_photo;
use crate::types::{Album, ExportFailure, Photo};
use crate::utils::album_dir_name;
use std::path::Path;
use std::sync::Arc;

/// How a single photo's export attempt ended (successfully)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PhotoOutcome {
    /// Destination already existed; nothing was fetched
    Skipped,
    /// Downloaded and tagged
    Exported,
}

/// One worker's private sessions plus the shared immutable config
pub(crate) struct ExportSession {
    config: Arc<Config>,
    client: Box<dyn CatalogClient>,
    tagger: Box<dyn MetadataTagger>,
    http: reqwest::Client,
}

impl ExportSession {
    /// Open fresh catalog and tagger sessions for one worker
    pub(crate) fn open(
        config: Arc<Config>,
        catalog: &dyn CatalogConnector,
        tagger: &dyn TaggerConnector,
    ) -> Result<Self> {
        Ok(Self {
            config,
            client: catalog.session()?,
            tagger: tagger.session()?,
            http: reqwest::Client::new(),
        })
    }

    /// The session's private catalog client
    pub(crate) fn client(&self) -> &dyn CatalogClient {
        self.client.as_ref()
    }

    /// Export one album end-to-end
    ///
    /// Creates the dated album directory (idempotently) and processes the
    /// photos strictly in listing order, recording per-photo failures
    /// without ever aborting siblings. The courtesy download delay runs
    /// after each actually-downloaded photo except the last.
    ///
    /// # Errors
    ///
    /// Only directory creation fails the album as a whole; everything
    /// photo-level comes back in the returned failure list.
    pub(crate) async fn export_album(&self, album: &Album) -> Result<Vec<ExportFailure>> {
        let dir = self.config.output_dir.join(album_dir_name(album));
        tokio::fs::create_dir_all(&dir).await?;

        tracing::info!(
            album_id = %album.id,
            dir = %dir.display(),
            photos = album.photos.len(),
            "Exporting album"
        );

        let mut failures = Vec::new();
        let last = album.photos.len().saturating_sub(1);

        for (index, photo) in album.photos.iter().enumerate() {
            let mut photo = photo.clone();
            match self.export_photo(&mut photo, &dir).await {
                Ok(PhotoOutcome::Exported) => {
                    if index < last {
                        tokio::time::sleep(self.config.download_delay).await;
                    }
                }
                Ok(PhotoOutcome::Skipped) => {}
                Err(e) => {
                    tracing::warn!(
                        photo_id = %photo.id,
                        filename = %photo.filename,
                        error = %e,
                        "Photo export failed"
                    );
                    failures.push(ExportFailure::photo(&photo, e.to_string()));
                }
            }
        }

        Ok(failures)
    }

    /// Run the per-photo pipeline: resume check, detail fetch, download, tag
    ///
    /// A failure at any stage abandons the photo. A tagging failure
    /// additionally deletes the just-downloaded file, so a future resume
    /// cannot mistake the untagged artifact for a completed export; that
    /// deletion is best-effort and never escalates.
    pub(crate) async fn export_photo(
        &self,
        photo: &mut Photo,
        dir: &Path,
    ) -> Result<PhotoOutcome> {
        let dest = dir.join(&photo.filename);

        // Resume mechanism: existence alone is sufficient, no checksum.
        if tokio::fs::metadata(&dest).await.is_ok() {
            tracing::debug!(filename = %photo.filename, "Skipping, already exists");
            return Ok(PhotoOutcome::Skipped);
        }

        resolver::fetch_detail(self.client(), photo, &self.config.detail_retry).await?;

        download_photo(&self.http, &photo.source_url, &dest, &self.config.download_retry).await?;

        if let Err(e) = self.tagger.write_tags(&dest, &tag_set_for(photo)).await {
            if let Err(remove_err) = tokio::fs::remove_file(&dest).await {
                tracing::warn!(
                    dest = %dest.display(),
                    error = %remove_err,
                    "Failed to remove photo after tagging failure"
                );
            }
            return Err(e);
        }

        Ok(PhotoOutcome::Exported)
    }
}

/// Build the tag set for a detailed photo
///
/// Empty fields are left unset so the tagger never writes an empty-string
/// override over metadata the file may already carry.
fn tag_set_for(photo: &Photo) -> TagSet {
    let mut tags = TagSet::default();
    if !photo.title.is_empty() {
        tags.object_name = Some(photo.title.clone());
    }
    if let Some(detail) = &photo.detail {
        if !detail.description.is_empty() {
            tags.caption = Some(detail.description.clone());
        }
        tags.keywords = detail.tags.clone();
    }
    tags
}

/// Map a directory-creation failure to an album-level failure descriptor
pub(crate) fn album_failure(album: &Album, error: &Error) -> ExportFailure {
    ExportFailure::album(&album.id, error.to_string())
}
