//! Export orchestration
//!
//! [`Exporter`] is the library's front door. It holds the shared immutable
//! configuration plus the two connector factories, and offers three entry
//! points: a full-account run ([`Exporter::export_all`], two concurrent
//! phases), a single album ([`Exporter::export_album`]) and a collection
//! tree ([`Exporter::export_collection`], sequential).

mod album;
mod dispatch;
mod seen;

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

pub use seen::SeenFilenames;

use crate::catalog::CatalogConnector;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::resolver;
use crate::tagger::TaggerConnector;
use crate::types::{AlbumId, ExportFailure, RunSummary};
use album::{ExportSession, album_failure};
use std::sync::Arc;

/// Photo export pipeline over a catalog connector and a tagger connector
pub struct Exporter {
    config: Arc<Config>,
    catalog: Arc<dyn CatalogConnector>,
    tagger: Arc<dyn TaggerConnector>,
}

impl Exporter {
    /// Create an exporter after validating the configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the configuration is invalid.
    pub fn new(
        config: Config,
        catalog: Arc<dyn CatalogConnector>,
        tagger: Arc<dyn TaggerConnector>,
    ) -> Result<Self> {
        config.validate()?;
        tracing::debug!(
            catalog = catalog.name(),
            tagger = tagger.name(),
            output_dir = %config.output_dir.display(),
            "Exporter created"
        );
        Ok(Self {
            config: Arc::new(config),
            catalog,
            tagger,
        })
    }

    /// The validated configuration this exporter runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Export a single album by id
    ///
    /// Resolves the album's full info and photo listing, then exports it in
    /// listing order on the calling task. Per-photo failures come back in
    /// the returned list rather than aborting the album.
    ///
    /// # Errors
    ///
    /// Returns an error when the album cannot be resolved or its directory
    /// cannot be created.
    pub async fn export_album(&self, id: &AlbumId) -> Result<Vec<ExportFailure>> {
        let session = self.open_session()?;
        let mut album = resolver::album_info(session.client(), id).await?;
        album.photos =
            resolver::album_photos(session.client(), id, self.config.page_delay).await?;
        session.export_album(&album).await
    }

    /// Export every album of a collection, sequentially
    ///
    /// Albums whose photo listing cannot be fetched are recorded as failures
    /// and skipped; the remaining albums still run.
    ///
    /// # Errors
    ///
    /// Returns an error when the collection listing itself fails or the
    /// collection holds no albums.
    pub async fn export_collection(&self, collection_id: &str) -> Result<RunSummary> {
        let session = self.open_session()?;
        let albums = resolver::collection_albums(session.client(), collection_id).await?;
        if albums.is_empty() {
            return Err(Error::Api {
                message: format!("no albums found in collection {collection_id}"),
            });
        }

        tracing::info!(collection_id, albums = albums.len(), "Exporting collection");

        let mut summary = RunSummary::default();
        for mut album in albums {
            match resolver::album_photos(session.client(), &album.id, self.config.page_delay)
                .await
            {
                Ok(photos) => album.photos = photos,
                Err(e) => {
                    tracing::warn!(album_id = %album.id, error = %e, "Skipping album, photo listing failed");
                    summary
                        .failures
                        .push(ExportFailure::album(&album.id, e.to_string()));
                    continue;
                }
            }
            match session.export_album(&album).await {
                Ok(failures) if failures.is_empty() => summary.succeeded += 1,
                Ok(failures) => summary.failures.extend(failures),
                Err(e) => summary.failures.push(album_failure(&album, &e)),
            }
        }
        Ok(summary)
    }

    fn open_session(&self) -> Result<ExportSession> {
        ExportSession::open(
            self.config.clone(),
            self.catalog.as_ref(),
            self.tagger.as_ref(),
        )
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::test_helpers::{RecordingTagger, album_record, photo_record, serve_photos};
    use super::*;
    use crate::catalog::{MemoryCatalog, PhotoInfoRecord};
    use std::time::Duration;

    fn test_config(output_dir: &std::path::Path) -> Config {
        Config {
            output_dir: output_dir.to_path_buf(),
            page_delay: Duration::ZERO,
            download_delay: Duration::ZERO,
            ..Config::default()
        }
    }

    fn exporter(config: Config, catalog: &MemoryCatalog, tagger: &RecordingTagger) -> Exporter {
        Exporter::new(config, Arc::new(catalog.clone()), Arc::new(tagger.clone())).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let catalog = MemoryCatalog::builder(10).build();
        let tagger = RecordingTagger::ok();
        let config = Config {
            workers: 0,
            ..Config::default()
        };
        let result = Exporter::new(config, Arc::new(catalog), Arc::new(tagger));
        assert!(matches!(result.err(), Some(Error::Config { .. })));
    }

    #[tokio::test]
    async fn test_export_single_album() {
        let server = serve_photos(&[("1_o.jpg", b"one")]).await;
        let catalog = MemoryCatalog::builder(10)
            .album(
                album_record("a1", 1_546_300_800, "Trip"),
                vec![photo_record("1", &server)],
            )
            .detail("1", PhotoInfoRecord::default())
            .build();

        let out = tempfile::tempdir().unwrap();
        let tagger = RecordingTagger::ok();
        let failures = exporter(test_config(out.path()), &catalog, &tagger)
            .export_album(&AlbumId::new("a1"))
            .await
            .unwrap();

        assert!(failures.is_empty());
        assert!(out.path().join("2019-01-01 Trip").join("1_o.jpg").exists());
    }

    #[tokio::test]
    async fn test_export_unknown_album_errors() {
        let catalog = MemoryCatalog::builder(10).build();
        let out = tempfile::tempdir().unwrap();
        let tagger = RecordingTagger::ok();
        let err = exporter(test_config(out.path()), &catalog, &tagger)
            .export_album(&AlbumId::new("missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Api { .. }));
    }

    #[tokio::test]
    async fn test_export_collection_skips_unlistable_albums() {
        let server = serve_photos(&[("1_o.jpg", b"one")]).await;
        // "ghost" is reported by the collection but does not exist, so its
        // info upgrade falls back and its photo listing fails.
        let catalog = MemoryCatalog::builder(10)
            .album(
                album_record("a1", 1_546_300_800, "Good"),
                vec![photo_record("1", &server)],
            )
            .detail("1", PhotoInfoRecord::default())
            .collection(
                "c1",
                vec![album_record("a1", 0, "Good"), album_record("ghost", 0, "Ghost")],
            )
            .build();

        let out = tempfile::tempdir().unwrap();
        let tagger = RecordingTagger::ok();
        let summary = exporter(test_config(out.path()), &catalog, &tagger)
            .export_collection("c1")
            .await
            .unwrap();

        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].id, "ghost");
        assert!(out.path().join("2019-01-01 Good").join("1_o.jpg").exists());
    }

    #[tokio::test]
    async fn test_export_empty_collection_errors() {
        let catalog = MemoryCatalog::builder(10)
            .collection("empty", Vec::new())
            .build();
        let out = tempfile::tempdir().unwrap();
        let tagger = RecordingTagger::ok();
        let err = exporter(test_config(out.path()), &catalog, &tagger)
            .export_collection("empty")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Api { .. }));
    }
}
