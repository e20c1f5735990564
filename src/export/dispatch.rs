//! Two-phase concurrent dispatcher
//!
//! Fan-out/fan-in over bounded worker pools. Work is pre-loaded into a
//! channel that closes once fully enqueued; a fixed number of workers pull
//! from it until empty (no work stealing, no resizing) and report one
//! outcome per unit over a result channel that is drained after every
//! worker has finished. Nothing stops early: every reachable album and
//! photo is attempted exactly once per run regardless of earlier failures.

use super::album::{ExportSession, PhotoOutcome, album_failure};
use super::seen::SeenFilenames;
use super::Exporter;
use crate::catalog::CatalogConnector;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::resolver;
use crate::tagger::TaggerConnector;
use crate::types::{Album, ExportFailure, Photo, RunSummary};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;

/// One worker-reported outcome for one unit of work
enum UnitOutcome {
    /// The unit (an album, or one unattributed photo) fully succeeded
    Success,
    /// The unit produced one or more recorded failures
    Failed(Vec<ExportFailure>),
}

impl Exporter {
    /// Export every photo in the account
    ///
    /// Runs the album phase and, strictly after it completes, the
    /// unattributed phase over whatever the album phase did not claim.
    /// Only the initial album listing can abort the run outright; once the
    /// album phase has started, every failure (an account-wide listing
    /// failure included) is folded into the final summary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Incomplete`] carrying the full [`RunSummary`] when
    /// any unit of work failed or the account-wide listing could not be
    /// fetched, or the propagated listing error when the album list itself
    /// could not be fetched.
    pub async fn export_all(&self) -> Result<RunSummary> {
        let client = self.catalog.session()?;
        let albums = resolver::list_albums(client.as_ref(), self.config.page_delay).await?;
        drop(client);

        tracing::info!(
            albums = albums.len(),
            workers = self.config.workers,
            "Starting album phase"
        );

        let seen = SeenFilenames::new();
        let mut summary = self.album_phase(albums, &seen).await;

        tracing::info!(claimed = seen.len(), "Starting unattributed phase");
        match self.unattributed_phase(&seen).await {
            Ok(unattributed) => summary.absorb(unattributed),
            Err(e) => {
                // Album-phase outcomes are already in the summary; the
                // listing failure joins them rather than replacing them.
                tracing::error!(error = %e, "Account-wide photo listing failed");
                summary.failures.push(ExportFailure {
                    id: "account-photos".to_string(),
                    filename: None,
                    reason: e.to_string(),
                });
            }
        }

        if summary.is_clean() {
            tracing::info!(succeeded = summary.succeeded, "Export completed cleanly");
            Ok(summary)
        } else {
            tracing::error!(
                succeeded = summary.succeeded,
                failed = summary.failures.len(),
                "Export completed with failures"
            );
            for failure in &summary.failures {
                tracing::error!(%failure, "Recorded failure");
            }
            Err(Error::Incomplete(summary))
        }
    }

    /// Distribute every album across the worker pool
    async fn album_phase(&self, albums: Vec<Album>, seen: &SeenFilenames) -> RunSummary {
        let total = albums.len();
        if total == 0 {
            return RunSummary::default();
        }

        // Pre-load and close the queue before any worker starts.
        let (work_tx, work_rx) = mpsc::channel(total);
        for album in albums {
            let _ = work_tx.send(album).await;
        }
        drop(work_tx);
        let work_rx = Arc::new(Mutex::new(work_rx));

        // Room for one outcome per unit plus a possible session-open
        // failure per worker, so senders never block against the
        // post-join drain.
        let (result_tx, result_rx) = mpsc::channel(total + self.config.workers);

        let mut handles = Vec::with_capacity(self.config.workers);
        for worker in 0..self.config.workers {
            handles.push(tokio::spawn(album_worker(
                worker,
                self.config.clone(),
                self.catalog.clone(),
                self.tagger.clone(),
                work_rx.clone(),
                result_tx.clone(),
                seen.clone(),
            )));
        }
        drop(result_tx);

        join_workers(handles).await;
        drain_outcomes(result_rx).await
    }

    /// Export every photo no album claimed during this run
    async fn unattributed_phase(&self, seen: &SeenFilenames) -> Result<RunSummary> {
        let client = self.catalog.session()?;
        let all = resolver::account_photos(client.as_ref(), self.config.page_delay).await?;
        drop(client);

        let photos: Vec<Photo> = all
            .into_iter()
            .filter(|photo| !seen.contains(&photo.filename))
            .collect();

        if photos.is_empty() {
            tracing::info!("No unattributed photos, every photo belongs to an album");
            return Ok(RunSummary::default());
        }

        let dir = self.config.output_dir.join(&self.config.unorganized_dir);
        tokio::fs::create_dir_all(&dir).await?;

        tracing::info!(
            photos = photos.len(),
            dir = %dir.display(),
            workers = self.config.workers,
            "Exporting unattributed photos"
        );

        let total = photos.len();
        let (work_tx, work_rx) = mpsc::channel(total);
        for photo in photos {
            let _ = work_tx.send(photo).await;
        }
        drop(work_tx);
        let work_rx = Arc::new(Mutex::new(work_rx));

        let (result_tx, result_rx) = mpsc::channel(total + self.config.workers);

        let mut handles = Vec::with_capacity(self.config.workers);
        for worker in 0..self.config.workers {
            handles.push(tokio::spawn(photo_worker(
                worker,
                self.config.clone(),
                self.catalog.clone(),
                self.tagger.clone(),
                work_rx.clone(),
                result_tx.clone(),
                dir.clone(),
            )));
        }
        drop(result_tx);

        join_workers(handles).await;
        Ok(drain_outcomes(result_rx).await)
    }
}

/// Album-phase worker: list, claim filenames, then export
async fn album_worker(
    worker: usize,
    config: Arc<Config>,
    catalog: Arc<dyn CatalogConnector>,
    tagger: Arc<dyn TaggerConnector>,
    work: Arc<Mutex<mpsc::Receiver<Album>>>,
    results: mpsc::Sender<UnitOutcome>,
    seen: SeenFilenames,
) {
    let session = match ExportSession::open(config.clone(), catalog.as_ref(), tagger.as_ref()) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(worker, error = %e, "Worker could not open its sessions");
            let _ = results
                .send(UnitOutcome::Failed(vec![ExportFailure {
                    id: format!("worker-{worker}"),
                    filename: None,
                    reason: e.to_string(),
                }]))
                .await;
            return;
        }
    };

    loop {
        let album = { work.lock().await.recv().await };
        let Some(mut album) = album else { break };

        tracing::info!(worker, album_id = %album.id, title = %album.title, "Processing album");

        match resolver::album_photos(session.client(), &album.id, config.page_delay).await {
            Ok(photos) => album.photos = photos,
            Err(e) => {
                tracing::warn!(worker, album_id = %album.id, error = %e, "Failed to list album photos");
                let _ = results
                    .send(UnitOutcome::Failed(vec![ExportFailure::album(
                        &album.id,
                        e.to_string(),
                    )]))
                    .await;
                continue;
            }
        }

        // Claimed before any download is attempted: a crash mid-album must
        // still keep these names out of the unattributed phase.
        seen.claim_all(album.photos.iter().map(|photo| photo.filename.as_str()));

        let outcome = match session.export_album(&album).await {
            Ok(failures) if failures.is_empty() => {
                tracing::info!(worker, album_id = %album.id, photos = album.photos.len(), "Completed album");
                UnitOutcome::Success
            }
            Ok(failures) => UnitOutcome::Failed(failures),
            Err(e) => UnitOutcome::Failed(vec![album_failure(&album, &e)]),
        };
        let _ = results.send(outcome).await;
    }
}

/// Unattributed-phase worker: one photo per unit of work
async fn photo_worker(
    worker: usize,
    config: Arc<Config>,
    catalog: Arc<dyn CatalogConnector>,
    tagger: Arc<dyn TaggerConnector>,
    work: Arc<Mutex<mpsc::Receiver<Photo>>>,
    results: mpsc::Sender<UnitOutcome>,
    dir: PathBuf,
) {
    let session = match ExportSession::open(config.clone(), catalog.as_ref(), tagger.as_ref()) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(worker, error = %e, "Worker could not open its sessions");
            let _ = results
                .send(UnitOutcome::Failed(vec![ExportFailure {
                    id: format!("worker-{worker}"),
                    filename: None,
                    reason: e.to_string(),
                }]))
                .await;
            return;
        }
    };

    loop {
        let photo = { work.lock().await.recv().await };
        let Some(mut photo) = photo else { break };

        let outcome = match session.export_photo(&mut photo, &dir).await {
            Ok(PhotoOutcome::Exported) => {
                tokio::time::sleep(config.download_delay).await;
                UnitOutcome::Success
            }
            Ok(PhotoOutcome::Skipped) => UnitOutcome::Success,
            Err(e) => {
                tracing::warn!(worker, photo_id = %photo.id, filename = %photo.filename, error = %e, "Unattributed photo failed");
                UnitOutcome::Failed(vec![ExportFailure::photo(&photo, e.to_string())])
            }
        };
        let _ = results.send(outcome).await;
    }
}

async fn join_workers(handles: Vec<JoinHandle<()>>) {
    for handle in handles {
        if let Err(e) = handle.await {
            tracing::error!(error = %e, "Worker task panicked");
        }
    }
}

async fn drain_outcomes(mut results: mpsc::Receiver<UnitOutcome>) -> RunSummary {
    let mut summary = RunSummary::default();
    while let Some(outcome) = results.recv().await {
        match outcome {
            UnitOutcome::Success => summary.succeeded += 1,
            UnitOutcome::Failed(failures) => summary.failures.extend(failures),
        }
    }
    summary
}
