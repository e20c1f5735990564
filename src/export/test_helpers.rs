//! Shared fixtures for export tests

use crate::catalog::{AlbumRecord, MemoryCatalog, PhotoRecord};
use crate::error::{Error, Result};
use crate::resolver;
use crate::tagger::{MetadataTagger, TagSet, TaggerConnector};
use crate::types::{Album, AlbumId};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Tagger double that records every write and optionally fails them all
#[derive(Clone)]
pub(crate) struct RecordingTagger {
    writes: Arc<Mutex<Vec<(PathBuf, TagSet)>>>,
    fail: bool,
}

impl RecordingTagger {
    pub(crate) fn ok() -> Self {
        Self {
            writes: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            writes: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    pub(crate) fn writes(&self) -> Vec<(PathBuf, TagSet)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataTagger for RecordingTagger {
    async fn write_tags(&self, path: &Path, tags: &TagSet) -> Result<()> {
        if self.fail {
            return Err(Error::Tagging {
                path: path.to_path_buf(),
                message: "simulated tagger failure".to_string(),
            });
        }
        self.writes
            .lock()
            .unwrap()
            .push((path.to_path_buf(), tags.clone()));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

impl TaggerConnector for RecordingTagger {
    fn session(&self) -> Result<Box<dyn MetadataTagger>> {
        Ok(Box::new(self.clone()))
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Serve photo bytes under `/p/<name>` on a fresh mock server
pub(crate) async fn serve_photos(files: &[(&str, &[u8])]) -> MockServer {
    let server = MockServer::start().await;
    for (name, body) in files {
        Mock::given(method("GET"))
            .and(path_regex(format!("^/p/{}$", regex_escape(name))))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
            .mount(&server)
            .await;
    }
    server
}

// Filenames in fixtures only contain dots as metacharacters
fn regex_escape(name: &str) -> String {
    name.replace('.', "\\.")
}

pub(crate) fn album_record(id: &str, created: i64, title: &str) -> AlbumRecord {
    AlbumRecord {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        created,
    }
}

pub(crate) fn photo_record(id: &str, server: &MockServer) -> PhotoRecord {
    PhotoRecord {
        id: id.to_string(),
        title: format!("photo {id}"),
        original_url: format!("{}/p/{id}_o.jpg", server.uri()),
    }
}

/// Resolve an album plus its photo listing from fixture data
pub(crate) async fn fixture_album(catalog: &MemoryCatalog, id: &str) -> Album {
    let id = AlbumId::new(id);
    let mut album = resolver::album_info(catalog, &id).await.unwrap();
    album.photos = resolver::album_photos(catalog, &id, Duration::ZERO)
        .await
        .unwrap();
    album
}
