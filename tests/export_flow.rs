//! End-to-end export flow over the in-memory catalog and a mock image host
//!
//! Exercises the public API only: build fixture data, run a full export,
//! then assert on the resulting directory layout and the catalog call log.

use flickr_dl::{
    AlbumRecord, Config, Error, Exporter, MemoryCatalog, NoOpTagger, PhotoInfoRecord, PhotoRecord,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use walkdir::WalkDir;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn image_host() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex("^/p/.+$"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"image-bytes".to_vec()))
        .mount(&server)
        .await;
    server
}

fn album(id: &str, created: i64, title: &str) -> AlbumRecord {
    AlbumRecord {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        created,
    }
}

fn photo(id: &str, host: &MockServer) -> PhotoRecord {
    PhotoRecord {
        id: id.to_string(),
        title: format!("photo {id}"),
        original_url: format!("{}/p/{id}_o.jpg", host.uri()),
    }
}

fn test_config(output_dir: &Path) -> Config {
    Config {
        output_dir: output_dir.to_path_buf(),
        page_delay: Duration::ZERO,
        download_delay: Duration::ZERO,
        ..Config::default()
    }
}

fn exporter(config: Config, catalog: &MemoryCatalog) -> Exporter {
    Exporter::new(config, Arc::new(catalog.clone()), Arc::new(NoOpTagger))
        .expect("valid config")
}

/// Sorted relative paths of every file under `root`
fn exported_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .expect("entry under root")
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    files.sort();
    files
}

#[tokio::test]
async fn test_full_export_layout() {
    let host = image_host().await;
    // Page size 2 forces the 5-photo album through 3 listing pages.
    let catalog = MemoryCatalog::builder(2)
        .album(
            album("a1", 1_546_300_800, "Road Trip"),
            (1..=5).map(|i| photo(&i.to_string(), &host)).collect(),
        )
        .album(album("a2", 1_577_836_800, "Winter"), vec![photo("6", &host)])
        .detail("1", PhotoInfoRecord::default())
        .detail("2", PhotoInfoRecord::default())
        .detail("3", PhotoInfoRecord::default())
        .detail("4", PhotoInfoRecord::default())
        .detail("5", PhotoInfoRecord::default())
        .detail("6", PhotoInfoRecord::default())
        .detail("8", PhotoInfoRecord::default())
        .detail("9", PhotoInfoRecord::default())
        .account_photo(photo("1", &host))
        .account_photo(photo("6", &host))
        .account_photo(photo("8", &host))
        .account_photo(photo("9", &host))
        .build();

    let out = tempfile::tempdir().expect("tempdir");
    let summary = exporter(test_config(out.path()), &catalog)
        .export_all()
        .await
        .expect("clean run");

    // Two album units plus two unattributed photo units
    assert_eq!(summary.succeeded, 4);
    assert!(summary.is_clean());

    assert_eq!(
        exported_files(out.path()),
        vec![
            "2019-01-01 Road Trip/1_o.jpg",
            "2019-01-01 Road Trip/2_o.jpg",
            "2019-01-01 Road Trip/3_o.jpg",
            "2019-01-01 Road Trip/4_o.jpg",
            "2019-01-01 Road Trip/5_o.jpg",
            "2020-01-01 Winter/6_o.jpg",
            "Unorganized Photos/8_o.jpg",
            "Unorganized Photos/9_o.jpg",
        ]
    );

    // The paginated album was drained in exactly 3 page requests
    let page_calls = catalog
        .calls()
        .iter()
        .filter(|c| c.starts_with("list_album_photos a1"))
        .count();
    assert_eq!(page_calls, 3);
}

#[tokio::test]
async fn test_second_run_resumes_without_refetching() {
    let host = image_host().await;
    let catalog = MemoryCatalog::builder(10)
        .album(
            album("a1", 1_546_300_800, "Trip"),
            vec![photo("1", &host), photo("2", &host)],
        )
        .detail("1", PhotoInfoRecord::default())
        .detail("2", PhotoInfoRecord::default())
        .detail("8", PhotoInfoRecord::default())
        .account_photo(photo("1", &host))
        .account_photo(photo("8", &host))
        .build();

    let out = tempfile::tempdir().expect("tempdir");
    let exporter = exporter(test_config(out.path()), &catalog);

    exporter.export_all().await.expect("first run clean");
    let detail_calls = |catalog: &MemoryCatalog| {
        catalog
            .calls()
            .iter()
            .filter(|c| c.starts_with("photo_info"))
            .count()
    };
    assert_eq!(detail_calls(&catalog), 3);

    // Every destination already exists, so the expensive detail call never
    // happens again; the run still reports each unit as succeeded.
    let summary = exporter.export_all().await.expect("second run clean");
    assert_eq!(detail_calls(&catalog), 3);
    assert_eq!(summary.succeeded, 2);
}

#[tokio::test]
async fn test_album_titles_are_sanitized_for_the_filesystem() {
    let host = image_host().await;
    let catalog = MemoryCatalog::builder(10)
        .album(
            album("a1", 1_546_300_800, "Trip: Spain/2019?"),
            vec![photo("1", &host)],
        )
        .detail("1", PhotoInfoRecord::default())
        .account_photo(photo("1", &host))
        .build();

    let out = tempfile::tempdir().expect("tempdir");
    exporter(test_config(out.path()), &catalog)
        .export_all()
        .await
        .expect("clean run");

    assert_eq!(
        exported_files(out.path()),
        vec!["2019-01-01 Trip- Spain-2019-/1_o.jpg"]
    );
}

#[tokio::test]
async fn test_failures_surface_in_the_run_summary() {
    let host = image_host().await;
    // Photo "7" has no detail fixture, so its export fails terminally.
    let catalog = MemoryCatalog::builder(10)
        .album(
            album("a1", 1_546_300_800, "Trip"),
            vec![photo("1", &host), photo("7", &host)],
        )
        .detail("1", PhotoInfoRecord::default())
        .account_photo(photo("1", &host))
        .build();

    let out = tempfile::tempdir().expect("tempdir");
    let err = exporter(test_config(out.path()), &catalog)
        .export_all()
        .await
        .expect_err("run is incomplete");

    let Error::Incomplete(summary) = err else {
        panic!("expected Error::Incomplete, got {err}");
    };
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].filename.as_deref(), Some("7_o.jpg"));
    // The sibling photo in the same album still landed on disk
    assert_eq!(
        exported_files(out.path()),
        vec!["2019-01-01 Trip/1_o.jpg"]
    );
}
