//! Utility functions for naming and path derivation

use crate::types::Album;
use url::Url;

/// Characters that are replaced when a title becomes a directory name
const RESERVED: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Sanitize a title for use as a path segment
///
/// Replaces each of `/ \ : * ? " < > |` with `-` and leaves every other
/// character, including non-ASCII, untouched. Idempotent.
///
/// # Examples
///
/// ```
/// use flickr_dl::utils::sanitize_title;
///
/// assert_eq!(sanitize_title("Trip: Paris/2019?"), "Trip- Paris-2019-");
/// assert_eq!(sanitize_title("São Paulo"), "São Paulo");
/// ```
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| if RESERVED.contains(&c) { '-' } else { c })
        .collect()
}

/// Directory name for an album: `"<YYYY-MM-DD> <sanitized title>"`
///
/// A pure function of the creation timestamp and title, so re-running an
/// export with unchanged source data always maps to the same directory.
pub fn album_dir_name(album: &Album) -> String {
    format!(
        "{} {}",
        album.created.format("%Y-%m-%d"),
        sanitize_title(&album.title)
    )
}

/// Derive the local filename from a source URL: its final path segment
///
/// Returns `None` for an empty or unparsable URL, or one with no usable path
/// segment; such photos cannot be downloaded and are excluded from listings.
///
/// # Examples
///
/// ```
/// use flickr_dl::utils::filename_from_url;
///
/// assert_eq!(
///     filename_from_url("https://live.example.com/65535/123_abc_o.jpg"),
///     Some("123_abc_o.jpg".to_string())
/// );
/// assert_eq!(filename_from_url(""), None);
/// ```
pub fn filename_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let name = parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .next_back()?
        .to_string();
    if name.is_empty() { None } else { Some(name) }
}
