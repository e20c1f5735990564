//! CLI-based tagger using the external exiftool binary

use super::traits::{MetadataTagger, TagSet, TaggerConnector};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Metadata tagger backed by the external `exiftool` binary
///
/// Writes IPTC ObjectName, IPTC Caption-Abstract, IPTC Keywords and a
/// parallel XMP Subject, with `-overwrite_original` so every field not named
/// is preserved.
///
/// # Examples
///
/// ```no_run
/// use flickr_dl::tagger::{ExifTool, MetadataTagger, TagSet};
/// use std::path::Path;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let tagger = ExifTool::from_path().expect("exiftool not found in PATH");
///
/// let tags = TagSet {
///     object_name: Some("Sunset".to_string()),
///     caption: None,
///     keywords: vec!["beach".to_string()],
/// };
/// tagger.write_tags(Path::new("photo.jpg"), &tags).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ExifTool {
    binary_path: PathBuf,
}

impl ExifTool {
    /// Create a tagger with an explicit binary path
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path }
    }

    /// Attempt to find exiftool in PATH
    ///
    /// Returns `Some(ExifTool)` if the binary is found, `None` otherwise.
    pub fn from_path() -> Option<Self> {
        which::which("exiftool").ok().map(Self::new)
    }
}

#[async_trait]
impl MetadataTagger for ExifTool {
    async fn write_tags(&self, path: &Path, tags: &TagSet) -> Result<()> {
        // exiftool rejects an invocation with no tag assignments, so a fully
        // empty set is a completed write with nothing to do.
        if tags.is_empty() {
            return Ok(());
        }

        let mut command = Command::new(&self.binary_path);
        command.arg("-overwrite_original");

        if let Some(object_name) = &tags.object_name {
            command.arg(format!("-IPTC:ObjectName={object_name}"));
        }
        if let Some(caption) = &tags.caption {
            command.arg(format!("-IPTC:Caption-Abstract={caption}"));
        }
        for keyword in &tags.keywords {
            command.arg(format!("-IPTC:Keywords={keyword}"));
            command.arg(format!("-XMP:Subject={keyword}"));
        }
        command.arg(path);

        let output = command
            .output()
            .await
            .map_err(|e| Error::ExternalTool(format!("failed to execute exiftool: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Tagging {
                path: path.to_path_buf(),
                message: stderr.trim().to_string(),
            });
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "exiftool"
    }
}

impl TaggerConnector for ExifTool {
    fn session(&self) -> Result<Box<dyn MetadataTagger>> {
        Ok(Box::new(self.clone()))
    }

    fn name(&self) -> &'static str {
        "exiftool"
    }
}
