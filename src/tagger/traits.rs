//! Traits and types for metadata tagging

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Descriptive fields to embed into a file
///
/// Only populated fields are written; an unset field never overwrites
/// whatever the file already carries. Implementations preserve all
/// pre-existing fields they are not asked to write.
#[derive(Clone, Debug, Default)]
pub struct TagSet {
    /// Title, written to the object-name field
    pub object_name: Option<String>,
    /// Description, written to the caption field
    pub caption: Option<String>,
    /// Tags, written to the keywords field and a parallel subject field
    /// for cross-tool compatibility
    pub keywords: Vec<String>,
}

impl TagSet {
    /// True if there is nothing to write
    pub fn is_empty(&self) -> bool {
        self.object_name.is_none() && self.caption.is_none() && self.keywords.is_empty()
    }
}

/// Trait for writing embedded metadata
///
/// Sessions are held behind shared references inside spawned worker tasks,
/// so implementations must be `Sync` as well as `Send`.
#[async_trait]
pub trait MetadataTagger: Send + Sync {
    /// Write the given fields into the file at `path`, in place
    ///
    /// # Errors
    ///
    /// Returns an error if the tool cannot be executed or reports a
    /// field-level write failure. A tagging failure is fatal for the photo
    /// being exported: the caller deletes the just-downloaded file so a
    /// future resume does not mistake the untagged artifact for complete.
    async fn write_tags(&self, path: &Path, tags: &TagSet) -> Result<()>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

/// Factory for per-worker tagger sessions
pub trait TaggerConnector: Send + Sync {
    /// Open a fresh tagger session
    fn session(&self) -> Result<Box<dyn MetadataTagger>>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_set_is_empty() {
        assert!(TagSet::default().is_empty());
        assert!(!TagSet {
            object_name: Some("Sunset".to_string()),
            ..TagSet::default()
        }
        .is_empty());
        assert!(!TagSet {
            keywords: vec!["beach".to_string()],
            ..TagSet::default()
        }
        .is_empty());
    }
}
