//! Stub tagger for graceful degradation

use super::traits::{MetadataTagger, TagSet, TaggerConnector};
use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Tagger that accepts every write without touching any file
///
/// Useful when exiftool is unavailable and an export without embedded
/// metadata is preferable to no export at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpTagger;

#[async_trait]
impl MetadataTagger for NoOpTagger {
    async fn write_tags(&self, path: &Path, tags: &TagSet) -> Result<()> {
        tracing::debug!(
            path = %path.display(),
            keywords = tags.keywords.len(),
            "No-op tagger skipping metadata write"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}

impl TaggerConnector for NoOpTagger {
    fn session(&self) -> Result<Box<dyn MetadataTagger>> {
        Ok(Box::new(NoOpTagger))
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}
