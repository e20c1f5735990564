//! Cross-worker seen-filename registry

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Set of filenames claimed by albums during the current run
///
/// Shared by every worker of both phases; an album's filenames are claimed
/// *before* its downloads are attempted, so a crash mid-download still keeps
/// the name out of the unattributed phase. The registry lives for one run
/// only; cross-run resume relies solely on destination-path existence.
///
/// Because names are claimed per-album ahead of that album's downloads, a
/// filename legitimately appearing in two albums is assigned to whichever
/// worker claims it first; that interleaving-dependence is inherent to the
/// design.
#[derive(Clone, Default)]
pub struct SeenFilenames {
    inner: Arc<Mutex<HashSet<String>>>,
}

impl SeenFilenames {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a batch of filenames under one lock acquisition
    pub fn claim_all<'a>(&self, names: impl IntoIterator<Item = &'a str>) {
        let mut set = self.lock();
        for name in names {
            set.insert(name.to_string());
        }
    }

    /// True if the filename was claimed by any album this run
    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains(name)
    }

    /// Number of claimed filenames
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if nothing has been claimed
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        // A poisoned lock only means a worker panicked mid-insert; the set
        // itself is still usable.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_and_lookup() {
        let seen = SeenFilenames::new();
        assert!(seen.is_empty());

        seen.claim_all(["a.jpg", "b.jpg"]);
        assert!(seen.contains("a.jpg"));
        assert!(!seen.contains("c.jpg"));
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_clones_share_state() {
        let seen = SeenFilenames::new();
        let clone = seen.clone();
        seen.claim_all(["x.jpg"]);
        assert!(clone.contains("x.jpg"));
    }

    #[tokio::test]
    async fn test_concurrent_claims() {
        let seen = SeenFilenames::new();
        let mut handles = Vec::new();
        for worker in 0..4 {
            let seen = seen.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..50 {
                    seen.claim_all([format!("w{worker}_{i}.jpg").as_str()]);
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(seen.len(), 200);
    }
}
