//! File-resource lookup behind a trait seam.
//!
//! Handlers never touch the filesystem directly; they go through a
//! [`ResourceStore`] so tests can substitute an in-memory store and
//! observe exactly which lookups happen.

use std::{future::Future, path::PathBuf};

/// Source of static resources, addressed by the request path.
pub trait ResourceStore
where
    Self: Sync + Send + 'static,
{
    /// Returns the complete content of the resource at `path`, or
    /// `None` if no such resource exists.
    fn fetch(&self, path: &str) -> impl Future<Output = Option<Vec<u8>>> + Send;
}

/// Disk-backed store: resources are regular files.
///
/// A path is looked up under the serving root first and, failing that,
/// relative to the working directory. Paths are used verbatim; there is
/// no decoding and no index-file substitution.
#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DiskStore { root: root.into() }
    }
}

impl ResourceStore for DiskStore {
    async fn fetch(&self, path: &str) -> Option<Vec<u8>> {
        if path.is_empty() {
            return None;
        }

        if let Ok(content) = tokio::fs::read(self.root.join(path)).await {
            return Some(content);
        }

        tokio::fs::read(path).await.ok()
    }
}
