//! JSON-file bookmark list.

use std::path::{Path, PathBuf};

use log::info;
use tokio::sync::Mutex;

use super::memory::{insert_unique, remove_first};
use super::normalize::normalize;
use crate::error_handling::StoreError;
use crate::storage::{load_document, write_document};

/// Bookmarks persisted as a single JSON array.
///
/// The whole array is rewritten on every mutation while the lock is held, so
/// concurrent requests in this process cannot lose each other's updates. The
/// in-memory copy only changes after the write succeeded.
#[derive(Debug)]
pub struct FileBookmarks {
    path: PathBuf,
    entries: Mutex<Vec<String>>,
}

impl FileBookmarks {
    /// Loads the document at `path`, or starts empty if it does not exist.
    ///
    /// Entries written before normalization was enforced on write are
    /// canonicalized and deduplicated here, and the cleaned list is written back.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let stored: Vec<String> = load_document(&path).await?.unwrap_or_default();

        let mut entries = Vec::with_capacity(stored.len());
        for raw in &stored {
            insert_unique(&mut entries, normalize(raw));
        }

        if entries != stored {
            info!(
                "Canonicalized bookmark file {} ({} stored, {} after normalization)",
                path.display(),
                stored.len(),
                entries.len()
            );
            write_document(&path, &entries).await?;
        }

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn list(&self) -> Vec<String> {
        self.entries.lock().await.clone()
    }

    pub async fn add(&self, url: String) -> Result<bool, StoreError> {
        let mut entries = self.entries.lock().await;
        let mut next = entries.clone();
        if !insert_unique(&mut next, url) {
            return Ok(false);
        }
        write_document(&self.path, &next).await?;
        *entries = next;
        Ok(true)
    }

    pub async fn remove(&self, url: &str) -> Result<bool, StoreError> {
        let mut entries = self.entries.lock().await;
        let mut next = entries.clone();
        if !remove_first(&mut next, url) {
            return Ok(false);
        }
        write_document(&self.path, &next).await?;
        *entries = next;
        Ok(true)
    }
}
