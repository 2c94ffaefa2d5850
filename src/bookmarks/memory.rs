//! Process-memory bookmark list.

use tokio::sync::Mutex;

/// Bookmarks kept only in process memory; lost on restart.
#[derive(Debug, Default)]
pub struct MemoryBookmarks {
    entries: Mutex<Vec<String>>,
}

impl MemoryBookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self) -> Vec<String> {
        self.entries.lock().await.clone()
    }

    pub async fn add(&self, url: String) -> bool {
        insert_unique(&mut *self.entries.lock().await, url)
    }

    pub async fn remove(&self, url: &str) -> bool {
        remove_first(&mut *self.entries.lock().await, url)
    }
}

/// Appends `url` unless an equal entry is already present.
pub(crate) fn insert_unique(entries: &mut Vec<String>, url: String) -> bool {
    if entries.iter().any(|existing| *existing == url) {
        return false;
    }
    entries.push(url);
    true
}

/// Removes the first entry equal to `url`.
pub(crate) fn remove_first(entries: &mut Vec<String>, url: &str) -> bool {
    match entries.iter().position(|existing| existing == url) {
        Some(index) => {
            entries.remove(index);
            true
        }
        None => false,
    }
}
