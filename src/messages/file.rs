//! JSON-file message board.

use std::path::{Path, PathBuf};

use chrono::Utc;
use log::warn;
use tokio::sync::Mutex;

use super::memory::BoardState;
use super::types::{Message, SortOrder};
use crate::error_handling::StoreError;
use crate::storage::{load_document, write_document};

/// Board persisted as `{"next_id": n, "messages": [...]}`.
///
/// Mutations apply to a copy of the state, write it, and only then replace
/// the in-memory state, all under one lock.
#[derive(Debug)]
pub struct FileMessages {
    path: PathBuf,
    state: Mutex<BoardState>,
}

impl FileMessages {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let mut state: BoardState = load_document(&path).await?.unwrap_or_default();

        if state.repair_next_id() {
            warn!(
                "Message file {} had a stale next_id, advanced to {}",
                path.display(),
                state.next_id
            );
            write_document(&path, &state).await?;
        }

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn list(&self, order: SortOrder) -> Vec<Message> {
        self.state.lock().await.list(order)
    }

    pub async fn create(
        &self,
        content: String,
        parent_id: Option<i64>,
    ) -> Result<Message, StoreError> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        let message = next.create(content, parent_id, Utc::now())?;
        write_document(&self.path, &next).await?;
        *state = next;
        Ok(message)
    }

    pub async fn like(&self, id: i64) -> Result<Option<Message>, StoreError> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        let Some(message) = next.like(id) else {
            return Ok(None);
        };
        write_document(&self.path, &next).await?;
        *state = next;
        Ok(Some(message))
    }

    pub async fn delete(&self, id: i64) -> Result<Option<usize>, StoreError> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        let Some(removed) = next.delete(id) else {
            return Ok(None);
        };
        write_document(&self.path, &next).await?;
        *state = next;
        Ok(Some(removed))
    }
}
