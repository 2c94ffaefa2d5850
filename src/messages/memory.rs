//! In-memory board state, also the document shape of the file backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::types::{Message, SortOrder};
use crate::error_handling::StoreError;

/// All messages plus the next id to hand out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub next_id: i64,
    pub messages: Vec<Message>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            next_id: 1,
            messages: Vec::new(),
        }
    }
}

impl BoardState {
    /// Moves `next_id` past every stored id. Returns whether it changed.
    pub fn repair_next_id(&mut self) -> bool {
        let floor = self.messages.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        if self.next_id < floor {
            self.next_id = floor;
            return true;
        }
        false
    }

    pub fn list(&self, order: SortOrder) -> Vec<Message> {
        let mut messages = self.messages.clone();
        order.apply(&mut messages);
        messages
    }

    pub fn create(
        &mut self,
        content: String,
        parent_id: Option<i64>,
        created_at: DateTime<Utc>,
    ) -> Result<Message, StoreError> {
        if let Some(parent) = parent_id {
            if !self.messages.iter().any(|m| m.id == parent) {
                return Err(StoreError::ParentNotFound(parent));
            }
        }

        let message = Message {
            id: self.next_id,
            content,
            parent_id,
            likes: 0,
            created_at,
        };
        self.next_id += 1;
        self.messages.push(message.clone());
        Ok(message)
    }

    pub fn like(&mut self, id: i64) -> Option<Message> {
        let message = self.messages.iter_mut().find(|m| m.id == id)?;
        message.likes += 1;
        Some(message.clone())
    }

    /// Removes `id` and its direct replies; `None` if `id` does not exist.
    pub fn delete(&mut self, id: i64) -> Option<usize> {
        if !self.messages.iter().any(|m| m.id == id) {
            return None;
        }
        let before = self.messages.len();
        self.messages
            .retain(|m| m.id != id && m.parent_id != Some(id));
        Some(before - self.messages.len())
    }
}

/// Board kept only in process memory.
#[derive(Debug, Default)]
pub struct MemoryMessages {
    state: Mutex<BoardState>,
}

impl MemoryMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self, order: SortOrder) -> Vec<Message> {
        self.state.lock().await.list(order)
    }

    pub async fn create(
        &self,
        content: String,
        parent_id: Option<i64>,
    ) -> Result<Message, StoreError> {
        self.state
            .lock()
            .await
            .create(content, parent_id, Utc::now())
    }

    pub async fn like(&self, id: i64) -> Option<Message> {
        self.state.lock().await.like(id)
    }

    pub async fn delete(&self, id: i64) -> Option<usize> {
        self.state.lock().await.delete(id)
    }
}
