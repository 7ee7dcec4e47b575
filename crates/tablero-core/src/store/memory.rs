//! In-memory store: same contract, no file. For tests and throwaway use.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::state::BoardState;
use super::{StoreConfig, TaskStore};
use crate::domain::{BoardError, Task, TaskId, TaskPatch};

/// Non-persistent [`TaskStore`] implementation. Everything lives and dies
/// with the instance; otherwise it behaves exactly like the file store.
#[derive(Debug)]
pub struct MemoryStore {
    config: StoreConfig,
    state: Mutex<BoardState>,
}

impl MemoryStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            state: Mutex::new(BoardState::from_tasks(Vec::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn get_all(&self) -> Result<Vec<Task>, BoardError> {
        Ok(self.state.lock().await.snapshot())
    }

    async fn add(&self, content: &str, state: Option<&str>) -> Result<Task, BoardError> {
        let content = self.config.validate_content(content)?;
        let state = match state {
            Some(s) => self.config.validate_state(s)?,
            None => self.config.default_state.clone(),
        };
        Ok(self.state.lock().await.add(content, state))
    }

    async fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Task, BoardError> {
        let patch = self.config.validate_patch(patch)?;
        let mut state = self.state.lock().await;
        if patch.is_empty() {
            return state.get(id).cloned().ok_or(BoardError::NotFound(id));
        }
        state.update(id, patch)
    }

    async fn delete(&self, id: TaskId) -> Result<(), BoardError> {
        self.state.lock().await.delete(id)
    }
}
