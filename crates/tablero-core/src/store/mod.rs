//! Store module: TaskStore port, configuration and implementations.

mod file;
mod memory;
mod state;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use state::next_id;

use async_trait::async_trait;

use crate::domain::{BoardError, DEFAULT_STATE, StateVocabulary, Task, TaskId, TaskPatch};

/// Store configuration: the default lifecycle label and the vocabulary
/// mutations are validated against.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub default_state: String,
    pub vocabulary: StateVocabulary,
}

impl Default for StoreConfig {
    /// Closed vocabulary over the three known labels, "Por Hacer" default.
    fn default() -> Self {
        Self {
            default_state: DEFAULT_STATE.to_string(),
            vocabulary: StateVocabulary::default(),
        }
    }
}

impl StoreConfig {
    /// Accept any non-empty state label instead of the closed set.
    pub fn open_states() -> Self {
        Self {
            vocabulary: StateVocabulary::Open,
            ..Self::default()
        }
    }

    pub(crate) fn validate_content(&self, raw: &str) -> Result<String, BoardError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardError::Validation(
                "content must be a non-empty string".to_string(),
            ));
        }
        Ok(trimmed.to_string())
    }

    pub(crate) fn validate_state(&self, raw: &str) -> Result<String, BoardError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardError::Validation(
                "state must be a non-empty string".to_string(),
            ));
        }
        if !self.vocabulary.allows(trimmed) {
            return Err(BoardError::Validation(format!(
                "unknown state {trimmed:?}"
            )));
        }
        Ok(trimmed.to_string())
    }

    /// Validate every provided field of a patch up front, so a rejected
    /// call can never leave a task half-updated.
    pub(crate) fn validate_patch(&self, patch: TaskPatch) -> Result<TaskPatch, BoardError> {
        Ok(TaskPatch {
            content: patch
                .content
                .as_deref()
                .map(|c| self.validate_content(c))
                .transpose()?,
            state: patch
                .state
                .as_deref()
                .map(|s| self.validate_state(s))
                .transpose()?,
        })
    }
}

/// TaskStore is the port the front-end talks to.
///
/// Design intent:
/// - The store owns id assignment and field validation, so every
///   implementation upholds the same invariants.
/// - Validation happens before any mutation; a rejected call leaves the
///   collection untouched.
/// - Mutations persist before they return: no dirty state survives a call
///   boundary.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Full ordered sequence of tasks (insertion order). Never mutates.
    async fn get_all(&self) -> Result<Vec<Task>, BoardError>;

    /// Trim and validate `content`, assign a fresh id, append and persist.
    /// `state` falls back to the configured default when omitted.
    async fn add(&self, content: &str, state: Option<&str>) -> Result<Task, BoardError>;

    /// Apply the provided fields to the task with `id`, all-or-nothing.
    /// An empty patch is a no-op returning the task unchanged.
    async fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Task, BoardError>;

    /// Remove the task with `id` and persist the survivors.
    async fn delete(&self, id: TaskId) -> Result<(), BoardError>;
}
