//! Task: the sole entity of the board.

use serde::{Deserialize, Serialize};

use super::TaskId;

/// A unit of work with an id, free-text content and a lifecycle state.
///
/// Invariants (upheld by the store, not by this struct):
/// - `id` is unique and immutable once assigned.
/// - `content` is never empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub content: String,
    /// Missing on disk in old files; defaults to "Por Hacer" on load.
    #[serde(default = "super::state::default_state")]
    pub state: String,
}

/// Partial update for a [`Task`]. `None` leaves the field untouched;
/// the id itself can never be patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub content: Option<String>,
    pub state: Option<String>,
}

impl TaskPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn state(state: impl Into<String>) -> Self {
        Self {
            state: Some(state.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.state.is_none()
    }
}
