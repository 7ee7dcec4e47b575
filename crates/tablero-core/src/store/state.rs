//! Board state: single source of truth for the collection and id assignment.

use crate::domain::{BoardError, Task, TaskId, TaskPatch};

/// Id a fresh task would get: `1 + max(existing ids)`, or `1` for an empty
/// board. O(n) scan; fine for a personal board.
pub fn next_id(tasks: &[Task]) -> TaskId {
    let max = tasks.iter().map(|t| t.id.as_u64()).max().unwrap_or(0);
    TaskId::new(max + 1)
}

/// In-memory collection plus a monotonic id counter.
///
/// Design:
/// - The counter is seeded from the loaded tasks via [`next_id`] and only
///   ever grows, so an id is never handed out twice within one loaded
///   lifetime, even after deleting the task that held the maximum.
/// - Inputs must already be validated; this type only applies mutations.
#[derive(Debug, Clone)]
pub(crate) struct BoardState {
    tasks: Vec<Task>,
    next_id: u64,
}

impl BoardState {
    pub(crate) fn from_tasks(tasks: Vec<Task>) -> Self {
        let next_id = next_id(&tasks).as_u64();
        Self { tasks, next_id }
    }

    pub(crate) fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub(crate) fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub(crate) fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn allocate_id(&mut self) -> TaskId {
        let id = TaskId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a new task and return it.
    pub(crate) fn add(&mut self, content: String, state: String) -> Task {
        let task = Task {
            id: self.allocate_id(),
            content,
            state,
        };
        self.tasks.push(task.clone());
        task
    }

    /// Apply an already-validated patch. The id itself is immutable.
    pub(crate) fn update(&mut self, id: TaskId, patch: TaskPatch) -> Result<Task, BoardError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(BoardError::NotFound(id))?;
        if let Some(content) = patch.content {
            task.content = content;
        }
        if let Some(state) = patch.state {
            task.state = state;
        }
        Ok(task.clone())
    }

    pub(crate) fn delete(&mut self, id: TaskId) -> Result<(), BoardError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Err(BoardError::NotFound(id));
        }
        Ok(())
    }
}
