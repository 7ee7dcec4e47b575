//! File-backed store: a JSON array on disk, written atomically.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, error};

use super::state::BoardState;
use super::{StoreConfig, TaskStore};
use crate::domain::{BoardError, Task, TaskId, TaskPatch};

/// The authoritative store: a pretty-printed JSON array of tasks in a
/// single file, rewritten in full on every mutation.
///
/// Design intent:
/// - Every write goes to a sibling temp file first and is renamed over the
///   real path, so a crash mid-write never leaves a truncated or mixed file.
/// - A mutation is applied to a scratch copy, persisted, and only then
///   committed to memory. A failed write leaves both views at the old state.
/// - Single-writer: one process, one store instance. The mutex serializes
///   load-mutate-save sequences against concurrent callers in this process;
///   cross-process races are an accepted limitation of a local tool.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    config: StoreConfig,
    state: Mutex<BoardState>,
}

impl JsonFileStore {
    /// Open the store at `path`.
    ///
    /// An absent file is an empty board. A file that exists but does not
    /// parse is surfaced as [`BoardError::StorageCorrupt`] rather than
    /// silently discarded.
    pub async fn open(path: impl Into<PathBuf>, config: StoreConfig) -> Result<Self, BoardError> {
        let path = path.into();
        let tasks = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Vec<Task>>(&bytes).map_err(|source| {
                error!(path = %path.display(), %source, "task file is corrupt");
                BoardError::StorageCorrupt {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(source) => return Err(BoardError::StorageRead { path, source }),
        };

        debug!(path = %path.display(), count = tasks.len(), "opened task file");
        Ok(Self {
            path,
            config,
            state: Mutex::new(BoardState::from_tasks(tasks)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the file contents with `tasks`, atomically.
    async fn persist(&self, tasks: &[Task]) -> Result<(), BoardError> {
        let write_err = |source: io::Error| {
            error!(path = %self.path.display(), %source, "failed to persist tasks");
            BoardError::StorageWrite {
                path: self.path.clone(),
                source,
            }
        };

        let bytes = serde_json::to_vec_pretty(tasks).map_err(|e| write_err(io::Error::other(e)))?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes).await.map_err(write_err)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(write_err)?;

        debug!(path = %self.path.display(), count = tasks.len(), "persisted tasks");
        Ok(())
    }
}

#[async_trait]
impl TaskStore for JsonFileStore {
    async fn get_all(&self) -> Result<Vec<Task>, BoardError> {
        Ok(self.state.lock().await.snapshot())
    }

    async fn add(&self, content: &str, state: Option<&str>) -> Result<Task, BoardError> {
        let content = self.config.validate_content(content)?;
        let state = match state {
            Some(s) => self.config.validate_state(s)?,
            None => self.config.default_state.clone(),
        };

        // 重要: load-mutate-save を直列化するため、persist の await 中も
        // ロックを保持する。
        let mut guard = self.state.lock().await;
        let mut next = guard.clone();
        let task = next.add(content, state);
        self.persist(next.tasks()).await?;
        *guard = next;
        Ok(task)
    }

    async fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Task, BoardError> {
        let patch = self.config.validate_patch(patch)?;

        let mut guard = self.state.lock().await;
        if patch.is_empty() {
            // No recognized fields: a no-op, not an error.
            return guard.get(id).cloned().ok_or(BoardError::NotFound(id));
        }

        let mut next = guard.clone();
        let task = next.update(id, patch)?;
        self.persist(next.tasks()).await?;
        *guard = next;
        Ok(task)
    }

    async fn delete(&self, id: TaskId) -> Result<(), BoardError> {
        let mut guard = self.state.lock().await;
        let mut next = guard.clone();
        next.delete(id)?;
        self.persist(next.tasks()).await?;
        *guard = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn open_default(dir: &TempDir) -> JsonFileStore {
        JsonFileStore::open(dir.path().join("tasks.json"), StoreConfig::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn absent_file_opens_as_empty_board() {
        let dir = TempDir::new().unwrap();
        let store = open_default(&dir).await;
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_assigns_sequential_ids_and_default_state() {
        let dir = TempDir::new().unwrap();
        let store = open_default(&dir).await;

        let milk = store.add("Buy milk", None).await.unwrap();
        assert_eq!(milk.id, TaskId::new(1));
        assert_eq!(milk.content, "Buy milk");
        assert_eq!(milk.state, "Por Hacer");

        let dog = store.add("Walk dog", None).await.unwrap();
        assert_eq!(dog.id, TaskId::new(2));

        store.delete(TaskId::new(1)).await.unwrap();
        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, TaskId::new(2));
        assert_eq!(all[0].content, "Walk dog");
        assert_eq!(all[0].state, "Por Hacer");
    }

    #[tokio::test]
    async fn update_state_keeps_content() {
        let dir = TempDir::new().unwrap();
        let store = open_default(&dir).await;
        store.add("Buy milk", None).await.unwrap();
        store.add("Walk dog", None).await.unwrap();

        let updated = store
            .update(TaskId::new(2), TaskPatch::state("Hecho"))
            .await
            .unwrap();

        assert_eq!(updated.id, TaskId::new(2));
        assert_eq!(updated.content, "Walk dog");
        assert_eq!(updated.state, "Hecho");
    }

    #[tokio::test]
    async fn add_trims_content_and_rejects_blank() {
        let dir = TempDir::new().unwrap();
        let store = open_default(&dir).await;

        let task = store.add("  Buy milk  ", None).await.unwrap();
        assert_eq!(task.content, "Buy milk");

        let err = store.add("   ", None).await.unwrap_err();
        assert!(matches!(err, BoardError::Validation(_)));
        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_patch_mutates_nothing() {
        let dir = TempDir::new().unwrap();
        let store = open_default(&dir).await;
        store.add("Walk dog", None).await.unwrap();

        let patch = TaskPatch {
            content: Some("New text".to_string()),
            state: Some("Archivado".to_string()),
        };
        let err = store.update(TaskId::new(1), patch).await.unwrap_err();
        assert!(matches!(err, BoardError::Validation(_)));

        let all = store.get_all().await.unwrap();
        assert_eq!(all[0].content, "Walk dog");
        assert_eq!(all[0].state, "Por Hacer");
    }

    #[tokio::test]
    async fn empty_patch_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let store = open_default(&dir).await;
        let added = store.add("Walk dog", None).await.unwrap();

        let same = store
            .update(added.id, TaskPatch::default())
            .await
            .unwrap();
        assert_eq!(same, added);
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = open_default(&dir).await;

        let err = store
            .update(TaskId::new(42), TaskPatch::state("Hecho"))
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_of_unknown_id_leaves_collection_unchanged() {
        let dir = TempDir::new().unwrap();
        let store = open_default(&dir).await;
        store.add("Buy milk", None).await.unwrap();

        let err = store.delete(TaskId::new(42)).await.unwrap_err();
        assert!(matches!(err, BoardError::NotFound(_)));
        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn reopen_round_trips_tasks_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");

        let store = JsonFileStore::open(&path, StoreConfig::default())
            .await
            .unwrap();
        store.add("a", None).await.unwrap();
        store.add("b", Some("En Progreso")).await.unwrap();
        store.add("c", Some("Hecho")).await.unwrap();
        let before = store.get_all().await.unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path, StoreConfig::default())
            .await
            .unwrap();
        assert_eq!(reopened.get_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn corrupt_file_surfaces_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let err = JsonFileStore::open(&path, StoreConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::StorageCorrupt { .. }));
    }

    #[tokio::test]
    async fn deleted_max_id_is_not_reused_within_one_lifetime() {
        let dir = TempDir::new().unwrap();
        let store = open_default(&dir).await;
        store.add("a", None).await.unwrap();
        store.add("b", None).await.unwrap();
        store.delete(TaskId::new(2)).await.unwrap();

        let fresh = store.add("c", None).await.unwrap();
        assert_eq!(fresh.id, TaskId::new(3));
    }

    #[tokio::test]
    async fn reopen_recomputes_next_id_from_surviving_max() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");

        let store = JsonFileStore::open(&path, StoreConfig::default())
            .await
            .unwrap();
        store.add("a", None).await.unwrap();
        store.add("b", None).await.unwrap();
        store.delete(TaskId::new(2)).await.unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path, StoreConfig::default())
            .await
            .unwrap();
        let fresh = reopened.add("c", None).await.unwrap();
        assert_eq!(fresh.id, TaskId::new(2));
    }

    #[tokio::test]
    async fn failed_write_leaves_both_views_at_the_old_state() {
        let dir = TempDir::new().unwrap();
        let board_dir = dir.path().join("board");
        tokio::fs::create_dir(&board_dir).await.unwrap();
        let store = JsonFileStore::open(board_dir.join("tasks.json"), StoreConfig::default())
            .await
            .unwrap();
        let added = store.add("Buy milk", None).await.unwrap();

        // Yank the directory out from under the store so the next
        // temp-file write fails.
        tokio::fs::remove_dir_all(&board_dir).await.unwrap();

        let err = store
            .update(added.id, TaskPatch::state("Hecho"))
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::StorageWrite { .. }));

        // The rejected mutation is visible nowhere: the snapshot is still
        // the pre-mutation one.
        assert_eq!(store.get_all().await.unwrap(), vec![added]);
    }

    #[tokio::test]
    async fn open_states_store_accepts_free_form_labels() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("tasks.json"), StoreConfig::open_states())
            .await
            .unwrap();

        let task = store.add("a", Some("Archivado")).await.unwrap();
        assert_eq!(task.state, "Archivado");
    }

    #[tokio::test]
    async fn no_temp_file_survives_a_successful_write() {
        let dir = TempDir::new().unwrap();
        let store = open_default(&dir).await;
        store.add("a", None).await.unwrap();

        assert!(dir.path().join("tasks.json").exists());
        assert!(!dir.path().join("tasks.tmp").exists());
    }

    #[tokio::test]
    async fn disk_format_is_a_plain_json_array() {
        let dir = TempDir::new().unwrap();
        let store = open_default(&dir).await;
        store.add("Buy milk", None).await.unwrap();

        let bytes = tokio::fs::read(store.path()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{"id": 1, "content": "Buy milk", "state": "Por Hacer"}])
        );
    }
}
