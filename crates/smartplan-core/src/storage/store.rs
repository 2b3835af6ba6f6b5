//! JSON file persistence for tasks and completion history.
//!
//! The store holds the full task collection plus the recommendation
//! engine's history in one file (`tasks.json`), so recommendations
//! survive process restarts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::recommend::HistoryRecord;
use crate::task::Task;

/// On-disk shape of the store file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    history: Vec<HistoryRecord>,
}

/// File-backed task store.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    /// Store at the default location (`tasks.json` in the data dir).
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let path = super::data_dir()?.join("tasks.json");
        Ok(Self { path })
    }

    /// Store at an explicit path.
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load tasks and history. A missing file is an empty store.
    pub fn load(&self) -> Result<(Vec<Task>, Vec<HistoryRecord>), StoreError> {
        if !self.path.exists() {
            return Ok((Vec::new(), Vec::new()));
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|source| {
            StoreError::ReadFailed {
                path: self.path.clone(),
                source,
            }
        })?;

        let file: StoreFile =
            serde_json::from_str(&contents).map_err(|e| StoreError::Malformed {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        Ok((file.tasks, file.history))
    }

    /// Write tasks and history as pretty JSON.
    pub fn save(&self, tasks: &[Task], history: &[HistoryRecord]) -> Result<(), StoreError> {
        let file = StoreFile {
            tasks: tasks.to_vec(),
            history: history.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file).map_err(|e| StoreError::Malformed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        std::fs::write(&self.path, json).map_err(|source| StoreError::WriteFailed {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::at(dir.path().join("tasks.json"));
        let (tasks, history) = store.load().unwrap();
        assert!(tasks.is_empty());
        assert!(history.is_empty());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::at(dir.path().join("tasks.json"));

        let mut task = Task::new("Persisted");
        task.priority = Priority::High;
        task.tags = vec!["work".to_string()];
        let history = vec![HistoryRecord {
            priority: 3,
            duration: 30,
            energy: 2,
            tag_count: 1,
            actual_duration: 45,
        }];

        store.save(&[task.clone()], &history).unwrap();
        let (tasks, loaded_history) = store.load().unwrap();

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, task.id);
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(loaded_history.len(), 1);
        assert_eq!(loaded_history[0].actual_duration, 45);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, "not json {").unwrap();

        let store = TaskStore::at(&path);
        assert!(matches!(store.load(), Err(StoreError::Malformed { .. })));
    }
}
