//! JSON-file task store.
//!
//! # Responsibility
//! - Persist the task collection as one JSON array file.
//! - Distinguish an absent file (empty collection) from a corrupt one.
//!
//! # Invariants
//! - Every record is validated on load and before save.
//! - `save` overwrites in place. There is no atomic-rename step: a crash
//!   mid-write can leave a truncated file behind, which the next load
//!   reports as corrupt.

use super::{StoreError, StoreResult, TaskStore};
use crate::model::task::Task;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-backed store holding a JSON array of task objects.
#[derive(Debug, Clone)]
pub struct JsonTaskStore {
    path: PathBuf,
}

impl JsonTaskStore {
    /// Creates a store over the given file path. The file itself is only
    /// touched by `load`/`save`, never here.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskStore for JsonTaskStore {
    fn load(&self) -> StoreResult<Vec<Task>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::io(&self.path, err)),
        };

        let tasks: Vec<Task> = serde_json::from_str(&raw)
            .map_err(|err| StoreError::corrupt(&self.path, err.to_string()))?;

        for task in &tasks {
            task.validate()
                .map_err(|err| StoreError::corrupt(&self.path, err.to_string()))?;
        }

        Ok(tasks)
    }

    fn save(&self, tasks: &[Task]) -> StoreResult<()> {
        for task in tasks {
            task.validate()?;
        }

        let json = serde_json::to_string_pretty(tasks)
            .map_err(|err| StoreError::corrupt(&self.path, err.to_string()))?;
        std::fs::write(&self.path, json).map_err(|err| StoreError::io(&self.path, err))?;

        Ok(())
    }
}
