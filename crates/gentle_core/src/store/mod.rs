//! Task store contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the load/save contract over the persisted task collection.
//! - Keep file-format details inside the persistence boundary.
//! - Serialize whole read-modify-write cycles through one shared owner.
//!
//! # Invariants
//! - The file is the single source of truth; no caller keeps a long-lived
//!   in-memory copy between operations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Write paths validate every record before touching the file.

use crate::model::task::{Task, TaskValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_store;
mod shared;

pub use json_store::JsonTaskStore;
pub use shared::{SharedStore, StoreGuard};

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence error for task collection load/save operations.
#[derive(Debug)]
pub enum StoreError {
    /// Tasks file cannot be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Tasks file exists but does not hold a valid task collection.
    Corrupt { path: PathBuf, detail: String },
    /// In-memory collection failed persisted-form validation before a write.
    Validation(TaskValidationError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.into(),
            detail: detail.into(),
        }
    }

    /// Returns whether this error reports corrupt persisted content.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot access tasks file `{}`: {source}", path.display())
            }
            Self::Corrupt { path, detail } => {
                write!(f, "tasks file `{}` is corrupt: {detail}", path.display())
            }
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Corrupt { .. } => None,
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Storage interface for the full task collection.
///
/// Both operations move the entire collection: there is no incremental
/// append and no partial update. `load` on an absent file yields an empty
/// collection, not an error.
pub trait TaskStore {
    fn load(&self) -> StoreResult<Vec<Task>>;
    fn save(&self, tasks: &[Task]) -> StoreResult<()>;
}
