//! Task domain model.
//!
//! # Responsibility
//! - Define the single persisted entity: a named reminder with a fire time.
//! - Provide validation for the canonical persisted form.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `time` always holds a canonical zero-padded 24-hour `"HH:MM"` string;
//!   the 12-hour input form never reaches this type.
//! - `name` is non-blank user text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static CANONICAL_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[01][0-9]|2[0-3]):[0-5][0-9]$").expect("valid time regex"));

/// Stable identifier for one task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// Selection in the presentation layer resolves to a `TaskId` before any
/// store mutation, so concurrent list changes cannot redirect an edit or
/// delete to the wrong record.
pub type TaskId = Uuid;

/// Validation error for the persisted task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// `name` is empty or whitespace-only.
    EmptyName,
    /// `time` is not the canonical 24-hour `"HH:MM"` form.
    NonCanonicalTime(String),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "task name must not be empty"),
            Self::NonCanonicalTime(value) => {
                write!(f, "task time `{value}` is not a canonical HH:MM string")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// One persisted reminder: fires once when the wall clock reaches `time`,
/// then is deleted. No recurrence, no history.
///
/// Serialized as `{"id": ..., "name": ..., "time": ...}`. Files written by
/// older builds lack the `id` member; such records are accepted and receive
/// a freshly generated id, which becomes stable on the next save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable opaque id, generated at creation time.
    #[serde(default = "Uuid::new_v4")]
    pub id: TaskId,
    /// User-supplied display name. No uniqueness constraint.
    pub name: String,
    /// Canonical 24-hour `"HH:MM"` fire time.
    pub time: String,
}

impl Task {
    /// Creates a task with a generated stable id.
    ///
    /// `time` must already be canonical; callers convert 12-hour input via
    /// [`crate::clock::parse_12h`] first.
    pub fn new(name: impl Into<String>, time: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name, time)
    }

    /// Creates a task with a caller-provided id.
    ///
    /// Used by tests and upgrade paths where identity already exists.
    pub fn with_id(id: TaskId, name: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            time: time.into(),
        }
    }

    /// Checks the persisted-form invariants.
    ///
    /// # Errors
    /// - [`TaskValidationError::EmptyName`] for blank names.
    /// - [`TaskValidationError::NonCanonicalTime`] when `time` is anything
    ///   but zero-padded 24-hour `"HH:MM"` (a 12-hour string persisted by
    ///   mistake must fail here, not fire at a wrong minute).
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.name.trim().is_empty() {
            return Err(TaskValidationError::EmptyName);
        }
        if !CANONICAL_TIME_RE.is_match(&self.time) {
            return Err(TaskValidationError::NonCanonicalTime(self.time.clone()));
        }
        Ok(())
    }

    /// Returns whether this task fires at the given wall-clock minute.
    ///
    /// Exact string equality on the canonical form; no interval containment.
    pub fn is_due_at(&self, minute: &str) -> bool {
        self.time == minute
    }
}
