//! Editor surface: listing, creation, editing and deletion of tasks.
//!
//! # Responsibility
//! - Hold the visible snapshot a UI lists rows from, plus the current
//!   row selection.
//! - Route submissions through an explicit [`EditorMode`] instead of
//!   rebinding the submit action per flow.
//! - Resolve every mutation against a fresh store read by stable task
//!   id, so a stale snapshot can never touch the wrong record.
//!
//! # Invariants
//! - `selection` indexes into `visible`; both are replaced together by
//!   [`TaskEditor::refresh`].
//! - Input checks run before any store cycle. A rejected submission
//!   leaves the store byte-identical.
//! - A failed edit submission keeps the editor in `Edit` mode; only a
//!   successful one (or [`TaskEditor::cancel_edit`]) returns to `Create`.
//! - Deleting the task a pending edit targets is allowed; the later
//!   submission then fails with [`EditorError::SelectionVanished`].

use crate::clock::{self, TimeParseError};
use crate::model::task::{Task, TaskId};
use crate::store::{SharedStore, StoreError, TaskStore};
use log::debug;
use std::error::Error;
use std::fmt;

/// Shorthand result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// What the next submission will do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    /// Submission appends a new task.
    Create,
    /// Submission rewrites the task with this id in place.
    Edit { target: TaskId },
}

/// Field values handed back to the UI when an edit begins.
///
/// `time` is the stored canonical `HH:MM` string verbatim. It does not
/// re-parse as twelve-hour input, so a user keeping the prefill
/// unchanged gets [`EditorError::InvalidTime`] on submit and must retype
/// the time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefill {
    pub name: String,
    pub time: String,
}

/// Errors surfaced by editor operations.
#[derive(Debug)]
pub enum EditorError {
    /// A required input field was blank.
    MissingInput,
    /// The time input did not parse as `HH:MM AM/PM`.
    InvalidTime(TimeParseError),
    /// An operation needing a selected row ran with none selected.
    NoSelection,
    /// The selected row index does not exist in the visible snapshot.
    IndexOutOfRange { index: usize, len: usize },
    /// The selected task was removed from the store after it was picked,
    /// typically by the reminder loop firing it.
    SelectionVanished(TaskId),
    /// The underlying store failed.
    Store(StoreError),
}

impl EditorError {
    /// Stable label for log lines. Labels never carry user input.
    pub fn label(&self) -> &'static str {
        match self {
            EditorError::MissingInput => "missing_input",
            EditorError::InvalidTime(_) => "invalid_time",
            EditorError::NoSelection => "no_selection",
            EditorError::IndexOutOfRange { .. } => "index_out_of_range",
            EditorError::SelectionVanished(_) => "selection_vanished",
            EditorError::Store(_) => "store",
        }
    }
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::MissingInput => {
                write!(f, "task name and time are both required")
            }
            EditorError::InvalidTime(err) => write!(f, "{err}"),
            EditorError::NoSelection => write!(f, "no task selected"),
            EditorError::IndexOutOfRange { index, len } => {
                write!(f, "selection {index} out of range for {len} task(s)")
            }
            EditorError::SelectionVanished(id) => {
                write!(f, "selected task {id} no longer exists")
            }
            EditorError::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EditorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EditorError::InvalidTime(err) => Some(err),
            EditorError::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TimeParseError> for EditorError {
    fn from(err: TimeParseError) -> Self {
        EditorError::InvalidTime(err)
    }
}

impl From<StoreError> for EditorError {
    fn from(err: StoreError) -> Self {
        EditorError::Store(err)
    }
}

/// Stateful editor over a shared task store.
pub struct TaskEditor<S: TaskStore> {
    store: SharedStore<S>,
    visible: Vec<Task>,
    selection: Option<usize>,
    mode: EditorMode,
}

impl<S: TaskStore> TaskEditor<S> {
    /// Creates an editor in `Create` mode with an empty snapshot. Call
    /// [`TaskEditor::refresh`] to populate the listing.
    pub fn new(store: SharedStore<S>) -> Self {
        TaskEditor {
            store,
            visible: Vec::new(),
            selection: None,
            mode: EditorMode::Create,
        }
    }

    /// The rows a UI should currently list, in stored order.
    pub fn visible(&self) -> &[Task] {
        &self.visible
    }

    /// The currently selected row, if any.
    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// What the next submission will do.
    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    /// Records the row the user picked. The index is validated against
    /// the snapshot only when a mutation uses it, so selecting a row
    /// that later scrolls away is harmless until then.
    pub fn select(&mut self, index: usize) {
        self.selection = Some(index);
    }

    /// Drops the current row selection.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Replaces the snapshot with a fresh store read and clears the
    /// selection. The pending mode is left alone.
    pub fn refresh(&mut self) -> EditorResult<()> {
        self.visible = self.store.load()?;
        self.selection = None;
        Ok(())
    }

    /// Submits the two input fields according to the current mode.
    ///
    /// In `Create` mode a blank field is rejected before the time is
    /// parsed. In `Edit` mode the time is parsed first, so a blank time
    /// surfaces as [`EditorError::InvalidTime`] rather than
    /// [`EditorError::MissingInput`].
    pub fn submit(&mut self, name: &str, time_12h: &str) -> EditorResult<()> {
        let (event, result) = match self.mode.clone() {
            EditorMode::Create => ("task_add", self.submit_create(name, time_12h)),
            EditorMode::Edit { target } => {
                ("task_edit", self.submit_edit(target, name, time_12h))
            }
        };
        if let Err(err) = &result {
            debug!(
                "event={event} module=editor status=error reason={}",
                err.label()
            );
        }
        result
    }

    fn submit_create(&mut self, name: &str, time_12h: &str) -> EditorResult<()> {
        if name.trim().is_empty() || time_12h.is_empty() {
            return Err(EditorError::MissingInput);
        }
        let canonical = clock::parse_12h(time_12h)?;
        let task = Task::new(name, canonical);
        let id = task.id;
        {
            let guard = self.store.lock();
            let mut tasks = guard.load()?;
            tasks.push(task);
            guard.save(&tasks)?;
        }
        debug!("event=task_add module=editor status=ok id={id}");
        self.refresh()
    }

    fn submit_edit(&mut self, target: TaskId, name: &str, time_12h: &str) -> EditorResult<()> {
        let canonical = clock::parse_12h(time_12h)?;
        if name.trim().is_empty() {
            return Err(EditorError::MissingInput);
        }
        {
            let guard = self.store.lock();
            let mut tasks = guard.load()?;
            let position = tasks
                .iter()
                .position(|task| task.id == target)
                .ok_or(EditorError::SelectionVanished(target))?;
            tasks[position] = Task::with_id(target, name, canonical);
            guard.save(&tasks)?;
        }
        debug!("event=task_edit module=editor status=ok id={target}");
        self.mode = EditorMode::Create;
        self.refresh()
    }

    /// Switches into `Edit` mode for the selected row and returns the
    /// field values to prefill.
    ///
    /// The selection is resolved to a task id against the snapshot, then
    /// re-checked against a fresh store read, so a row fired by the
    /// reminder loop in the meantime is caught here instead of being
    /// silently rewritten.
    pub fn begin_edit(&mut self) -> EditorResult<Prefill> {
        let index = self.selection.ok_or(EditorError::NoSelection)?;
        let target = match self.visible.get(index) {
            Some(task) => task.id,
            None => {
                return Err(EditorError::IndexOutOfRange {
                    index,
                    len: self.visible.len(),
                })
            }
        };
        let current = {
            let guard = self.store.lock();
            let tasks = guard.load()?;
            tasks
                .into_iter()
                .find(|task| task.id == target)
                .ok_or(EditorError::SelectionVanished(target))?
        };
        self.mode = EditorMode::Edit { target };
        Ok(Prefill {
            name: current.name,
            time: current.time,
        })
    }

    /// Abandons a pending edit and returns to `Create` mode. The input
    /// fields are the caller's to reset.
    pub fn cancel_edit(&mut self) {
        self.mode = EditorMode::Create;
    }

    /// Deletes the selected task and returns it.
    ///
    /// Does not touch the pending mode: deleting the task a pending edit
    /// targets leaves that edit to fail on submit.
    pub fn delete(&mut self) -> EditorResult<Task> {
        let result = self.remove_selected();
        if let Err(err) = &result {
            debug!(
                "event=task_delete module=editor status=error reason={}",
                err.label()
            );
        }
        result
    }

    fn remove_selected(&mut self) -> EditorResult<Task> {
        let index = self.selection.ok_or(EditorError::NoSelection)?;
        let target = match self.visible.get(index) {
            Some(task) => task.id,
            None => {
                return Err(EditorError::IndexOutOfRange {
                    index,
                    len: self.visible.len(),
                })
            }
        };
        let removed = {
            let guard = self.store.lock();
            let mut tasks = guard.load()?;
            let position = tasks
                .iter()
                .position(|task| task.id == target)
                .ok_or(EditorError::SelectionVanished(target))?;
            let removed = tasks.remove(position);
            guard.save(&tasks)?;
            removed
        };
        debug!("event=task_delete module=editor status=ok id={target}");
        self.refresh()?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JsonTaskStore;
    use tempfile::TempDir;

    #[test]
    fn new_editor_starts_empty_in_create_mode() {
        let (editor, _dir) = editor_with(&[]);
        assert!(editor.visible().is_empty());
        assert_eq!(editor.selection(), None);
        assert_eq!(*editor.mode(), EditorMode::Create);
    }

    #[test]
    fn create_submit_rejects_blank_fields_before_parsing() {
        let (mut editor, _dir) = editor_with(&[]);

        let err = editor.submit("", "not a time").unwrap_err();
        assert!(matches!(err, EditorError::MissingInput));

        let err = editor.submit("Call Bob", "").unwrap_err();
        assert!(matches!(err, EditorError::MissingInput));

        assert!(editor.store.load().unwrap().is_empty());
    }

    #[test]
    fn create_submit_stores_canonical_time() {
        let (mut editor, _dir) = editor_with(&[]);
        editor.submit("Call Bob", "2:15 PM").unwrap();

        assert_eq!(editor.visible().len(), 1);
        assert_eq!(editor.visible()[0].name, "Call Bob");
        assert_eq!(editor.visible()[0].time, "14:15");
    }

    #[test]
    fn begin_edit_requires_a_selection() {
        let (mut editor, _dir) = editor_with(&[("Water plants", "14:30")]);
        let err = editor.begin_edit().unwrap_err();
        assert!(matches!(err, EditorError::NoSelection));
    }

    #[test]
    fn begin_edit_rejects_stale_index() {
        let (mut editor, _dir) = editor_with(&[("Water plants", "14:30")]);
        editor.select(5);
        let err = editor.begin_edit().unwrap_err();
        assert!(matches!(
            err,
            EditorError::IndexOutOfRange { index: 5, len: 1 }
        ));
    }

    #[test]
    fn begin_edit_prefills_stored_time_verbatim() {
        let (mut editor, _dir) = editor_with(&[("Water plants", "14:30")]);
        editor.select(0);

        let prefill = editor.begin_edit().unwrap();
        assert_eq!(prefill.name, "Water plants");
        assert_eq!(prefill.time, "14:30");
        assert!(matches!(editor.mode(), EditorMode::Edit { .. }));

        // The canonical prefill is not valid twelve-hour input.
        let err = editor.submit("Water plants", "14:30").unwrap_err();
        assert!(matches!(err, EditorError::InvalidTime(_)));
    }

    #[test]
    fn failed_edit_submit_stays_in_edit_mode() {
        let (mut editor, _dir) = editor_with(&[("Water plants", "14:30")]);
        editor.select(0);
        editor.begin_edit().unwrap();

        let err = editor.submit("", "3:00 PM").unwrap_err();
        assert!(matches!(err, EditorError::MissingInput));
        assert!(matches!(editor.mode(), EditorMode::Edit { .. }));
    }

    #[test]
    fn edit_submit_parses_time_before_name_check() {
        let (mut editor, _dir) = editor_with(&[("Water plants", "14:30")]);
        editor.select(0);
        editor.begin_edit().unwrap();

        // Both fields blank: the edit flow reports the time first.
        let err = editor.submit("", "").unwrap_err();
        assert!(matches!(err, EditorError::InvalidTime(_)));
    }

    #[test]
    fn successful_edit_returns_to_create_mode() {
        let (mut editor, _dir) = editor_with(&[("Water plants", "14:30")]);
        editor.select(0);
        let target = editor.visible()[0].id;
        editor.begin_edit().unwrap();

        editor.submit("Water the plants", "3:45 PM").unwrap();

        assert_eq!(*editor.mode(), EditorMode::Create);
        assert_eq!(editor.visible().len(), 1);
        assert_eq!(editor.visible()[0].id, target);
        assert_eq!(editor.visible()[0].name, "Water the plants");
        assert_eq!(editor.visible()[0].time, "15:45");
    }

    #[test]
    fn delete_requires_selection_in_range() {
        let (mut editor, _dir) = editor_with(&[("A", "08:00"), ("B", "09:00"), ("C", "10:00")]);

        let err = editor.delete().unwrap_err();
        assert!(matches!(err, EditorError::NoSelection));

        editor.select(5);
        let err = editor.delete().unwrap_err();
        assert!(matches!(
            err,
            EditorError::IndexOutOfRange { index: 5, len: 3 }
        ));
        assert_eq!(editor.visible().len(), 3);
    }

    #[test]
    fn delete_removes_only_the_selected_row() {
        let (mut editor, _dir) = editor_with(&[("A", "08:00"), ("B", "09:00"), ("C", "10:00")]);
        editor.select(1);

        let removed = editor.delete().unwrap();
        assert_eq!(removed.name, "B");
        let names: Vec<&str> = editor.visible().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["A", "C"]);
        assert_eq!(editor.selection(), None);
    }

    #[test]
    fn vanished_selection_is_reported_by_id() {
        let (mut editor, _dir) = editor_with(&[("Water plants", "14:30")]);
        editor.refresh().unwrap();
        editor.select(0);

        // Another writer empties the store behind the snapshot.
        editor.store.lock().save(&[]).unwrap();

        let err = editor.begin_edit().unwrap_err();
        assert!(matches!(err, EditorError::SelectionVanished(_)));
        assert_eq!(*editor.mode(), EditorMode::Create);
    }

    #[test]
    fn clear_selection_drops_the_picked_row() {
        let (mut editor, _dir) = editor_with(&[("Water plants", "14:30")]);
        editor.select(0);
        assert_eq!(editor.selection(), Some(0));

        editor.clear_selection();

        assert_eq!(editor.selection(), None);
        let err = editor.delete().unwrap_err();
        assert!(matches!(err, EditorError::NoSelection));
    }

    #[test]
    fn error_labels_cover_every_variant() {
        let cases = [
            (EditorError::MissingInput, "missing_input"),
            (
                EditorError::InvalidTime(TimeParseError::InvalidTimeFormat("25:99".into())),
                "invalid_time",
            ),
            (EditorError::NoSelection, "no_selection"),
            (
                EditorError::IndexOutOfRange { index: 5, len: 1 },
                "index_out_of_range",
            ),
            (
                EditorError::SelectionVanished(TaskId::new_v4()),
                "selection_vanished",
            ),
            (
                EditorError::Store(StoreError::corrupt("tasks.json", "not an array")),
                "store",
            ),
        ];
        for (err, label) in cases {
            assert_eq!(err.label(), label);
        }
    }

    fn editor_with(rows: &[(&str, &str)]) -> (TaskEditor<JsonTaskStore>, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SharedStore::new(JsonTaskStore::new(dir.path().join("tasks.json")));
        let seeded: Vec<Task> = rows
            .iter()
            .map(|(name, time)| Task::new(*name, *time))
            .collect();
        store.lock().save(&seeded).unwrap();

        let mut editor = TaskEditor::new(store);
        editor.refresh().unwrap();
        (editor, dir)
    }
}
