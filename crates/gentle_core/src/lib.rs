//! Core domain logic for Gentle Reminder.
//! This crate is the single source of truth for business invariants.

pub mod clock;
pub mod editor;
pub mod logging;
pub mod model;
pub mod notify;
pub mod reminder;
pub mod store;

pub use clock::{current_minute, parse_12h, ClockResult, TimeParseError};
pub use editor::{EditorError, EditorMode, EditorResult, Prefill, TaskEditor};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use notify::{DesktopNotifier, NotificationSink, REMINDER_TITLE};
pub use reminder::{run_tick, spawn, TickReport, TICK_INTERVAL};
pub use store::{JsonTaskStore, SharedStore, StoreError, StoreResult, TaskStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
