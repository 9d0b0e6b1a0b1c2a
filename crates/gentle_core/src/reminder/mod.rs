//! Reminder loop: periodic due-check over the persisted collection.
//!
//! # Responsibility
//! - Compare stored fire times against the wall clock once per tick.
//! - Remove fired tasks and hand them to the notification sink.
//! - Keep the background thread alive across store failures.
//!
//! # Invariants
//! - Every tick reloads the collection; nothing is cached between ticks.
//! - A task fires at most once: removal happens in the same cycle as the
//!   match, so a minute that passes unobserved never fires retroactively.
//! - The store is persisted only on ticks where at least one task fired.

use crate::clock;
use crate::model::task::Task;
use crate::notify::{send_task_reminder, NotificationSink};
use crate::store::{SharedStore, StoreResult, TaskStore};
use log::{debug, error, info};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Fixed wake cadence. There is no drift correction and no catch-up for
/// ticks missed while the process was suspended.
pub const TICK_INTERVAL: Duration = Duration::from_secs(60);

/// Outcome of one reminder tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Tasks removed and notified this tick, in stored order.
    pub fired: Vec<Task>,
    /// Number of tasks still stored after the tick.
    pub remaining: usize,
}

impl TickReport {
    /// Returns whether this tick fired anything.
    pub fn fired_any(&self) -> bool {
        !self.fired.is_empty()
    }
}

/// Runs one tick against the given wall-clock minute.
///
/// Under a single serialized store cycle: reload the collection, drop
/// every task whose `time` equals `minute` (exact string match), and
/// persist the reduced collection only if something fired. Notifications
/// are posted after the cycle ends, so the opaque sink never sits inside
/// the persistence critical section.
///
/// Tasks sharing the same minute all fire in the same tick; identically
/// named tasks are not deduplicated.
///
/// # Errors
/// - Any [`crate::store::StoreError`] from the reload or the persist. The
///   collection on disk is left untouched in that case.
pub fn run_tick<S: TaskStore>(
    store: &SharedStore<S>,
    minute: &str,
    sink: &dyn NotificationSink,
) -> StoreResult<TickReport> {
    let (fired, remaining) = {
        let guard = store.lock();
        let tasks = guard.load()?;
        let (fired, kept): (Vec<Task>, Vec<Task>) =
            tasks.into_iter().partition(|task| task.is_due_at(minute));

        if !fired.is_empty() {
            guard.save(&kept)?;
        }
        (fired, kept.len())
    };

    for task in &fired {
        send_task_reminder(sink, &task.name);
    }

    Ok(TickReport { fired, remaining })
}

/// Starts the background reminder thread.
///
/// The thread ticks against the real local clock, sleeps
/// [`TICK_INTERVAL`], and repeats for the lifetime of the process. It is
/// never joined and never cancelled; process exit tears it down. Store
/// failures (including a corrupt tasks file) are logged and the loop
/// keeps running.
pub fn spawn<S>(
    store: SharedStore<S>,
    sink: Arc<dyn NotificationSink + Send + Sync>,
) -> thread::JoinHandle<()>
where
    S: TaskStore + Send + 'static,
{
    thread::spawn(move || loop {
        let minute = clock::current_minute();
        match run_tick(&store, &minute, sink.as_ref()) {
            Ok(report) if report.fired_any() => {
                info!(
                    "event=tick module=reminder status=ok minute={minute} fired={} remaining={}",
                    report.fired.len(),
                    report.remaining
                );
            }
            Ok(report) => {
                debug!(
                    "event=tick module=reminder status=ok minute={minute} fired=0 remaining={}",
                    report.remaining
                );
            }
            Err(err) => {
                error!("event=tick module=reminder status=error minute={minute} error={err}");
            }
        }
        thread::sleep(TICK_INTERVAL);
    })
}
