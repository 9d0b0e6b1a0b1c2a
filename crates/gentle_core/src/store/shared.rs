//! Shared single owner of the persisted store.
//!
//! # Responsibility
//! - Hand out clonable handles to one store instance.
//! - Serialize whole read-modify-write cycles across threads.
//!
//! # Invariants
//! - A cycle holds the guard from its fresh load until its save, so two
//!   cycles can never interleave and silently undo each other's writes.
//! - Guards are never held across sleeps or notification delivery.

use super::{StoreResult, TaskStore};
use crate::model::task::Task;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Clonable handle to the single store owner.
///
/// The reminder loop and every editor operation go through a handle to the
/// same `SharedStore`, which is what rules out the lost update where a
/// stale foreground copy overwrites a concurrent background deletion.
pub struct SharedStore<S: TaskStore> {
    inner: Arc<Mutex<S>>,
}

impl<S: TaskStore> SharedStore<S> {
    /// Takes ownership of the store; all further access goes through
    /// handles cloned from the returned value.
    pub fn new(store: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Begins one serialized cycle against the store.
    ///
    /// Hold the returned guard for the entire read-modify-write sequence;
    /// drop it before doing anything slow.
    pub fn lock(&self) -> StoreGuard<'_, S> {
        // Poisoning only means another cycle panicked mid-flight; the store
        // itself is a plain path handle and stays usable.
        StoreGuard(self.inner.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Serialized full read of the persisted collection.
    pub fn load(&self) -> StoreResult<Vec<Task>> {
        self.lock().load()
    }
}

impl<S: TaskStore> Clone for SharedStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Exclusive access to the store for the duration of one cycle.
pub struct StoreGuard<'a, S: TaskStore>(MutexGuard<'a, S>);

impl<S: TaskStore> StoreGuard<'_, S> {
    /// Fresh read of the full collection.
    pub fn load(&self) -> StoreResult<Vec<Task>> {
        self.0.load()
    }

    /// Full overwrite with the given collection.
    pub fn save(&self, tasks: &[Task]) -> StoreResult<()> {
        self.0.save(tasks)
    }
}
