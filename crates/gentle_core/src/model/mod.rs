//! Domain model for persisted reminder tasks.
//!
//! # Responsibility
//! - Define the canonical task record shared by store, editor and loop.
//! - Enforce the persisted-form invariants before any write.
//!
//! # Invariants
//! - Every task carries a stable `TaskId` from creation on.
//! - `time` is only ever the canonical 24-hour `"HH:MM"` string.

pub mod task;
