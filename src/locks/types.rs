//! Lock status and cleanup result types.

use super::liveness::ProcessState;
use super::record::LockRecord;
use std::time::Duration;

/// What a stale-lock sweep decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// No record file exists; nothing to judge.
    NoRecord,
    /// The record is not older than the threshold.
    Fresh {
        /// Age of the record.
        age: Duration,
    },
    /// The record is over-age but its owner may still be running.
    OwnerRunning {
        /// Recorded pid.
        pid: i64,
        /// What the liveness probe reported.
        state: ProcessState,
    },
    /// The record changed while the sweep was deciding, so another process
    /// released, reclaimed, or took the lock first. Nothing was removed.
    Superseded,
    /// Sentinel and record were removed.
    Reclaimed {
        /// Age of the record at removal time.
        age: Duration,
    },
}

impl CleanupOutcome {
    /// Whether the sweep removed the lock.
    pub fn reclaimed(&self) -> bool {
        matches!(self, CleanupOutcome::Reclaimed { .. })
    }
}

/// Snapshot of a lock resource for display.
#[derive(Debug, Clone)]
pub struct LockStatus {
    /// Lock name.
    pub name: String,

    /// Whether the sentinel exists.
    pub held: bool,

    /// Parsed record, when the record file holds a complete one.
    pub record: Option<LockRecord>,

    /// Age of the record file contents (timestamp or mtime based).
    pub age: Option<Duration>,
}
