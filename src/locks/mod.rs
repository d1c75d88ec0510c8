//! Cross-process advisory locking for chime.
//!
//! Hooks run as independent processes, so anything that must not overlap
//! (today: spoken announcements) is serialized through a lock that lives
//! on the shared filesystem.
//!
//! # Lock Layout
//!
//! A lock named `tts` under `.claude/data/tts_queue/` consists of:
//! - `tts.lock.d/`: the sentinel directory. Its existence IS the lock, and
//!   `create_dir` failing with `AlreadyExists` is the contention signal.
//! - `tts.lock`: the record file, JSON `{owner_id, timestamp, pid}`,
//!   written after the sentinel is created. Advisory only.
//!
//! # Failure Model
//!
//! Nothing here returns an error to the caller. `acquire` reports a timeout
//! as `false`, `release` swallows every failure, and `cleanup_stale` only
//! removes a lock whose record is over-age and whose owner is confirmed dead
//! (or was never recorded).

mod backoff;
mod guard;
mod liveness;
mod manager;
mod record;
mod resource;
mod types;


// Re-export public API
pub use backoff::Backoff;
pub use guard::LockGuard;
pub use liveness::{Liveness, LivenessProbe, ProcessState};
pub use manager::LockManager;
pub use record::{LockRecord, RecordSnapshot, format_age};
pub use resource::LockResource;
pub use types::{CleanupOutcome, LockStatus};
