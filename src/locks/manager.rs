//! Lock acquisition, release, and stale-lock reclamation.

use super::backoff::Backoff;
use super::guard::LockGuard;
use super::liveness::{Liveness, LivenessProbe, ProcessState};
use super::record::{LockRecord, RecordSnapshot};
use super::resource::LockResource;
use super::types::{CleanupOutcome, LockStatus};
use crate::fs::atomic_write_file;
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Cross-process advisory lock over one `LockResource`.
///
/// Mutual exclusion rests solely on `create_dir` of the sentinel failing
/// with `AlreadyExists` for every creator but one. The record file is
/// written afterwards and is advisory.
#[derive(Debug, Clone)]
pub struct LockManager<P: LivenessProbe = Liveness> {
    resource: LockResource,
    probe: P,
    backoff: Backoff,
}

impl LockManager<Liveness> {
    /// Manager using the platform's liveness probe.
    pub fn new(resource: LockResource) -> Self {
        Self::with_probe(resource, Liveness::platform_default())
    }
}

impl<P: LivenessProbe> LockManager<P> {
    /// Manager using a caller-supplied liveness probe.
    pub fn with_probe(resource: LockResource, probe: P) -> Self {
        Self {
            resource,
            probe,
            backoff: Backoff::default(),
        }
    }

    /// Replace the retry schedule used by `acquire`.
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// The resource this manager guards.
    pub fn resource(&self) -> &LockResource {
        &self.resource
    }

    /// Try to take the lock, retrying with backoff for up to `timeout`.
    ///
    /// Always makes at least one attempt. Returns `false` once the timeout
    /// elapses; callers are expected to carry on without the lock.
    pub fn acquire(&self, owner_id: &str, timeout: Duration) -> bool {
        if let Err(e) = fs::create_dir_all(self.resource.dir()) {
            // Not fatal here: the create below fails too and is retried.
            warn!(
                "failed to create lock directory '{}': {}",
                self.resource.dir().display(),
                e
            );
        }

        let start = Instant::now();
        let mut backoff = self.backoff.clone();

        loop {
            match fs::create_dir(self.resource.sentinel_path()) {
                Ok(()) => {
                    self.write_record(owner_id);
                    debug!(lock = self.resource.name(), owner_id, "lock acquired");
                    return true;
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(lock = self.resource.name(), owner_id, "lock held, retrying");
                }
                Err(e) => {
                    debug!(
                        lock = self.resource.name(),
                        owner_id, "transient error creating sentinel: {}", e
                    );
                }
            }

            let remaining = timeout.saturating_sub(start.elapsed());
            if remaining.is_zero() {
                debug!(lock = self.resource.name(), owner_id, "lock acquisition timed out");
                return false;
            }
            thread::sleep(backoff.next_delay().min(remaining));
        }
    }

    /// `acquire`, returning a guard that releases the lock on drop.
    pub fn acquire_guard(&self, owner_id: &str, timeout: Duration) -> Option<LockGuard<'_, P>> {
        self.acquire(owner_id, timeout)
            .then(|| LockGuard::new(self, owner_id))
    }

    /// Give the lock up. Never fails observably and is safe to repeat.
    ///
    /// The record is blanked before the sentinel goes away so that a new
    /// holder's record can never be blanked by a late release.
    pub fn release(&self, owner_id: &str) {
        let record = self.resource.record_path();
        match OpenOptions::new().write(true).truncate(true).open(record) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => debug!("failed to blank lock record '{}': {}", record.display(), e),
        }

        let sentinel = self.resource.sentinel_path();
        match fs::remove_dir(sentinel) {
            Ok(()) => debug!(lock = self.resource.name(), owner_id, "lock released"),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(lock = self.resource.name(), owner_id, "lock already released");
            }
            Err(e) => debug!("failed to remove sentinel '{}': {}", sentinel.display(), e),
        }
    }

    /// Remove the lock if its record is older than `max_age` and its owner
    /// is gone.
    ///
    /// An over-age lock whose recorded owner is alive, or whose liveness
    /// cannot be determined, is left in place. A pid of zero or below counts
    /// as no pid recorded.
    ///
    /// The record is read again just before removal and the sweep backs off
    /// if it changed. Two sweeps can still interleave between that second
    /// read and the removal, in which case a lock taken in that window is
    /// removed as stale.
    pub fn cleanup_stale(&self, max_age: Duration) -> CleanupOutcome {
        let record_path = self.resource.record_path();
        let Some(snapshot) = RecordSnapshot::read(record_path) else {
            return CleanupOutcome::NoRecord;
        };

        let age = snapshot.age();
        if age <= max_age {
            return CleanupOutcome::Fresh { age };
        }

        if let Some(pid) = snapshot.pid.filter(|&pid| pid > 0) {
            let state = match u32::try_from(pid) {
                Ok(pid) => self.probe.probe(pid),
                Err(_) => ProcessState::Unknown,
            };
            if state.may_be_running() {
                debug!(
                    lock = self.resource.name(),
                    pid,
                    ?state,
                    "over-age lock owner may still be running, keeping lock"
                );
                return CleanupOutcome::OwnerRunning { pid, state };
            }
        }

        if RecordSnapshot::read(record_path).as_ref() != Some(&snapshot) {
            debug!(
                lock = self.resource.name(),
                "lock record changed during sweep, keeping lock"
            );
            return CleanupOutcome::Superseded;
        }

        let _ = fs::remove_dir(self.resource.sentinel_path());
        let _ = fs::remove_file(record_path);
        warn!(
            lock = self.resource.name(),
            age_secs = age.as_secs(),
            "reclaimed stale lock"
        );
        CleanupOutcome::Reclaimed { age }
    }

    /// Current state of the lock for display.
    pub fn status(&self) -> LockStatus {
        let record_path = self.resource.record_path();
        LockStatus {
            name: self.resource.name().to_string(),
            held: self.resource.is_held(),
            record: LockRecord::from_file(record_path).ok(),
            age: RecordSnapshot::read(record_path).map(|s| s.age()),
        }
    }

    fn write_record(&self, owner_id: &str) {
        let record = LockRecord::new(owner_id);
        let written =
            record.to_json().and_then(|json| atomic_write_file(self.resource.record_path(), &json));
        if let Err(e) = written {
            // The sentinel alone holds the lock.
            warn!(lock = self.resource.name(), "failed to write lock record: {}", e);
        }
    }
}
