//! RAII lock guard implementation.

use super::liveness::LivenessProbe;
use super::manager::LockManager;

/// RAII guard for an acquired lock.
///
/// When dropped, the lock is released through `LockManager::release`,
/// which never fails observably, so a panic or early return inside the
/// critical section still frees the lock.
#[derive(Debug)]
pub struct LockGuard<'a, P: LivenessProbe> {
    manager: &'a LockManager<P>,
    owner_id: String,
    released: bool,
}

impl<'a, P: LivenessProbe> LockGuard<'a, P> {
    pub(super) fn new(manager: &'a LockManager<P>, owner_id: &str) -> Self {
        Self {
            manager,
            owner_id: owner_id.to_string(),
            released: false,
        }
    }

    /// Owner id the lock was acquired for.
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Release the lock before the guard goes out of scope.
    pub fn release(mut self) {
        self.released = true;
        self.manager.release(&self.owner_id);
    }
}

impl<P: LivenessProbe> Drop for LockGuard<'_, P> {
    fn drop(&mut self) {
        if !self.released {
            self.manager.release(&self.owner_id);
        }
    }
}
