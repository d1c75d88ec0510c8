//! Lock-serialized announcements.
//!
//! Parallel subagents tend to finish together. Each one's stop hook runs
//! [`announce_exclusive`], so their announcements play one after another
//! instead of on top of each other.

use crate::locks::{CleanupOutcome, LivenessProbe, LockManager};
use crate::tts::Speaker;
use std::time::Duration;
use tracing::{debug, info};

/// What happened during an announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnounceOutcome {
    /// The lock was held while speaking.
    pub locked: bool,
    /// A speaker reported success.
    pub spoken: bool,
}

/// Speak `message` while holding the lock managed by `manager`.
///
/// Stale locks older than `stale_after` are swept first. If the lock cannot
/// be taken within `timeout` the message is spoken anyway: a late, possibly
/// overlapping announcement beats a lost one.
pub fn announce_exclusive<P, S>(
    manager: &LockManager<P>,
    owner_id: &str,
    message: &str,
    speaker: &S,
    timeout: Duration,
    stale_after: Duration,
) -> AnnounceOutcome
where
    P: LivenessProbe,
    S: Speaker + ?Sized,
{
    if let CleanupOutcome::Reclaimed { age } = manager.cleanup_stale(stale_after) {
        info!(age_secs = age.as_secs(), "reclaimed stale announcement lock");
    }

    match manager.acquire_guard(owner_id, timeout) {
        Some(guard) => {
            debug!(owner = owner_id, "lock acquired, announcing: {}", message);
            let spoken = speaker.speak(message);
            guard.release();
            debug!(owner = owner_id, "lock released");
            AnnounceOutcome {
                locked: true,
                spoken,
            }
        }
        None => {
            debug!(owner = owner_id, "lock timeout, announcing anyway: {}", message);
            AnnounceOutcome {
                locked: false,
                spoken: speaker.speak(message),
            }
        }
    }
}
