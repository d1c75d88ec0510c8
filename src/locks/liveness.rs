//! Process liveness probing for stale-lock reclamation.

use std::io;

/// What a probe could tell about a recorded process id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// The process exists (possibly owned by another user).
    Alive,
    /// No process with this id exists.
    Dead,
    /// The probe could not decide.
    Unknown,
}

impl ProcessState {
    /// Only a confirmed-dead owner may have its lock reclaimed.
    pub fn may_be_running(self) -> bool {
        !matches!(self, ProcessState::Dead)
    }
}

/// Capability to check whether a process id names a running process.
pub trait LivenessProbe {
    /// Probe `pid` without affecting it.
    fn probe(&self, pid: u32) -> ProcessState;
}

/// Built-in liveness probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// Deliver signal 0 to the pid (Unix only).
    Signal,
    /// Never decide; every lock with a recorded pid is presumed held.
    AlwaysUnknown,
}

impl Liveness {
    /// The best probe available on this platform.
    pub fn platform_default() -> Self {
        if cfg!(unix) {
            Liveness::Signal
        } else {
            Liveness::AlwaysUnknown
        }
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::platform_default()
    }
}

impl LivenessProbe for Liveness {
    fn probe(&self, pid: u32) -> ProcessState {
        match self {
            Liveness::Signal => signal_probe(pid),
            Liveness::AlwaysUnknown => ProcessState::Unknown,
        }
    }
}

#[cfg(unix)]
fn signal_probe(pid: u32) -> ProcessState {
    // 0 and values past i32::MAX would address process groups, not one process.
    let Ok(raw) = libc::pid_t::try_from(pid) else {
        return ProcessState::Unknown;
    };
    if raw <= 0 {
        return ProcessState::Unknown;
    }

    // SAFETY: kill with signal 0 performs only the existence and permission
    // checks; no signal is delivered.
    let rc = unsafe { libc::kill(raw, 0) };
    if rc == 0 {
        return ProcessState::Alive;
    }

    match io::Error::last_os_error().raw_os_error() {
        Some(libc::ESRCH) => ProcessState::Dead,
        // Exists, but belongs to someone we may not signal.
        Some(libc::EPERM) => ProcessState::Alive,
        _ => ProcessState::Unknown,
    }
}

#[cfg(not(unix))]
fn signal_probe(_pid: u32) -> ProcessState {
    ProcessState::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_dead_allows_reclamation() {
        assert!(ProcessState::Alive.may_be_running());
        assert!(ProcessState::Unknown.may_be_running());
        assert!(!ProcessState::Dead.may_be_running());
    }

    #[test]
    fn always_unknown_never_decides() {
        assert_eq!(
            Liveness::AlwaysUnknown.probe(std::process::id()),
            ProcessState::Unknown
        );
        assert_eq!(Liveness::AlwaysUnknown.probe(999_999), ProcessState::Unknown);
    }

    #[cfg(unix)]
    #[test]
    fn signal_probe_sees_current_process() {
        assert_eq!(Liveness::Signal.probe(std::process::id()), ProcessState::Alive);
    }

    #[cfg(unix)]
    #[test]
    fn signal_probe_reports_missing_process_as_dead() {
        assert_eq!(Liveness::Signal.probe(999_999), ProcessState::Dead);
    }

    #[cfg(unix)]
    #[test]
    fn signal_probe_reports_reaped_child_as_dead() {
        let mut child = std::process::Command::new("true").spawn().unwrap();
        let pid = child.id();
        child.wait().unwrap();
        assert_eq!(Liveness::Signal.probe(pid), ProcessState::Dead);
    }

    #[cfg(unix)]
    #[test]
    fn signal_probe_refuses_group_addresses() {
        assert_eq!(Liveness::Signal.probe(0), ProcessState::Unknown);
        assert_eq!(Liveness::Signal.probe(u32::MAX), ProcessState::Unknown);
    }
}
