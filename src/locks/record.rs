//! Advisory lock record stored next to the sentinel.

use crate::error::{ChimeError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

/// Diagnostic metadata written after a successful acquisition.
///
/// Mutual exclusion never depends on this file; it only tells operators
/// and the stale sweep who took the lock, when, and from which process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockRecord {
    /// Caller-supplied owner (usually an agent id).
    #[serde(alias = "agent_id")]
    pub owner_id: String,

    /// When the lock was acquired (RFC3339).
    pub timestamp: DateTime<Utc>,

    /// OS process id of the acquiring process.
    pub pid: u32,
}

impl LockRecord {
    /// Record for the current process, stamped now.
    pub fn new(owner_id: &str) -> Self {
        Self {
            owner_id: owner_id.to_string(),
            timestamp: Utc::now(),
            pid: std::process::id(),
        }
    }

    /// Serialize to the single-line JSON stored on disk.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| ChimeError::LockError(format!("failed to serialize lock record: {}", e)))
    }

    /// Parse a complete record from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ChimeError::LockError(format!(
                "failed to read lock record '{}': {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            ChimeError::LockError(format!(
                "failed to parse lock record '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Time since acquisition; zero if the timestamp lies in the future.
    pub fn age(&self) -> Duration {
        age_since(self.timestamp)
    }
}

/// Whatever could be salvaged from a record file that may be blank,
/// half-written, or written by an older version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSnapshot {
    /// Acquisition time, if the record had a parseable one.
    pub timestamp: Option<DateTime<Utc>>,

    /// Raw recorded pid, if any. Kept wide so that values too large for a
    /// pid are still seen as "a pid was recorded"; zero and below are not.
    pub pid: Option<i64>,

    /// Last modification time of the record file itself.
    pub modified: Option<SystemTime>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LooseRecord {
    timestamp: Option<String>,
    pid: Option<i64>,
}

impl RecordSnapshot {
    /// Read the record at `path`.
    ///
    /// Returns `None` only when the file does not exist (or vanished while
    /// being read). Blank or corrupt content yields a snapshot with just the
    /// modification time filled in.
    pub fn read(path: &Path) -> Option<Self> {
        let modified = fs::metadata(path).ok()?.modified().ok();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(_) => String::new(),
        };

        let loose: LooseRecord = serde_json::from_str(&content).unwrap_or_default();
        let timestamp = loose
            .timestamp
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|ts| ts.with_timezone(&Utc));

        Some(Self {
            timestamp,
            pid: loose.pid,
            modified,
        })
    }

    /// Age from the recorded timestamp, falling back to the file mtime.
    ///
    /// With neither available the age is zero, which never counts as stale.
    pub fn age(&self) -> Duration {
        if let Some(ts) = self.timestamp {
            return age_since(ts);
        }
        self.modified
            .and_then(|m| SystemTime::now().duration_since(m).ok())
            .unwrap_or(Duration::ZERO)
    }
}

fn age_since(ts: DateTime<Utc>) -> Duration {
    Utc::now()
        .signed_duration_since(ts)
        .to_std()
        .unwrap_or(Duration::ZERO)
}

/// Format an age as a short human-readable string.
pub fn format_age(age: Duration) -> String {
    let secs = age.as_secs();
    if secs >= 3600 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs)
    }
}
