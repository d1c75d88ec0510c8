//! Filesystem handle for a named lock resource.

use std::path::{Path, PathBuf};

/// Suffix of the sentinel directory whose existence is the lock.
const SENTINEL_SUFFIX: &str = ".lock.d";

/// Suffix of the advisory record file written next to the sentinel.
const RECORD_SUFFIX: &str = ".lock";

/// The pair of paths that make up one lock: a sentinel directory and a
/// sibling record file, both inside `dir`.
///
/// Two managers built from equal resources contend for the same lock,
/// whichever process they live in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockResource {
    name: String,
    dir: PathBuf,
    sentinel: PathBuf,
    record: PathBuf,
}

impl LockResource {
    /// Build the resource for lock `name` stored under `dir`.
    ///
    /// For `name = "tts"` this yields `dir/tts.lock.d` and `dir/tts.lock`.
    pub fn named<P: Into<PathBuf>>(dir: P, name: &str) -> Self {
        let dir = dir.into();
        let sentinel = dir.join(format!("{}{}", name, SENTINEL_SUFFIX));
        let record = dir.join(format!("{}{}", name, RECORD_SUFFIX));
        Self {
            name: name.to_string(),
            dir,
            sentinel,
            record,
        }
    }

    /// Logical lock name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory that holds the sentinel and the record.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the sentinel directory.
    pub fn sentinel_path(&self) -> &Path {
        &self.sentinel
    }

    /// Path of the record file.
    pub fn record_path(&self) -> &Path {
        &self.record
    }

    /// Whether the sentinel currently exists.
    ///
    /// Only a snapshot: another process may create or remove it right after.
    pub fn is_held(&self) -> bool {
        self.sentinel.is_dir()
    }
}
