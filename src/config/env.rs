//! Environment variables consulted by hooks.

use std::path::PathBuf;

/// Set to any value to turn every hook into a no-op.
pub const SKIP_HOOKS_VAR: &str = "SKIP_HOOKS";

/// Minimum level written to `hooks.log` (DEBUG, INFO, WARN, ERROR).
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";

/// Name used to personalize announcements.
pub const ENGINEER_NAME_VAR: &str = "ENGINEER_NAME";

/// Enables the ElevenLabs speech backend.
pub const ELEVENLABS_API_KEY_VAR: &str = "ELEVENLABS_API_KEY";

/// Pins the project root instead of discovering it.
pub const PROJECT_DIR_VAR: &str = "CHIME_PROJECT_DIR";

/// Snapshot of the environment taken once at startup.
///
/// Empty strings count as unset, except for `SKIP_HOOKS`, where presence
/// alone is what matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookEnv {
    /// `SKIP_HOOKS` is present.
    pub skip_hooks: bool,

    /// Raw `LOG_LEVEL` value.
    pub log_level: Option<String>,

    /// Trimmed `ENGINEER_NAME`.
    pub engineer_name: Option<String>,

    /// `ELEVENLABS_API_KEY`.
    pub elevenlabs_api_key: Option<String>,

    /// `CHIME_PROJECT_DIR`.
    pub project_dir: Option<PathBuf>,
}

impl HookEnv {
    /// Read the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            skip_hooks: lookup(SKIP_HOOKS_VAR).is_some(),
            log_level: non_empty(LOG_LEVEL_VAR),
            engineer_name: non_empty(ENGINEER_NAME_VAR),
            elevenlabs_api_key: non_empty(ELEVENLABS_API_KEY_VAR),
            project_dir: non_empty(PROJECT_DIR_VAR).map(PathBuf::from),
        }
    }
}
