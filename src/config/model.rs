//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for chime hooks.
///
/// This struct represents the contents of `.claude/chime.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Announcement lock
    // =========================================================================
    /// Name of the lock serializing announcements.
    #[serde(default = "default_lock_name")]
    pub lock_name: String,

    /// Seconds to wait for the lock before announcing anyway.
    #[serde(default = "default_lock_timeout_secs")]
    pub lock_timeout_secs: u64,

    /// Seconds after which a lock with a dead owner may be reclaimed.
    #[serde(default = "default_lock_stale_secs")]
    pub lock_stale_secs: u64,

    // =========================================================================
    // Speech
    // =========================================================================
    /// Words per minute for `say`.
    #[serde(default = "default_say_rate")]
    pub say_rate: u32,

    /// Volume for `say`, 0.0 to 1.0.
    #[serde(default = "default_say_volume")]
    pub say_volume: f64,

    /// ElevenLabs voice to synthesize with.
    #[serde(default = "default_elevenlabs_voice_id")]
    pub elevenlabs_voice_id: String,

    /// ElevenLabs model id.
    #[serde(default = "default_elevenlabs_model")]
    pub elevenlabs_model: String,

    /// Upper bound for the ElevenLabs request, in seconds.
    #[serde(default = "default_elevenlabs_timeout_secs")]
    pub elevenlabs_timeout_secs: u64,

    /// Chance that a message is personalized with the engineer's name.
    #[serde(default = "default_name_probability")]
    pub name_probability: f64,

    // =========================================================================
    // Housekeeping
    // =========================================================================
    /// Age after which `session-end --cleanup` deletes `logs/chat.json`.
    #[serde(default = "default_chat_max_age_hours")]
    pub chat_max_age_hours: u64,

    /// Prompts containing any of these are blocked by `--validate`.
    #[serde(default)]
    pub blocked_prompt_patterns: Vec<BlockedPattern>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lock_name: default_lock_name(),
            lock_timeout_secs: default_lock_timeout_secs(),
            lock_stale_secs: default_lock_stale_secs(),
            say_rate: default_say_rate(),
            say_volume: default_say_volume(),
            elevenlabs_voice_id: default_elevenlabs_voice_id(),
            elevenlabs_model: default_elevenlabs_model(),
            elevenlabs_timeout_secs: default_elevenlabs_timeout_secs(),
            name_probability: default_name_probability(),
            chat_max_age_hours: default_chat_max_age_hours(),
            blocked_prompt_patterns: Vec::new(),
        }
    }
}
