//! Supporting config types and default value functions.

use serde::{Deserialize, Serialize};

/// A prompt substring that `user-prompt-submit --validate` refuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedPattern {
    /// Substring to look for, matched case-insensitively.
    pub pattern: String,

    /// Reason reported back to the agent when the prompt is blocked.
    pub reason: String,
}

pub(crate) fn default_lock_name() -> String {
    "tts".to_string()
}

pub(crate) fn default_lock_timeout_secs() -> u64 {
    30
}

pub(crate) fn default_lock_stale_secs() -> u64 {
    60
}

pub(crate) fn default_say_rate() -> u32 {
    180
}

pub(crate) fn default_say_volume() -> f64 {
    0.25
}

pub(crate) fn default_elevenlabs_voice_id() -> String {
    "WejK3H1m7MI9CHnIjW9K".to_string()
}

pub(crate) fn default_elevenlabs_model() -> String {
    "eleven_turbo_v2_5".to_string()
}

pub(crate) fn default_elevenlabs_timeout_secs() -> u64 {
    15
}

pub(crate) fn default_name_probability() -> f64 {
    0.3
}

pub(crate) fn default_chat_max_age_hours() -> u64 {
    24
}
