//! Event logging for chime.
//!
//! Every hook appends the raw event it received to a JSON array file named
//! after the hook, e.g. `.claude/logs/subagent_stop.json`. The file is
//! rewritten whole (read, push, atomic replace), so it is always a valid
//! JSON document even if a hook dies mid-write.
//!
//! # Usage
//!
//! ```no_run
//! use chime::context::HookContext;
//! use chime::events::{HookEvent, append_to_log};
//! use serde_json::json;
//!
//! let ctx = HookContext::at(".");
//! append_to_log(&ctx, HookEvent::Stop.log_name(), &json!({"session_id": "abc"}))?;
//! # Ok::<(), chime::error::ChimeError>(())
//! ```

use crate::context::HookContext;
use crate::error::{ChimeError, Result};
use crate::fs::atomic_write_file;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Lifecycle points chime is invoked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookEvent {
    /// A session started, resumed, or was cleared.
    SessionStart,
    /// A session ended.
    SessionEnd,
    /// The user submitted a prompt.
    UserPromptSubmit,
    /// The runtime raised a notification.
    Notification,
    /// A tool is about to run.
    PreToolUse,
    /// A tool finished.
    PostToolUse,
    /// The main agent stopped.
    Stop,
    /// A subagent stopped.
    SubagentStop,
    /// A subagent was launched.
    SubagentStart,
    /// A tool call failed.
    PostToolUseFailure,
    /// The conversation is about to be compacted.
    PreCompact,
    /// The runtime is asking for permission to run a tool.
    PermissionRequest,
    /// A named agent role finished (invoked from agent definitions).
    AgentNotification,
}

impl HookEvent {
    /// Name of the JSON array log for this event.
    pub fn log_name(self) -> &'static str {
        match self {
            HookEvent::SessionStart => "session_start",
            HookEvent::SessionEnd => "session_end",
            HookEvent::UserPromptSubmit => "user_prompt_submit",
            HookEvent::Notification => "notification",
            HookEvent::PreToolUse => "pre_tool_use",
            HookEvent::PostToolUse => "post_tool_use",
            HookEvent::Stop => "stop",
            HookEvent::SubagentStop => "subagent_stop",
            HookEvent::SubagentStart => "subagent_start",
            HookEvent::PostToolUseFailure => "post_tool_use_failure",
            HookEvent::PreCompact => "pre_compact",
            HookEvent::PermissionRequest => "permission_request",
            HookEvent::AgentNotification => "agent_notification",
        }
    }
}

impl std::fmt::Display for HookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.log_name())
    }
}

/// Append `entry` to the JSON array log `name` under the logs directory.
pub fn append_to_log(ctx: &HookContext, name: &str, entry: &Value) -> Result<()> {
    append_to_array_file(&ctx.event_log_path(name), entry)
}

/// Append a session-end cleanup summary to `logs/cleanup.json`.
pub fn append_cleanup_record(ctx: &HookContext, entry: &Value) -> Result<()> {
    append_to_array_file(&ctx.cleanup_log_path(), entry)
}

/// Append `entry` to the JSON array stored at `path`.
///
/// A missing file, or one that does not hold a JSON array, starts a fresh
/// array; the unreadable content is discarded.
pub fn append_to_array_file(path: &Path, entry: &Value) -> Result<()> {
    let mut entries = read_array_file(path);
    entries.push(entry.clone());

    let json = serde_json::to_string_pretty(&Value::Array(entries))
        .map_err(|e| ChimeError::UserError(format!("failed to serialize log entries: {}", e)))?;

    atomic_write_file(path, &json)
}

/// Entries of the JSON array at `path`; empty when missing or corrupt.
pub fn read_array_file(path: &Path) -> Vec<Value> {
    fs::read_to_string(path)
        .ok()
        .and_then(|content| serde_json::from_str::<Vec<Value>>(&content).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_context() -> (TempDir, HookContext) {
        let temp_dir = TempDir::new().unwrap();
        let ctx = HookContext::at(temp_dir.path());
        (temp_dir, ctx)
    }

    #[test]
    fn test_log_names_are_snake_case() {
        assert_eq!(HookEvent::SubagentStop.log_name(), "subagent_stop");
        assert_eq!(HookEvent::UserPromptSubmit.to_string(), "user_prompt_submit");
        assert_eq!(HookEvent::PostToolUseFailure.log_name(), "post_tool_use_failure");
        assert_eq!(HookEvent::AgentNotification.log_name(), "agent_notification");

        let serialized = serde_json::to_string(&HookEvent::PreToolUse).unwrap();
        assert_eq!(serialized, "\"pre_tool_use\"");
    }

    #[test]
    fn test_append_creates_file_and_directories() {
        let (_temp_dir, ctx) = create_test_context();
        let path = ctx.event_log_path("stop");
        assert!(!path.exists());

        append_to_log(&ctx, "stop", &json!({"session_id": "s1"})).unwrap();

        let entries = read_array_file(&path);
        assert_eq!(entries, vec![json!({"session_id": "s1"})]);
    }

    #[test]
    fn test_append_preserves_existing_entries() {
        let (_temp_dir, ctx) = create_test_context();

        append_to_log(&ctx, "notification", &json!({"n": 1})).unwrap();
        append_to_log(&ctx, "notification", &json!({"n": 2})).unwrap();

        let entries = read_array_file(&ctx.event_log_path("notification"));
        assert_eq!(entries, vec![json!({"n": 1}), json!({"n": 2})]);
    }

    #[test]
    fn test_append_replaces_corrupt_log() {
        let (_temp_dir, ctx) = create_test_context();
        let path = ctx.event_log_path("stop");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ this is not json").unwrap();

        append_to_log(&ctx, "stop", &json!({"ok": true})).unwrap();

        assert_eq!(read_array_file(&path), vec![json!({"ok": true})]);
    }

    #[test]
    fn test_append_replaces_non_array_log() {
        let (_temp_dir, ctx) = create_test_context();
        let path = ctx.event_log_path("stop");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"not": "an array"}"#).unwrap();

        append_to_log(&ctx, "stop", &json!(1)).unwrap();

        assert_eq!(read_array_file(&path), vec![json!(1)]);
    }

    #[test]
    fn test_cleanup_record_goes_to_chat_dir() {
        let (temp_dir, ctx) = create_test_context();

        append_cleanup_record(&ctx, &json!({"removed": []})).unwrap();

        let path = temp_dir.path().join("logs").join("cleanup.json");
        assert_eq!(read_array_file(&path), vec![json!({"removed": []})]);
        assert!(!ctx.event_log_path("cleanup").exists());
    }

    #[test]
    fn test_log_is_pretty_printed() {
        let (_temp_dir, ctx) = create_test_context();
        append_to_log(&ctx, "stop", &json!({"a": 1})).unwrap();

        let content = fs::read_to_string(ctx.event_log_path("stop")).unwrap();
        assert!(content.starts_with("[\n"));
    }
}
