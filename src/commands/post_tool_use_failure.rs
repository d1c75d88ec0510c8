//! Implementation of the `chime post-tool-use-failure` hook.
//!
//! Failures are logged as a flat record with the fields worth grepping for,
//! plus the untouched event under `raw_input`.

use super::{HookRuntime, now_iso};
use crate::error::Result;
use crate::events::HookEvent;
use crate::input::HookInput;
use serde_json::{Value, json};

pub fn cmd_post_tool_use_failure(rt: &HookRuntime<'_>, mut input: HookInput) -> Result<()> {
    let logged_at = now_iso();
    input.insert("logged_at", json!(logged_at));

    let entry = failure_entry(&input, &logged_at);
    rt.log_event_entry(HookEvent::PostToolUseFailure, &entry)
}

/// The structured record written to `post_tool_use_failure.json`.
pub fn failure_entry(input: &HookInput, logged_at: &str) -> Value {
    json!({
        "timestamp": logged_at,
        "session_id": input.field_or("session_id", json!("")),
        "hook_event_name": input.field_or("hook_event_name", json!("PostToolUseFailure")),
        "tool_name": input.field_or("tool_name", json!("unknown")),
        "tool_use_id": input.field_or("tool_use_id", json!("unknown")),
        "tool_input": input.field_or("tool_input", json!({})),
        "error": input.field_or("error", json!({})),
        "cwd": input.field_or("cwd", json!("")),
        "permission_mode": input.field_or("permission_mode", json!("")),
        "transcript_path": input.field_or("transcript_path", json!("")),
        "raw_input": input.raw(),
    })
}
