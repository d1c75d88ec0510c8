//! Implementation of the `chime permission-request` hook.
//!
//! The runtime asks before running a tool. With `--auto-allow`, calls the
//! tool policy considers read-only are approved by printing an allow
//! decision on stdout; everything else is left to the user.

use super::HookRuntime;
use crate::cli::PermissionRequestArgs;
use crate::error::Result;
use crate::events::HookEvent;
use crate::guard::is_auto_allowed;
use crate::input::HookInput;
use serde_json::{Map, Value, json};
use tracing::{debug, info};

/// `hook_event_name` of the only payload this hook answers.
pub const PERMISSION_REQUEST_EVENT: &str = "PermissionRequest";

pub fn cmd_permission_request(
    rt: &HookRuntime<'_>,
    input: &HookInput,
    args: &PermissionRequestArgs,
) -> Result<()> {
    if input.hook_event_name() != PERMISSION_REQUEST_EVENT {
        debug!(
            event = input.hook_event_name(),
            "not a permission request, ignoring"
        );
        return Ok(());
    }

    rt.log_event(HookEvent::PermissionRequest, input)?;

    if let Some(response) = decide(input, args) {
        println!("{}", response);
    }
    Ok(())
}

/// The response to print, if the request is answered at all.
pub fn decide(input: &HookInput, args: &PermissionRequestArgs) -> Option<Value> {
    if args.log_only || !args.auto_allow {
        return None;
    }

    let tool_name = input.tool_name();
    let tool_input = input.tool_input();
    if !is_auto_allowed(tool_name, &tool_input) {
        return None;
    }

    info!("{}", auto_allow_reason(tool_name, &tool_input));
    Some(allow_response())
}

/// Allow decision in the runtime's hook output format.
pub fn allow_response() -> Value {
    json!({
        "hookSpecificOutput": {
            "hookEventName": PERMISSION_REQUEST_EVENT,
            "decision": {"behavior": "allow"}
        }
    })
}

fn auto_allow_reason(tool_name: &str, tool_input: &Map<String, Value>) -> String {
    let field = |key: &str| {
        tool_input
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string()
    };

    match tool_name {
        "Read" => format!("Read operation auto-allowed: {}", field("file_path")),
        "Glob" => format!("Glob pattern search auto-allowed: {}", field("pattern")),
        "Grep" => format!("Grep search auto-allowed: {}", field("pattern")),
        "Bash" => {
            let command: String = field("command").chars().take(50).collect();
            format!("Safe bash command auto-allowed: {}...", command)
        }
        other => format!("{} auto-allowed (read-only operation)", other),
    }
}
