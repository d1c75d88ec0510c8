//! Implementation of the `chime pre-tool-use` hook.

use super::HookRuntime;
use crate::error::{ChimeError, Result};
use crate::events::HookEvent;
use crate::guard::check_tool_use;
use crate::input::HookInput;
use tracing::debug;

/// Refuse guarded tool calls; log the ones that may run.
pub fn cmd_pre_tool_use(rt: &HookRuntime<'_>, input: &HookInput) -> Result<()> {
    let tool_name = input.tool_name();
    debug!(tool = tool_name, "checking tool call");

    if let Some(reason) = check_tool_use(tool_name, &input.tool_input()) {
        return Err(ChimeError::Blocked(reason.to_string()));
    }

    rt.log_event(HookEvent::PreToolUse, input)
}
