//! Implementation of the `chime post-tool-use` hook.

use super::HookRuntime;
use crate::error::Result;
use crate::events::HookEvent;
use crate::input::HookInput;

pub fn cmd_post_tool_use(rt: &HookRuntime<'_>, input: &HookInput) -> Result<()> {
    rt.log_event(HookEvent::PostToolUse, input)
}
