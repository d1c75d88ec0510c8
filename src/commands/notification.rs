//! Implementation of the `chime notification` hook.

use super::HookRuntime;
use crate::cli::NotifyArgs;
use crate::error::Result;
use crate::events::HookEvent;
use crate::input::HookInput;

/// The runtime's idle reminder. Already audible on its own, so never
/// announced.
pub const IDLE_MESSAGE: &str = "Claude is waiting for your input";

pub fn cmd_notification(rt: &HookRuntime<'_>, input: &HookInput, args: &NotifyArgs) -> Result<()> {
    rt.log_event(HookEvent::Notification, input)?;

    if args.notify && input.message() != Some(IDLE_MESSAGE) {
        rt.speaker.speak(&rt.messages().input_needed());
    }

    Ok(())
}
