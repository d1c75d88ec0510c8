//! Implementation of the `chime agent-notification` hook.
//!
//! Agent definitions call this when a role such as the coder or reviewer
//! finishes. Roles often finish together, so the announcement goes through
//! the shared lock like a subagent stop.

use super::HookRuntime;
use crate::announce::announce_exclusive;
use crate::cli::AgentNotificationArgs;
use crate::error::Result;
use crate::events::HookEvent;
use crate::input::{HookInput, UNKNOWN_ID};
use crate::messages::AgentRole;
use tracing::debug;

pub fn cmd_agent_notification(
    rt: &HookRuntime<'_>,
    input: &HookInput,
    args: &AgentNotificationArgs,
) -> Result<()> {
    let role_name = args.agent.as_deref().unwrap_or_default();

    match AgentRole::parse(role_name) {
        Some(role) => {
            let owner = match input.agent_id() {
                UNKNOWN_ID => role_name,
                agent_id => agent_id,
            };
            let message = rt.messages().role_complete(role);
            let outcome = announce_exclusive(
                &rt.lock_manager(None),
                owner,
                &message,
                rt.speaker,
                rt.config.lock_timeout(),
                rt.config.lock_stale_after(),
            );
            debug!(
                role = role_name,
                locked = outcome.locked,
                spoken = outcome.spoken,
                "role announcement finished"
            );
        }
        None => debug!(role = role_name, "no announcement for agent role"),
    }

    rt.log_event(HookEvent::AgentNotification, input)
}
