//! Implementation of the `chime subagent-start` hook.

use super::{HookRuntime, now_iso};
use crate::error::Result;
use crate::events::HookEvent;
use crate::input::HookInput;
use serde_json::json;
use tracing::debug;

pub fn cmd_subagent_start(rt: &HookRuntime<'_>, mut input: HookInput) -> Result<()> {
    input.insert("logged_at", json!(now_iso()));
    rt.log_event(HookEvent::SubagentStart, &input)?;

    debug!(
        agent_id = input.agent_id(),
        agent_type = input.agent_type(),
        "subagent started"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestProject;

    #[test]
    fn test_logs_with_timestamp() {
        let project = TestProject::new();
        let input = HookInput::from_value(json!({"agent_id": "a1", "agent_type": "coder"}));

        cmd_subagent_start(&project.runtime(), input).unwrap();

        let log = project.read_log("subagent_start");
        assert_eq!(log.len(), 1);
        assert_eq!(log[0]["agent_type"], "coder");
        let logged_at = log[0]["logged_at"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(logged_at).is_ok());
        assert!(project.speaker.spoken().is_empty());
    }
}
