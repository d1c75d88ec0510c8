//! Implementation of the `chime subagent-stop` hook.

use super::HookRuntime;
use super::stop::export_transcript;
use crate::announce::announce_exclusive;
use crate::cli::StopArgs;
use crate::error::Result;
use crate::events::HookEvent;
use crate::input::HookInput;
use tracing::debug;

/// Log, export the transcript, and announce under the shared lock.
pub fn cmd_subagent_stop(rt: &HookRuntime<'_>, input: &HookInput, args: &StopArgs) -> Result<()> {
    rt.log_event(HookEvent::SubagentStop, input)?;

    if args.chat {
        export_transcript(rt, input);
    }

    if args.notify {
        let agent_id = input.agent_id();
        let message = rt.messages().subagent_complete();
        debug!(agent = agent_id, "subagent stopped, announcing: {}", message);

        let outcome = announce_exclusive(
            &rt.lock_manager(None),
            agent_id,
            &message,
            rt.speaker,
            rt.config.lock_timeout(),
            rt.config.lock_stale_after(),
        );
        debug!(locked = outcome.locked, spoken = outcome.spoken, "announcement finished");
    }

    Ok(())
}
