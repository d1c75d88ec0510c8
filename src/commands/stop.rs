//! Implementation of the `chime stop` hook.

use super::HookRuntime;
use crate::cli::StopArgs;
use crate::error::Result;
use crate::events::HookEvent;
use crate::input::HookInput;
use crate::transcript::export_chat;
use std::path::Path;
use tracing::{debug, warn};

/// Log, export the transcript, and announce that the agent is done.
///
/// The main agent finishes alone, so its announcement does not take the lock.
pub fn cmd_stop(rt: &HookRuntime<'_>, input: &HookInput, args: &StopArgs) -> Result<()> {
    rt.log_event(HookEvent::Stop, input)?;

    if args.chat {
        export_transcript(rt, input);
    }

    if args.notify {
        let message = rt.messages().agent_complete();
        debug!("announcing: {}", message);
        rt.speaker.speak(&message);
    }

    Ok(())
}

/// Export the event's transcript, if it names one. Failures are logged only
/// so that the announcement still happens.
pub(super) fn export_transcript(rt: &HookRuntime<'_>, input: &HookInput) {
    let Some(transcript) = input.transcript_path() else {
        return;
    };

    match export_chat(rt.ctx, Path::new(transcript)) {
        Ok(Some(count)) => debug!(entries = count, "exported transcript"),
        Ok(None) => {}
        Err(e) => warn!("transcript export failed: {}", e),
    }
}
