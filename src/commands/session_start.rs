//! Implementation of the `chime session-start` hook.

use super::HookRuntime;
use crate::cli::SessionStartArgs;
use crate::error::Result;
use crate::events::HookEvent;
use crate::input::HookInput;
use crate::session::SessionData;
use chrono::Utc;
use tracing::debug;

/// Log the event, stamp the session's start time, and optionally greet.
pub fn cmd_session_start(
    rt: &HookRuntime<'_>,
    input: &HookInput,
    args: &SessionStartArgs,
) -> Result<()> {
    rt.log_event(HookEvent::SessionStart, input)?;

    let mut session = SessionData::read(rt.ctx, input.session_id());
    session.mark_started(Utc::now());
    session.write(rt.ctx);

    if args.announce {
        let message = rt.messages().session_start(input.source());
        debug!(source = input.source(), "announcing: {}", message);
        rt.speaker.speak(&message);
    }

    Ok(())
}
