//! Implementation of the `chime user-prompt-submit` hook.

use super::HookRuntime;
use crate::cli::UserPromptSubmitArgs;
use crate::config::BlockedPattern;
use crate::error::{ChimeError, Result};
use crate::events::HookEvent;
use crate::input::HookInput;
use crate::session::SessionData;

/// Log the prompt, optionally store it, and optionally refuse it.
pub fn cmd_user_prompt_submit(
    rt: &HookRuntime<'_>,
    input: &HookInput,
    args: &UserPromptSubmitArgs,
) -> Result<()> {
    rt.log_event(HookEvent::UserPromptSubmit, input)?;

    if args.store_last_prompt {
        let mut session = SessionData::read(rt.ctx, input.session_id());
        session.prompts.push(input.prompt().to_string());
        session.write(rt.ctx);
    }

    let patterns = &rt.config.blocked_prompt_patterns;
    if args.validate
        && !args.log_only
        && let Some(blocked) = find_blocked_pattern(input.prompt(), patterns)
    {
        return Err(ChimeError::Blocked(format!(
            "Prompt blocked: {}",
            blocked.reason
        )));
    }

    Ok(())
}

/// First pattern found in `prompt`, compared case-insensitively.
pub fn find_blocked_pattern<'a>(
    prompt: &str,
    patterns: &'a [BlockedPattern],
) -> Option<&'a BlockedPattern> {
    let prompt = prompt.to_lowercase();
    patterns
        .iter()
        .find(|p| prompt.contains(&p.pattern.to_lowercase()))
}
