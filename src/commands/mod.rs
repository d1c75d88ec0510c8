//! Command implementations for chime.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, and the fail-open wrapper shared by every hook.
//!
//! A hook must never break the agent runtime that invoked it, so anything
//! that goes wrong while handling an event is logged and swallowed. The one
//! exception is [`ChimeError::Blocked`], which is how a hook refuses an
//! action: it propagates to `main` and becomes exit code 2.

mod agent_notification;
mod lock;
mod notification;
mod permission_request;
mod post_tool_use;
mod post_tool_use_failure;
mod pre_compact;
mod pre_tool_use;
mod session_end;
mod session_start;
mod stop;
mod subagent_start;
mod subagent_stop;
mod user_prompt_submit;

use crate::cli::Command;
use crate::config::{Config, HookEnv};
use crate::context::HookContext;
use crate::error::{ChimeError, Result};
use crate::events::{HookEvent, append_to_log};
use crate::input::HookInput;
use crate::locks::{LockManager, LockResource};
use crate::messages::MessagePicker;
use crate::tts::{Speaker, SpeechChain};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use std::io::{self, Read};
use tracing::{error, info};

/// Everything a command needs from its environment.
pub struct HookRuntime<'a> {
    pub ctx: &'a HookContext,
    pub config: &'a Config,
    pub hook_env: &'a HookEnv,
    pub speaker: &'a dyn Speaker,
}

impl HookRuntime<'_> {
    /// Message picker personalized with the engineer's name.
    pub fn messages(&self) -> MessagePicker {
        MessagePicker::new(
            self.hook_env.engineer_name.clone(),
            self.config.name_probability,
        )
    }

    /// Manager for the configured announcement lock.
    pub fn lock_manager(&self, name: Option<&str>) -> LockManager {
        let name = name.unwrap_or(self.config.lock_name.as_str());
        LockManager::new(LockResource::named(&self.ctx.tts_queue_dir, name))
    }

    /// Append the event to its JSON log.
    pub fn log_event(&self, event: HookEvent, input: &HookInput) -> Result<()> {
        self.log_event_entry(event, input.raw())
    }

    /// Append a derived `entry` to the event's JSON log.
    pub fn log_event_entry(&self, event: HookEvent, entry: &Value) -> Result<()> {
        append_to_log(self.ctx, event.log_name(), entry)
    }
}

/// Current time as stamped into logged events (`logged_at`).
pub(crate) fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The hook event a command handles, or `None` for operator commands.
pub fn hook_event(command: &Command) -> Option<HookEvent> {
    match command {
        Command::SessionStart(_) => Some(HookEvent::SessionStart),
        Command::SessionEnd(_) => Some(HookEvent::SessionEnd),
        Command::UserPromptSubmit(_) => Some(HookEvent::UserPromptSubmit),
        Command::Notification(_) => Some(HookEvent::Notification),
        Command::PreToolUse => Some(HookEvent::PreToolUse),
        Command::PostToolUse => Some(HookEvent::PostToolUse),
        Command::Stop(_) => Some(HookEvent::Stop),
        Command::SubagentStop(_) => Some(HookEvent::SubagentStop),
        Command::SubagentStart => Some(HookEvent::SubagentStart),
        Command::PostToolUseFailure => Some(HookEvent::PostToolUseFailure),
        Command::PreCompact(_) => Some(HookEvent::PreCompact),
        Command::PermissionRequest(_) => Some(HookEvent::PermissionRequest),
        Command::AgentNotification(_) => Some(HookEvent::AgentNotification),
        Command::Lock(_) => None,
    }
}

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Hook commands read
/// their event from stdin.
pub fn dispatch(command: Command, ctx: &HookContext, hook_env: &HookEnv) -> Result<()> {
    let config = Config::load_or_default(ctx.config_path());
    let speaker = SpeechChain::from_config(&config, hook_env);
    let rt = HookRuntime {
        ctx,
        config: &config,
        hook_env,
        speaker: &speaker,
    };

    match command {
        Command::Lock(lock_cmd) => lock::dispatch_lock(&rt, lock_cmd),
        hook => run_hook(&rt, hook, io::stdin().lock()),
    }
}

/// Run a hook command against the event in `reader`, failing open.
pub fn run_hook<R: Read>(rt: &HookRuntime<'_>, command: Command, reader: R) -> Result<()> {
    let hook = hook_event(&command).map_or("hook", HookEvent::log_name);

    let outcome = HookInput::from_reader(reader).and_then(|input| match command {
        Command::SessionStart(args) => session_start::cmd_session_start(rt, &input, &args),
        Command::SessionEnd(args) => session_end::cmd_session_end(rt, input, &args),
        Command::UserPromptSubmit(args) => {
            user_prompt_submit::cmd_user_prompt_submit(rt, &input, &args)
        }
        Command::Notification(args) => notification::cmd_notification(rt, &input, &args),
        Command::PreToolUse => pre_tool_use::cmd_pre_tool_use(rt, &input),
        Command::PostToolUse => post_tool_use::cmd_post_tool_use(rt, &input),
        Command::Stop(args) => stop::cmd_stop(rt, &input, &args),
        Command::SubagentStop(args) => subagent_stop::cmd_subagent_stop(rt, &input, &args),
        Command::SubagentStart => subagent_start::cmd_subagent_start(rt, input),
        Command::PostToolUseFailure => {
            post_tool_use_failure::cmd_post_tool_use_failure(rt, input)
        }
        Command::PreCompact(args) => pre_compact::cmd_pre_compact(rt, &input, &args),
        Command::PermissionRequest(args) => {
            permission_request::cmd_permission_request(rt, &input, &args)
        }
        Command::AgentNotification(args) => {
            agent_notification::cmd_agent_notification(rt, &input, &args)
        }
        Command::Lock(_) => Err(ChimeError::UserError(
            "lock commands do not read hook input".to_string(),
        )),
    });

    fail_open(hook, outcome)
}

/// Swallow every error except a deliberate block.
fn fail_open(hook: &str, outcome: Result<()>) -> Result<()> {
    match outcome {
        Ok(()) => Ok(()),
        Err(e) if e.is_blocking() => {
            info!(hook, "blocked: {}", e);
            Err(e)
        }
        Err(e) => {
            error!(hook, "{}", e);
            Ok(())
        }
    }
}
