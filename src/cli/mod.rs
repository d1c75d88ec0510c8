//! CLI argument parsing for chime.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};

/// Chime: lifecycle hooks for coding agents, with spoken announcements.
///
/// Each hook subcommand reads one JSON event from stdin, logs it under
/// `.claude/logs/`, and optionally speaks. Concurrent announcements are
/// serialized through a filesystem lock shared by every hook process.
#[derive(Parser, Debug)]
#[command(name = "chime")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for chime.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// A session started, resumed, or was cleared.
    ///
    /// Records the session start time and optionally speaks a greeting.
    SessionStart(SessionStartArgs),

    /// A session ended.
    ///
    /// Logs the event and optionally removes stale files under `logs/`.
    SessionEnd(SessionEndArgs),

    /// The user submitted a prompt.
    ///
    /// Logs the prompt, optionally stores it in session data, and blocks
    /// prompts matching configured patterns.
    UserPromptSubmit(UserPromptSubmitArgs),

    /// The runtime raised a notification.
    Notification(NotifyArgs),

    /// A tool is about to run.
    ///
    /// Refuses `.env` access and dangerous `rm` commands (exit code 2).
    PreToolUse,

    /// A tool finished running.
    PostToolUse,

    /// The main agent finished.
    Stop(StopArgs),

    /// A subagent finished.
    ///
    /// Announcements go through the shared lock so that subagents finishing
    /// together do not talk over each other.
    SubagentStop(StopArgs),

    /// A subagent was launched.
    ///
    /// Logs the event with a `logged_at` stamp.
    SubagentStart,

    /// A tool call failed.
    ///
    /// Logs a structured failure record alongside the raw event.
    PostToolUseFailure,

    /// The conversation is about to be compacted.
    PreCompact(PreCompactArgs),

    /// The runtime is asking for permission to run a tool.
    ///
    /// With `--auto-allow`, read-only tools and safe shell commands are
    /// approved by printing an allow decision on stdout.
    PermissionRequest(PermissionRequestArgs),

    /// A named agent role finished; announce it through the shared lock.
    AgentNotification(AgentNotificationArgs),

    /// Inspect or manipulate the announcement lock.
    Lock(LockCommand),
}

/// Arguments for the `session-start` command.
#[derive(Parser, Debug)]
pub struct SessionStartArgs {
    /// Speak a greeting for the session source.
    #[arg(long)]
    pub announce: bool,
}

/// Arguments for the `session-end` command.
#[derive(Parser, Debug)]
pub struct SessionEndArgs {
    /// Remove temp files and stale chat exports under `logs/`.
    #[arg(long)]
    pub cleanup: bool,
}

/// Arguments for the `user-prompt-submit` command.
#[derive(Parser, Debug)]
pub struct UserPromptSubmitArgs {
    /// Block prompts matching `blocked_prompt_patterns`.
    #[arg(long)]
    pub validate: bool,

    /// Only log; never block (overrides --validate).
    #[arg(long)]
    pub log_only: bool,

    /// Append the prompt to the session's data file.
    #[arg(long)]
    pub store_last_prompt: bool,
}

/// Arguments for the `notification` command.
#[derive(Parser, Debug)]
pub struct NotifyArgs {
    /// Speak an input-needed message.
    #[arg(long)]
    pub notify: bool,
}

/// Arguments for the `stop` and `subagent-stop` commands.
#[derive(Parser, Debug)]
pub struct StopArgs {
    /// Export the session transcript to `logs/chat.json`.
    #[arg(long)]
    pub chat: bool,

    /// Speak a completion message.
    #[arg(long)]
    pub notify: bool,
}

/// Arguments for the `pre-compact` command.
#[derive(Parser, Debug)]
pub struct PreCompactArgs {
    /// Copy the transcript to `logs/transcript_backups/` first.
    #[arg(long)]
    pub backup: bool,

    /// Print what is about to happen.
    #[arg(long)]
    pub verbose: bool,
}

/// Arguments for the `permission-request` command.
#[derive(Parser, Debug)]
pub struct PermissionRequestArgs {
    /// Approve read-only tools and safe shell commands.
    #[arg(long)]
    pub auto_allow: bool,

    /// Only log; never answer (overrides --auto-allow).
    #[arg(long)]
    pub log_only: bool,
}

/// Arguments for the `agent-notification` command.
#[derive(Parser, Debug)]
pub struct AgentNotificationArgs {
    /// Agent role: `feature`, `coder`, `reviewer`, or `document`.
    ///
    /// Any other value is logged but not announced.
    #[arg(long)]
    pub agent: Option<String>,
}

/// Lock subcommands.
#[derive(Parser, Debug)]
pub struct LockCommand {
    /// Lock name (defaults to the configured `lock_name`).
    #[arg(long, global = true)]
    pub name: Option<String>,

    #[command(subcommand)]
    pub action: LockAction,
}

/// Available lock actions.
#[derive(Subcommand, Debug)]
pub enum LockAction {
    /// Take the lock and leave it held.
    ///
    /// Exits with code 4 if the lock is not obtained within the timeout.
    Acquire(LockAcquireArgs),

    /// Release the lock unconditionally.
    Release(LockReleaseArgs),

    /// Remove the lock if it is stale and its owner is gone.
    Cleanup(LockCleanupArgs),

    /// Show whether the lock is held, by whom, and for how long.
    Status,
}

/// Arguments for the `lock acquire` command.
#[derive(Parser, Debug)]
pub struct LockAcquireArgs {
    /// Owner id to record (defaults to `user@host`).
    #[arg(long)]
    pub owner: Option<String>,

    /// Seconds to wait before giving up (defaults to `lock_timeout_secs`).
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Arguments for the `lock release` command.
#[derive(Parser, Debug)]
pub struct LockReleaseArgs {
    /// Owner id, for the log only; release never checks ownership.
    #[arg(long)]
    pub owner: Option<String>,
}

/// Arguments for the `lock cleanup` command.
#[derive(Parser, Debug)]
pub struct LockCleanupArgs {
    /// Age in seconds past which the lock counts as stale (defaults to
    /// `lock_stale_secs`).
    #[arg(long)]
    pub max_age: Option<u64>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_session_start() {
        let cli = Cli::try_parse_from(["chime", "session-start", "--announce"]).unwrap();
        if let Command::SessionStart(args) = cli.command {
            assert!(args.announce);
        } else {
            panic!("Expected SessionStart command");
        }
    }

    #[test]
    fn parse_session_end_defaults() {
        let cli = Cli::try_parse_from(["chime", "session-end"]).unwrap();
        if let Command::SessionEnd(args) = cli.command {
            assert!(!args.cleanup);
        } else {
            panic!("Expected SessionEnd command");
        }
    }

    #[test]
    fn parse_user_prompt_submit_flags() {
        let cli = Cli::try_parse_from([
            "chime",
            "user-prompt-submit",
            "--validate",
            "--log-only",
            "--store-last-prompt",
        ])
        .unwrap();
        if let Command::UserPromptSubmit(args) = cli.command {
            assert!(args.validate);
            assert!(args.log_only);
            assert!(args.store_last_prompt);
        } else {
            panic!("Expected UserPromptSubmit command");
        }
    }

    #[test]
    fn parse_notification() {
        let cli = Cli::try_parse_from(["chime", "notification", "--notify"]).unwrap();
        if let Command::Notification(args) = cli.command {
            assert!(args.notify);
        } else {
            panic!("Expected Notification command");
        }
    }

    #[test]
    fn parse_tool_hooks() {
        let cli = Cli::try_parse_from(["chime", "pre-tool-use"]).unwrap();
        assert!(matches!(cli.command, Command::PreToolUse));

        let cli = Cli::try_parse_from(["chime", "post-tool-use"]).unwrap();
        assert!(matches!(cli.command, Command::PostToolUse));
    }

    #[test]
    fn parse_subagent_stop() {
        let cli = Cli::try_parse_from(["chime", "subagent-stop", "--chat", "--notify"]).unwrap();
        if let Command::SubagentStop(args) = cli.command {
            assert!(args.chat);
            assert!(args.notify);
        } else {
            panic!("Expected SubagentStop command");
        }
    }

    #[test]
    fn parse_stop_defaults() {
        let cli = Cli::try_parse_from(["chime", "stop"]).unwrap();
        if let Command::Stop(args) = cli.command {
            assert!(!args.chat);
            assert!(!args.notify);
        } else {
            panic!("Expected Stop command");
        }
    }

    #[test]
    fn parse_pre_compact() {
        let cli = Cli::try_parse_from(["chime", "pre-compact", "--backup", "--verbose"]).unwrap();
        if let Command::PreCompact(args) = cli.command {
            assert!(args.backup);
            assert!(args.verbose);
        } else {
            panic!("Expected PreCompact command");
        }
    }

    #[test]
    fn parse_permission_request() {
        let cli = Cli::try_parse_from(["chime", "permission-request", "--auto-allow"]).unwrap();
        if let Command::PermissionRequest(args) = cli.command {
            assert!(args.auto_allow);
            assert!(!args.log_only);
        } else {
            panic!("Expected PermissionRequest command");
        }
    }

    #[test]
    fn parse_agent_notification() {
        let cli = Cli::try_parse_from(["chime", "agent-notification", "--agent=coder"]).unwrap();
        if let Command::AgentNotification(args) = cli.command {
            assert_eq!(args.agent.as_deref(), Some("coder"));
        } else {
            panic!("Expected AgentNotification command");
        }

        // Unknown roles must not be a parse error; hooks fail open.
        assert!(Cli::try_parse_from(["chime", "agent-notification", "--agent=pilot"]).is_ok());
    }

    #[test]
    fn parse_subagent_start_and_failure() {
        let cli = Cli::try_parse_from(["chime", "subagent-start"]).unwrap();
        assert!(matches!(cli.command, Command::SubagentStart));

        let cli = Cli::try_parse_from(["chime", "post-tool-use-failure"]).unwrap();
        assert!(matches!(cli.command, Command::PostToolUseFailure));
    }

    #[test]
    fn parse_lock_acquire() {
        let cli = Cli::try_parse_from([
            "chime", "lock", "acquire", "--owner", "agent-1", "--timeout", "5",
        ])
        .unwrap();
        if let Command::Lock(lock_cmd) = cli.command {
            assert_eq!(lock_cmd.name, None);
            if let LockAction::Acquire(args) = lock_cmd.action {
                assert_eq!(args.owner.as_deref(), Some("agent-1"));
                assert_eq!(args.timeout, Some(5));
            } else {
                panic!("Expected Acquire action");
            }
        } else {
            panic!("Expected Lock command");
        }
    }

    #[test]
    fn parse_lock_cleanup_with_name() {
        let cli = Cli::try_parse_from([
            "chime", "lock", "cleanup", "--max-age", "120", "--name", "speech",
        ])
        .unwrap();
        if let Command::Lock(lock_cmd) = cli.command {
            assert_eq!(lock_cmd.name.as_deref(), Some("speech"));
            if let LockAction::Cleanup(args) = lock_cmd.action {
                assert_eq!(args.max_age, Some(120));
            } else {
                panic!("Expected Cleanup action");
            }
        } else {
            panic!("Expected Lock command");
        }
    }

    #[test]
    fn parse_lock_status_and_release() {
        let cli = Cli::try_parse_from(["chime", "lock", "status"]).unwrap();
        if let Command::Lock(lock_cmd) = cli.command {
            assert!(matches!(lock_cmd.action, LockAction::Status));
        } else {
            panic!("Expected Lock command");
        }

        let cli = Cli::try_parse_from(["chime", "lock", "release"]).unwrap();
        if let Command::Lock(lock_cmd) = cli.command {
            assert!(matches!(lock_cmd.action, LockAction::Release(_)));
        } else {
            panic!("Expected Lock command");
        }
    }

    #[test]
    fn parse_unknown_command_fails() {
        assert!(Cli::try_parse_from(["chime", "post-compact"]).is_err());
    }
}
