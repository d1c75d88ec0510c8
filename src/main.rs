//! Chime: agent lifecycle hooks with lock-serialized spoken announcements.
//!
//! This is the main entry point for the `chime` CLI. It parses arguments,
//! resolves the project context, installs file logging, dispatches to the
//! appropriate command handler, and maps errors to exit codes.

mod announce;
mod cli;
mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod fs;
mod guard;
pub mod input;
pub mod locks;
mod logging;
pub mod messages;
pub mod process;
pub mod session;
pub mod transcript;
pub mod tts;

#[cfg(test)]
mod test_support;

use cli::Cli;
use config::HookEnv;
use context::HookContext;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    let hook_env = HookEnv::from_env();
    let is_hook = commands::hook_event(&cli.command).is_some();

    if is_hook && hook_env.skip_hooks {
        return ExitCode::from(exit_codes::SUCCESS as u8);
    }

    let result = HookContext::resolve(&hook_env).and_then(|ctx| {
        logging::init(&ctx, &hook_env);
        commands::dispatch(cli.command, &ctx, &hook_env)
    });

    match result {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        // Hooks fail open even before dispatch, e.g. on an unusable cwd.
        Err(err) if is_hook && !err.is_blocking() => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // A block message is read by the agent runtime as-is.
            if err.is_blocking() {
                eprintln!("{}", err);
            } else {
                eprintln!("Error: {}", err);
            }

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
