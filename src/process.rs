//! External command runner for chime.
//!
//! Speech backends and project-root discovery shell out to `git`, `curl`,
//! `afplay`, and `say`. All of them go through `run_command` so output is
//! captured (nothing leaks onto the hook's stdout) and failures carry the
//! program name and exit code.

use crate::error::{ChimeError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Result of a successful command execution.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl CommandOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Run `program` with `args`, optionally in `cwd`, capturing all output.
///
/// Stdin is closed so a child never consumes the hook event.
///
/// # Returns
///
/// * `Ok(CommandOutput)` - On exit code 0
/// * `Err(ChimeError::UserError)` - If the program could not be spawned or exited non-zero
pub fn run_command(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<CommandOutput> {
    let mut command = Command::new(program);
    command.args(args).stdin(Stdio::null());
    if let Some(cwd) = cwd {
        command.current_dir(cwd);
    }

    let output = command
        .output()
        .map_err(|e| ChimeError::UserError(format!("failed to execute {}: {}", program, e)))?;

    let captured = CommandOutput::from_output(&output);
    if output.status.success() {
        Ok(captured)
    } else {
        let exit_code = output.status.code().unwrap_or(-1);
        let detail = if captured.stderr.is_empty() {
            captured.stdout
        } else {
            captured.stderr
        };
        Err(ChimeError::UserError(format!(
            "{} failed (exit code {}): {}",
            program, exit_code, detail
        )))
    }
}

/// Top level of the git repository containing `cwd`.
pub fn git_repo_root<P: AsRef<Path>>(cwd: P) -> Result<PathBuf> {
    let output = run_command("git", &["rev-parse", "--show-toplevel"], Some(cwd.as_ref()))?;
    if output.stdout.is_empty() {
        return Err(ChimeError::UserError(
            "git rev-parse returned an empty repository root".to_string(),
        ));
    }
    Ok(PathBuf::from(output.stdout))
}
