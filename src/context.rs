//! Project context resolution for chime.
//!
//! Every hook resolves the same project root so that logs, session data,
//! and the announcement lock are shared by all hook processes of one
//! project regardless of the directory the runtime launched them from.

use crate::config::HookEnv;
use crate::error::{ChimeError, Result};
use crate::process;
use std::env;
use std::path::{Path, PathBuf};

/// Runtime directory inside the project.
pub const CLAUDE_DIR: &str = ".claude";

/// Config file name inside the runtime directory.
pub const CONFIG_FILE: &str = "chime.yaml";

/// Resolved paths for a hook invocation. All paths are absolute when the
/// root is.
#[derive(Debug, Clone)]
pub struct HookContext {
    /// Project root.
    pub project_root: PathBuf,

    /// `{root}/.claude/logs/`: JSON event logs and `hooks.log`.
    pub logs_dir: PathBuf,

    /// `{root}/.claude/data/sessions/`: per-session JSON data.
    pub sessions_dir: PathBuf,

    /// `{root}/.claude/data/tts_queue/`: announcement lock files.
    pub tts_queue_dir: PathBuf,

    /// `{root}/logs/`: exported chat transcripts and cleanup records.
    pub chat_dir: PathBuf,
}

impl HookContext {
    /// Resolve the context for the current process.
    ///
    /// An explicit project dir from the environment wins; otherwise the
    /// enclosing git repository, otherwise the working directory itself.
    pub fn resolve(hook_env: &HookEnv) -> Result<Self> {
        if let Some(dir) = &hook_env.project_dir {
            return Ok(Self::at(dir.clone()));
        }

        let cwd = env::current_dir().map_err(|e| {
            ChimeError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Ok(Self::resolve_from(&cwd))
    }

    /// Resolve the context starting from `cwd`, ignoring the environment.
    pub fn resolve_from<P: AsRef<Path>>(cwd: P) -> Self {
        let cwd = cwd.as_ref();
        let root = process::git_repo_root(cwd).unwrap_or_else(|_| cwd.to_path_buf());
        Self::at(root)
    }

    /// Context rooted exactly at `project_root`.
    pub fn at<P: Into<PathBuf>>(project_root: P) -> Self {
        let project_root = project_root.into();
        let claude_dir = project_root.join(CLAUDE_DIR);
        let data_dir = claude_dir.join("data");

        Self {
            logs_dir: claude_dir.join("logs"),
            sessions_dir: data_dir.join("sessions"),
            tts_queue_dir: data_dir.join("tts_queue"),
            chat_dir: project_root.join("logs"),
            project_root,
        }
    }

    /// Path to the optional config file.
    pub fn config_path(&self) -> PathBuf {
        self.project_root.join(CLAUDE_DIR).join(CONFIG_FILE)
    }

    /// Path to the plain-text diagnostic log.
    pub fn hooks_log_path(&self) -> PathBuf {
        self.logs_dir.join("hooks.log")
    }

    /// Path to the JSON array log named `name`.
    pub fn event_log_path(&self, name: &str) -> PathBuf {
        self.logs_dir.join(format!("{}.json", name))
    }

    /// Path to the session-end cleanup record log.
    pub fn cleanup_log_path(&self) -> PathBuf {
        self.chat_dir.join("cleanup.json")
    }

    /// Path to the exported chat transcript.
    pub fn chat_export_path(&self) -> PathBuf {
        self.chat_dir.join("chat.json")
    }

    /// Directory for pre-compaction transcript copies.
    pub fn transcript_backup_dir(&self) -> PathBuf {
        self.chat_dir.join("transcript_backups")
    }

    /// Path to a session's data file.
    pub fn session_path(&self, session_id: &str) -> PathBuf {
        self.sessions_dir.join(format!("{}.json", session_id))
    }
}
