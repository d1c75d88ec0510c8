//! Shared fixtures for command tests.

use crate::commands::HookRuntime;
use crate::config::{Config, HookEnv};
use crate::context::HookContext;
use crate::events::read_array_file;
use crate::tts::Speaker;
use serde_json::Value;
use std::cell::RefCell;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Speaker that remembers what it was asked to say.
#[derive(Debug, Default)]
pub(crate) struct RecordingSpeaker {
    spoken: RefCell<Vec<String>>,
}

impl RecordingSpeaker {
    pub(crate) fn spoken(&self) -> Vec<String> {
        self.spoken.borrow().clone()
    }
}

impl Speaker for RecordingSpeaker {
    fn speak(&self, text: &str) -> bool {
        self.spoken.borrow_mut().push(text.to_string());
        true
    }
}

/// A throwaway project directory with its context, config, and speaker.
pub(crate) struct TestProject {
    pub(crate) temp_dir: TempDir,
    pub(crate) ctx: HookContext,
    pub(crate) config: Config,
    pub(crate) hook_env: HookEnv,
    pub(crate) speaker: RecordingSpeaker,
}

impl TestProject {
    pub(crate) fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub(crate) fn with_config(config: Config) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let ctx = HookContext::at(temp_dir.path());
        Self {
            temp_dir,
            ctx,
            config,
            hook_env: HookEnv::default(),
            speaker: RecordingSpeaker::default(),
        }
    }

    pub(crate) fn runtime(&self) -> HookRuntime<'_> {
        HookRuntime {
            ctx: &self.ctx,
            config: &self.config,
            hook_env: &self.hook_env,
            speaker: &self.speaker,
        }
    }

    pub(crate) fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Entries of the JSON event log `name`.
    pub(crate) fn read_log(&self, name: &str) -> Vec<Value> {
        read_array_file(&self.ctx.event_log_path(name))
    }
}

/// An empty git repository in a temp directory.
pub(crate) fn create_test_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    git(temp_dir.path(), &["init", "--quiet"]);
    temp_dir
}

fn git(repo_dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stderr
        );
    }
}
