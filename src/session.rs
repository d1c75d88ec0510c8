//! Per-session data kept across hook invocations.
//!
//! One JSON file per session under `.claude/data/sessions/`. Reads never
//! fail (a missing or corrupt file yields a fresh record) and writes are
//! best-effort, so session bookkeeping can never block a hook.

use crate::context::HookContext;
use crate::error::{ChimeError, Result};
use crate::fs::atomic_write_file;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub session_id: String,

    /// Prompts submitted in this session, oldest first.
    #[serde(default)]
    pub prompts: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,

    /// When the session was first seen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
}

impl SessionData {
    /// An empty record for `session_id`.
    pub fn new(session_id: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            prompts: Vec::new(),
            agent_name: None,
            start_time: None,
        }
    }

    /// Load the stored record, or a fresh one.
    pub fn read(ctx: &HookContext, session_id: &str) -> Self {
        let path = ctx.session_path(session_id);
        let Ok(content) = fs::read_to_string(&path) else {
            return Self::new(session_id);
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            debug!("corrupt session file '{}': {}", path.display(), e);
            Self::new(session_id)
        })
    }

    /// Persist the record. Failures are logged, not returned.
    pub fn write(&self, ctx: &HookContext) {
        if let Err(e) = self.try_write(ctx) {
            warn!("failed to write session data for {}: {}", self.session_id, e);
        }
    }

    fn try_write(&self, ctx: &HookContext) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            ChimeError::UserError(format!("failed to serialize session data: {}", e))
        })?;
        atomic_write_file(ctx.session_path(&self.session_id), &json)
    }

    /// Record the start time unless one is already set.
    pub fn mark_started(&mut self, now: DateTime<Utc>) {
        self.start_time.get_or_insert(now);
    }
}
