//! Chat transcript export.
//!
//! The runtime keeps the conversation as JSONL. Stop hooks can mirror it
//! into `logs/chat.json`, a single JSON array that is easier to browse.

use crate::context::HookContext;
use crate::error::{ChimeError, Result};
use crate::fs::atomic_write_file;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parse JSONL content, skipping blank and malformed lines.
pub fn parse_jsonl(content: &str) -> Vec<Value> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect()
}

/// Export the transcript at `transcript` to `logs/chat.json`.
///
/// # Returns
///
/// * `Ok(Some(n))` - `n` entries were written
/// * `Ok(None)` - The transcript does not exist; nothing was written
/// * `Err(ChimeError::UserError)` - The transcript or export could not be read or written
pub fn export_chat(ctx: &HookContext, transcript: &Path) -> Result<Option<usize>> {
    if !transcript.exists() {
        debug!("transcript '{}' not found, skipping export", transcript.display());
        return Ok(None);
    }

    let content = fs::read_to_string(transcript).map_err(|e| {
        ChimeError::UserError(format!(
            "failed to read transcript '{}': {}",
            transcript.display(),
            e
        ))
    })?;

    let entries = parse_jsonl(&content);
    let count = entries.len();
    let json = serde_json::to_string_pretty(&Value::Array(entries))
        .map_err(|e| ChimeError::UserError(format!("failed to serialize transcript: {}", e)))?;

    atomic_write_file(ctx.chat_export_path(), &json)?;
    Ok(Some(count))
}
