//! Implementation of the `chime pre-compact` hook.

use super::HookRuntime;
use crate::cli::PreCompactArgs;
use crate::context::HookContext;
use crate::error::{ChimeError, Result};
use crate::events::HookEvent;
use crate::input::HookInput;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Log the compaction, optionally back up the transcript, and optionally
/// tell the user what is happening.
pub fn cmd_pre_compact(
    rt: &HookRuntime<'_>,
    input: &HookInput,
    args: &PreCompactArgs,
) -> Result<()> {
    rt.log_event(HookEvent::PreCompact, input)?;

    let mut backup = None;
    if args.backup
        && let Some(transcript) = input.transcript_path()
    {
        match backup_transcript(rt.ctx, Path::new(transcript), input.trigger(), Utc::now()) {
            Ok(Some(path)) => {
                info!("transcript backed up to {}", path.display());
                backup = Some(path);
            }
            Ok(None) => {}
            Err(e) => warn!("transcript backup failed: {}", e),
        }
    }

    if args.verbose {
        println!(
            "{}",
            compact_message(
                input.session_id(),
                input.trigger(),
                input.custom_instructions(),
                backup.as_deref(),
            )
        );
    }

    Ok(())
}

/// Copy `transcript` to
/// `logs/transcript_backups/<session>_pre_compact_<trigger>_<YYYYmmdd_HHMMSS>.jsonl`.
///
/// Returns `Ok(None)` when the transcript does not exist.
pub fn backup_transcript(
    ctx: &HookContext,
    transcript: &Path,
    trigger: &str,
    now: DateTime<Utc>,
) -> Result<Option<PathBuf>> {
    if !transcript.is_file() {
        return Ok(None);
    }

    let file_name = transcript
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let session_name = file_name.strip_suffix(".jsonl").unwrap_or(&file_name);
    let backup_name = format!(
        "{}_pre_compact_{}_{}.jsonl",
        session_name,
        trigger,
        now.format("%Y%m%d_%H%M%S")
    );

    let backup_dir = ctx.transcript_backup_dir();
    fs::create_dir_all(&backup_dir).map_err(|e| {
        ChimeError::UserError(format!(
            "failed to create backup directory '{}': {}",
            backup_dir.display(),
            e
        ))
    })?;

    let backup_path = backup_dir.join(backup_name);
    fs::copy(transcript, &backup_path).map_err(|e| {
        ChimeError::UserError(format!(
            "failed to copy transcript to '{}': {}",
            backup_path.display(),
            e
        ))
    })?;

    Ok(Some(backup_path))
}

/// The `--verbose` notice.
pub fn compact_message(
    session_id: &str,
    trigger: &str,
    custom_instructions: &str,
    backup: Option<&Path>,
) -> String {
    let session: String = session_id.chars().take(8).collect();

    let mut message = if trigger == "manual" {
        let mut message = format!("Preparing for manual compaction (session: {}...)", session);
        if !custom_instructions.is_empty() {
            let instructions: String = custom_instructions.chars().take(100).collect();
            message.push_str(&format!("\nCustom instructions: {}...", instructions));
        }
        message
    } else {
        format!(
            "Auto-compaction triggered due to full context window (session: {}...)",
            session
        )
    };

    if let Some(path) = backup {
        message.push_str(&format!("\nTranscript backed up to: {}", path.display()));
    }
    message
}
