//! Implementation of the `chime session-end` hook.

use super::{HookRuntime, now_iso};
use crate::cli::SessionEndArgs;
use crate::error::Result;
use crate::events::{HookEvent, append_cleanup_record};
use crate::input::HookInput;
use serde_json::json;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing::{debug, info};

/// Log the end of a session and optionally tidy `logs/`.
pub fn cmd_session_end(
    rt: &HookRuntime<'_>,
    mut input: HookInput,
    args: &SessionEndArgs,
) -> Result<()> {
    input.insert("logged_at", json!(now_iso()));
    rt.log_event(HookEvent::SessionEnd, &input)?;

    if !args.cleanup {
        return Ok(());
    }

    let actions = perform_cleanup(&rt.ctx.chat_dir, rt.config.chat_max_age());
    if actions.is_empty() {
        debug!("nothing to clean up");
        return Ok(());
    }

    info!(count = actions.len(), "cleaned up session files");
    append_cleanup_record(
        rt.ctx,
        &json!({
            "session_id": input.session_id(),
            "cleanup_at": now_iso(),
            "actions": actions,
        }),
    )
}

/// Remove `*.tmp` files from `dir`, and `chat.json` once it is older than
/// `chat_max_age`. Returns a description of each removal.
///
/// Hidden `.*.tmp` files belong to in-flight atomic writes and are left
/// alone. Individual failures are skipped.
pub fn perform_cleanup(dir: &Path, chat_max_age: Duration) -> Vec<String> {
    let mut actions = Vec::new();

    let Ok(entries) = fs::read_dir(dir) else {
        return actions;
    };

    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".tmp")
            && !name.starts_with('.')
            && fs::remove_file(entry.path()).is_ok()
        {
            actions.push(format!("Removed temp file: {}", name));
        }
    }

    let chat = dir.join("chat.json");
    let age = fs::metadata(&chat)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|modified| SystemTime::now().duration_since(modified).ok());
    if let Some(age) = age
        && age > chat_max_age
        && fs::remove_file(&chat).is_ok()
    {
        actions.push(format!(
            "Removed stale chat.json (older than {} hours)",
            chat_max_age.as_secs() / 3600
        ));
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::read_array_file;
    use crate::test_support::TestProject;
    use filetime::FileTime;

    fn age_file(path: &Path, secs: u64) {
        let past = SystemTime::now() - Duration::from_secs(secs);
        filetime::set_file_mtime(path, FileTime::from_system_time(past)).unwrap();
    }

    #[test]
    fn test_logs_with_timestamp() {
        let project = TestProject::new();
        cmd_session_end(
            &project.runtime(),
            HookInput::from_value(json!({"session_id": "s1", "reason": "exit"})),
            &SessionEndArgs { cleanup: false },
        )
        .unwrap();

        let log = project.read_log("session_end");
        assert_eq!(log.len(), 1);
        assert_eq!(log[0]["reason"], "exit");
        let logged_at = log[0]["logged_at"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(logged_at).is_ok());
    }

    #[test]
    fn test_cleanup_removes_tmp_and_stale_chat() {
        let project = TestProject::new();
        let logs = project.root().join("logs");
        fs::create_dir_all(&logs).unwrap();
        fs::write(logs.join("a.tmp"), "x").unwrap();
        fs::write(logs.join("keep.json"), "[]").unwrap();
        fs::write(logs.join("chat.json"), "[]").unwrap();
        age_file(&logs.join("chat.json"), 25 * 3600);

        cmd_session_end(
            &project.runtime(),
            HookInput::from_value(json!({"session_id": "s1"})),
            &SessionEndArgs { cleanup: true },
        )
        .unwrap();

        assert!(!logs.join("a.tmp").exists());
        assert!(!logs.join("chat.json").exists());
        assert!(logs.join("keep.json").exists());

        let records = read_array_file(&project.ctx.cleanup_log_path());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["session_id"], "s1");
        assert_eq!(
            records[0]["actions"],
            json!([
                "Removed temp file: a.tmp",
                "Removed stale chat.json (older than 24 hours)"
            ])
        );
    }

    #[test]
    fn test_cleanup_skips_in_flight_atomic_writes() {
        let project = TestProject::new();
        let logs = project.root().join("logs");
        fs::create_dir_all(&logs).unwrap();
        let in_flight = format!(".chat.json.{}.tmp", std::process::id());
        fs::write(logs.join(&in_flight), "[").unwrap();
        fs::write(logs.join("old.tmp"), "x").unwrap();

        let actions = perform_cleanup(&logs, Duration::from_secs(24 * 3600));

        assert_eq!(actions, vec!["Removed temp file: old.tmp".to_string()]);
        assert!(logs.join(&in_flight).exists());
        assert!(!logs.join("old.tmp").exists());
    }

    #[test]
    fn test_fresh_chat_is_kept() {
        let project = TestProject::new();
        let logs = project.root().join("logs");
        fs::create_dir_all(&logs).unwrap();
        fs::write(logs.join("chat.json"), "[]").unwrap();

        let actions = perform_cleanup(&logs, Duration::from_secs(24 * 3600));

        assert!(actions.is_empty());
        assert!(logs.join("chat.json").exists());
    }

    #[test]
    fn test_nothing_to_clean_writes_no_record() {
        let project = TestProject::new();
        cmd_session_end(
            &project.runtime(),
            HookInput::from_value(json!({"session_id": "s1"})),
            &SessionEndArgs { cleanup: true },
        )
        .unwrap();

        assert!(!project.ctx.cleanup_log_path().exists());
    }

    #[test]
    fn test_missing_logs_dir_is_fine() {
        let project = TestProject::new();
        assert!(perform_cleanup(&project.root().join("nope"), Duration::ZERO).is_empty());
    }
}
