//! Diagnostic logging for hooks.
//!
//! Hooks own neither stdout (the runtime may parse it) nor, usefully,
//! stderr, so diagnostics go to `.claude/logs/hooks.log` as lines like:
//!
//! ```text
//! 2026-01-01 12:00:00 DEBUG chime::announce: lock acquired, announcing
//! ```

use crate::config::HookEnv;
use crate::context::HookContext;
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::ChronoLocal;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Map a `LOG_LEVEL` value to a tracing level.
///
/// Case-insensitive; `WARNING` is accepted for `WARN`. Anything else,
/// including no value at all, means DEBUG.
pub fn parse_level(raw: Option<&str>) -> Level {
    match raw.map(|r| r.trim().to_ascii_uppercase()).as_deref() {
        Some("ERROR") => Level::ERROR,
        Some("WARN") | Some("WARNING") => Level::WARN,
        Some("INFO") => Level::INFO,
        Some("TRACE") => Level::TRACE,
        _ => Level::DEBUG,
    }
}

/// Install the file-backed subscriber for this process.
///
/// Failing to open the log file, or a subscriber already being installed,
/// leaves logging disabled; a hook never fails because of its own logging.
pub fn init(ctx: &HookContext, hook_env: &HookEnv) {
    if fs::create_dir_all(&ctx.logs_dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(ctx.hooks_log_path())
    else {
        return;
    };

    let level = parse_level(hook_env.log_level.as_deref());
    let filter = EnvFilter::new(level.as_str());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
        .try_init();
}
